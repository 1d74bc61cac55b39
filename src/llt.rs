//! Prandtl lifting-line solver.
//!
//! The circulation distribution is expanded as a finite Fourier sine series,
//! `Gamma(theta) = 2 b V sum_n A_n sin(n theta)`, and the monoplane equation is
//! collocated at the spanwise stations, giving one linear equation per station:
//!
//! ```text
//! sum_n A_n sin(n theta_i) * ( 2 b / (pi c_i) + n / sin(theta_i) )
//!     = alpha_i - alpha_L0                                  (radians)
//! ```
//!
//! The N x N system is solved directly; no iteration is involved. Lift,
//! induced angle, and induced drag all follow from the Fourier coefficients.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use ndarray_linalg::{ReciprocalConditionNum, Solve};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{AeroError, Result};
use crate::planform::{PlanformGeometry, SpanwiseStation};

/// Spanwise lift distribution for one angle of attack.
///
/// Per-station sequences are ordered left tip to right tip, matching the
/// station ordering from the discretizer. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanwiseResult {
    /// Spanwise station positions.
    pub y: Vec<f64>,
    /// Local chord at each station.
    pub chord: Vec<f64>,
    /// Local lift coefficient at each station.
    pub cl: Vec<f64>,
    /// Local induced angle of attack at each station, degrees.
    pub alpha_induced_deg: Vec<f64>,
    /// Circulation at each station.
    pub circulation: Vec<f64>,
    /// Solved Fourier coefficients A_1..A_N of the circulation series.
    pub fourier: Vec<f64>,
    /// Total wing lift coefficient, `pi * AR * A_1`.
    pub cl_total: f64,
    /// Induced drag coefficient, `pi * AR * sum_n n A_n^2`.
    pub cd_induced: f64,
    /// Section profile drag fed in from the 2D polar.
    pub cd_profile: f64,
    /// Profile plus induced drag.
    pub cd_total: f64,
}

/// Reciprocal-condition-number floor below which the collocation matrix is
/// treated as singular.
const RCOND_FLOOR: f64 = 1e-10;

/// Stateless lifting-line solver; a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftingLineSolver {
    /// Freestream velocity; scales the circulation but none of the coefficients.
    pub velocity: f64,
}

impl Default for LiftingLineSolver {
    fn default() -> Self {
        Self { velocity: 1.0 }
    }
}

impl LiftingLineSolver {
    /// Solver with the given freestream velocity.
    pub fn new(velocity: f64) -> Self {
        Self { velocity }
    }

    /// Solve for the spanwise distribution.
    ///
    /// `alpha_l0_deg` is the root-section zero-lift angle, taken as
    /// representative of every station (a known simplification of this
    /// method). `cd_profile` is the section drag value carried through into
    /// the result's drag breakdown.
    pub fn solve(
        &self,
        planform: &PlanformGeometry,
        stations: &[SpanwiseStation],
        alpha_l0_deg: f64,
        cd_profile: f64,
    ) -> Result<SpanwiseResult> {
        planform.validate()?;
        if stations.is_empty() {
            return Err(AeroError::InvalidGeometry(
                "no spanwise stations supplied".to_string(),
            ));
        }
        if !(self.velocity.is_finite() && self.velocity > 0.0) {
            return Err(AeroError::InvalidGeometry(format!(
                "freestream velocity must be positive and finite, got {}",
                self.velocity
            )));
        }

        let coeffs = self.solve_fourier(planform.span, stations, alpha_l0_deg)?;
        Ok(self.distribution(planform, stations, &coeffs, cd_profile))
    }

    /// Assemble and solve the collocation system for A_1..A_N.
    fn solve_fourier(
        &self,
        span: f64,
        stations: &[SpanwiseStation],
        alpha_l0_deg: f64,
    ) -> Result<Array1<f64>> {
        let n = stations.len();
        let alpha_l0 = alpha_l0_deg.to_radians();

        let mut matrix = Array2::<f64>::zeros((n, n));
        let mut rhs = Array1::<f64>::zeros(n);
        for (i, st) in stations.iter().enumerate() {
            let sin_theta = st.theta.sin();
            // Stations at the theta endpoints make 1/sin(theta) blow up.
            if sin_theta.abs() < 1e-12 {
                return Err(AeroError::SingularSystem { rcond: 0.0 });
            }
            if !(st.chord.is_finite() && st.chord > 0.0) {
                return Err(AeroError::InvalidGeometry(format!(
                    "station {} has non-positive chord {}",
                    i, st.chord
                )));
            }
            let circulation_term = 2.0 * span / (PI * st.chord);
            for j in 0..n {
                let harmonic = (j + 1) as f64;
                matrix[[i, j]] = (harmonic * st.theta).sin()
                    * (circulation_term + harmonic / sin_theta);
            }
            rhs[i] = st.alpha_deg.to_radians() - alpha_l0;
        }

        let rcond = matrix
            .rcond()
            .map_err(|_| AeroError::SingularSystem { rcond: 0.0 })?;
        trace!(n, rcond, "assembled lifting-line system");
        if !rcond.is_finite() || rcond < RCOND_FLOOR {
            return Err(AeroError::SingularSystem { rcond });
        }

        let coeffs = matrix
            .solve_into(rhs)
            .map_err(|_| AeroError::SingularSystem { rcond })?;
        if coeffs.iter().any(|a| !a.is_finite()) {
            return Err(AeroError::SingularSystem { rcond });
        }
        Ok(coeffs)
    }

    /// Reconstruct circulation and derived coefficients from A_1..A_N.
    fn distribution(
        &self,
        planform: &PlanformGeometry,
        stations: &[SpanwiseStation],
        coeffs: &Array1<f64>,
        cd_profile: f64,
    ) -> SpanwiseResult {
        let n = stations.len();
        let span = planform.span;
        let aspect_ratio = planform.aspect_ratio();

        let mut y = Vec::with_capacity(n);
        let mut chord = Vec::with_capacity(n);
        let mut cl = Vec::with_capacity(n);
        let mut alpha_induced_deg = Vec::with_capacity(n);
        let mut circulation = Vec::with_capacity(n);
        for st in stations {
            let sin_theta = st.theta.sin();
            let mut series = 0.0;
            let mut weighted = 0.0;
            for (j, &a) in coeffs.iter().enumerate() {
                let harmonic = (j + 1) as f64;
                let s = (harmonic * st.theta).sin();
                series += a * s;
                weighted += harmonic * a * s;
            }
            let gamma = 2.0 * span * self.velocity * series;
            y.push(st.y);
            chord.push(st.chord);
            circulation.push(gamma);
            cl.push(2.0 * gamma / (self.velocity * st.chord));
            alpha_induced_deg.push((weighted / sin_theta).to_degrees());
        }

        let cl_total = PI * aspect_ratio * coeffs[0];
        let cd_induced = PI
            * aspect_ratio
            * coeffs
                .iter()
                .enumerate()
                .map(|(j, &a)| (j + 1) as f64 * a * a)
                .sum::<f64>();
        debug!(cl_total, cd_induced, "lifting-line solve complete");

        SpanwiseResult {
            y,
            chord,
            cl,
            alpha_induced_deg,
            circulation,
            fourier: coeffs.to_vec(),
            cl_total,
            cd_induced,
            cd_profile,
            cd_total: cd_profile + cd_induced,
        }
    }
}

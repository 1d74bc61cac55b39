//! Spanwise discretization of a linear-taper planform.
//!
//! The wing is collocated over the full span with the classical angular
//! coordinate `y = -(b/2) cos(theta)`: stations sit at `theta_i = i*pi/(N+1)`,
//! which clusters them toward both tips and keeps the endpoints `theta = 0, pi`
//! (where `1/sin(theta)` blows up) out of the system by construction.

use serde::{Deserialize, Serialize};

use crate::error::{AeroError, Result};

/// Linear-taper wing planform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanformGeometry {
    /// Wing span, tip to tip.
    pub span: f64,
    /// Taper ratio: tip chord over root chord.
    pub taper: f64,
    /// Chord at the wing root.
    pub chord_root: f64,
    /// Number of spanwise collocation stations (and Fourier harmonics).
    pub stations: usize,
    /// Linear geometric twist of the tip relative to the root, degrees.
    /// Negative values wash the tip out. Zero if not specified.
    pub washout_deg: f64,
}

impl Default for PlanformGeometry {
    fn default() -> Self {
        Self {
            span: 10.0,
            taper: 1.0,
            chord_root: 1.0,
            stations: 10,
            washout_deg: 0.0,
        }
    }
}

/// One collocation station produced by the discretizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanwiseStation {
    /// Angular coordinate in (0, pi).
    pub theta: f64,
    /// Spanwise position, `-(span/2) cos(theta)`; negative is the left half.
    pub y: f64,
    /// Local chord from linear taper interpolation.
    pub chord: f64,
    /// Local geometric angle of attack, degrees (root angle plus twist).
    pub alpha_deg: f64,
}

impl PlanformGeometry {
    /// Reject degenerate planforms before any solve attempt.
    pub fn validate(&self) -> Result<()> {
        if self.stations < 1 {
            return Err(AeroError::InvalidGeometry(
                "at least one spanwise station is required".to_string(),
            ));
        }
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(AeroError::InvalidGeometry(format!(
                "span must be positive and finite, got {}",
                self.span
            )));
        }
        if !(self.chord_root.is_finite() && self.chord_root > 0.0) {
            return Err(AeroError::InvalidGeometry(format!(
                "root chord must be positive and finite, got {}",
                self.chord_root
            )));
        }
        if !(self.taper.is_finite() && self.taper > 0.0) {
            return Err(AeroError::InvalidGeometry(format!(
                "taper ratio must be positive and finite, got {} (degenerate tip chord)",
                self.taper
            )));
        }
        if !self.washout_deg.is_finite() {
            return Err(AeroError::InvalidGeometry(
                "washout must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Planform area of the trapezoid: `b * c_root * (1 + taper) / 2`.
    pub fn area(&self) -> f64 {
        self.span * self.chord_root * (1.0 + self.taper) / 2.0
    }

    /// Aspect ratio `span^2 / area`.
    pub fn aspect_ratio(&self) -> f64 {
        self.span * self.span / self.area()
    }

    /// Local chord at spanwise position `y` in `[-span/2, span/2]`.
    pub fn chord_at(&self, y: f64) -> f64 {
        let half_span = self.span / 2.0;
        self.chord_root * (1.0 - (1.0 - self.taper) * y.abs() / half_span)
    }

    /// Build the collocation stations for a given root angle of attack.
    ///
    /// Validates the planform first; the returned stations carry everything
    /// the lifting-line solver needs about the geometry.
    pub fn discretize(&self, alpha_root_deg: f64) -> Result<Vec<SpanwiseStation>> {
        self.validate()?;
        if !alpha_root_deg.is_finite() {
            return Err(AeroError::InvalidGeometry(
                "root angle of attack must be finite".to_string(),
            ));
        }

        let n = self.stations;
        let half_span = self.span / 2.0;
        let mut stations = Vec::with_capacity(n);
        for i in 1..=n {
            let theta = i as f64 * std::f64::consts::PI / (n as f64 + 1.0);
            let y = -half_span * theta.cos();
            let chord = self.chord_at(y);
            let alpha_deg = alpha_root_deg + self.washout_deg * y.abs() / half_span;
            stations.push(SpanwiseStation {
                theta,
                y,
                chord,
                alpha_deg,
            });
        }
        Ok(stations)
    }
}

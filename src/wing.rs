//! Wing analysis orchestration.
//!
//! Composes the section polar provider with the lifting-line solver: 2D data
//! is fetched once per airfoil/Reynolds pair, then one lifting-line solve runs
//! per requested angle of attack. Providers are injected explicitly; there is
//! no process-wide solver state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::llt::{LiftingLineSolver, SpanwiseResult};
use crate::planform::PlanformGeometry;
use crate::section::{AirfoilDescriptor, FlowCondition, SectionPolarProvider};

/// Wing-level inputs for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingConfig {
    /// Planform geometry and discretization.
    pub planform: PlanformGeometry,
    /// Geometric angle of attack at the wing root, degrees.
    pub alpha_root_deg: f64,
    /// Freestream velocity.
    pub velocity: f64,
}

impl Default for WingConfig {
    fn default() -> Self {
        Self {
            planform: PlanformGeometry::default(),
            alpha_root_deg: 1.0,
            velocity: 1.0,
        }
    }
}

/// Spanwise lift distributions for a set of angles of attack.
///
/// Sequence of calls: planform validation, one `zero_lift_angle` request, one
/// `section_polars` request covering every angle, then one lifting-line solve
/// per angle with that angle's section drag fed through. Results come back in
/// input order. Fail-fast: the first failing angle aborts the whole analysis;
/// provider failures are propagated unmodified and never retried here.
pub fn find_3d_coefficients<P: SectionPolarProvider>(
    provider: &P,
    airfoil: &AirfoilDescriptor,
    alphas_deg: &[f64],
    flow: &FlowCondition,
    config: &WingConfig,
) -> Result<Vec<SpanwiseResult>> {
    // Geometry problems must surface before the provider is ever consulted.
    config.planform.validate()?;

    let alpha_l0_deg = provider.zero_lift_angle(airfoil, flow)?;
    let polars = provider.section_polars(airfoil, alphas_deg, flow)?;
    debug!(%airfoil, alpha_l0_deg, angles = alphas_deg.len(), "section data acquired");

    let stations = config.planform.discretize(config.alpha_root_deg)?;
    let solver = LiftingLineSolver::new(config.velocity);

    let mut results = Vec::with_capacity(polars.len());
    for polar in &polars {
        let result = solver.solve(&config.planform, &stations, alpha_l0_deg, polar.cd)?;
        debug!(
            alpha_deg = polar.alpha_deg,
            cl_total = result.cl_total,
            cd_total = result.cd_total,
            "angle complete"
        );
        results.push(result);
    }
    Ok(results)
}

/// Single-angle convenience wrapper around [`find_3d_coefficients`].
pub fn find_3d_coefficients_single<P: SectionPolarProvider>(
    provider: &P,
    airfoil: &AirfoilDescriptor,
    alpha_deg: f64,
    flow: &FlowCondition,
    config: &WingConfig,
) -> Result<SpanwiseResult> {
    let mut results = find_3d_coefficients(provider, airfoil, &[alpha_deg], flow, config)?;
    // One input angle always yields exactly one result.
    Ok(results.remove(0))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::AeroError;
    use crate::section::{SectionPolar, ThinAirfoilProvider};

    /// Test double that counts provider traffic.
    struct CountingProvider {
        polar_calls: Cell<usize>,
        zero_lift_calls: Cell<usize>,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                polar_calls: Cell::new(0),
                zero_lift_calls: Cell::new(0),
            }
        }
    }

    impl SectionPolarProvider for CountingProvider {
        fn section_polars(
            &self,
            _airfoil: &AirfoilDescriptor,
            alphas_deg: &[f64],
            _flow: &FlowCondition,
        ) -> Result<Vec<SectionPolar>> {
            self.polar_calls.set(self.polar_calls.get() + 1);
            Ok(alphas_deg
                .iter()
                .map(|&alpha_deg| SectionPolar {
                    alpha_deg,
                    cl: 0.1 * alpha_deg,
                    cd: 0.01,
                    cm: None,
                })
                .collect())
        }

        fn zero_lift_angle(
            &self,
            _airfoil: &AirfoilDescriptor,
            _flow: &FlowCondition,
        ) -> Result<f64> {
            self.zero_lift_calls.set(self.zero_lift_calls.get() + 1);
            Ok(0.0)
        }
    }

    /// Test double standing in for a provider that cannot run at all.
    struct BrokenProvider;

    impl SectionPolarProvider for BrokenProvider {
        fn section_polars(
            &self,
            _airfoil: &AirfoilDescriptor,
            _alphas_deg: &[f64],
            _flow: &FlowCondition,
        ) -> Result<Vec<SectionPolar>> {
            Err(AeroError::Infrastructure("xfoil binary missing".to_string()))
        }

        fn zero_lift_angle(
            &self,
            _airfoil: &AirfoilDescriptor,
            _flow: &FlowCondition,
        ) -> Result<f64> {
            Err(AeroError::Infrastructure("xfoil binary missing".to_string()))
        }
    }

    #[test]
    fn test_default_naca0012_case() {
        let result = find_3d_coefficients_single(
            &ThinAirfoilProvider::default(),
            &AirfoilDescriptor::naca("naca0012"),
            1.0,
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap();
        assert!(result.cl_total > 0.0 && result.cl_total.is_finite());
        assert!(result.cd_induced > 0.0);
        assert!(result.cd_total > result.cd_induced); // profile drag included
        for &cl in &result.cl {
            assert!(cl.is_finite() && cl > 0.0);
        }
    }

    #[test]
    fn test_vectorized_results_align_with_input() {
        let provider = ThinAirfoilProvider::default();
        let alphas = [0.5, 1.0, 2.0];
        let results = find_3d_coefficients(
            &provider,
            &AirfoilDescriptor::naca("0012"),
            &alphas,
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap();
        assert_eq!(results.len(), alphas.len());
        // Geometry is fixed, so only the profile drag varies between angles.
        assert!(results[0].cd_profile < results[2].cd_profile);
        let single = find_3d_coefficients_single(
            &provider,
            &AirfoilDescriptor::naca("0012"),
            1.0,
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(single.cl_total, results[1].cl_total, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_lift_angle_fetched_once() {
        let provider = CountingProvider::new();
        find_3d_coefficients(
            &provider,
            &AirfoilDescriptor::naca("2412"),
            &[0.0, 1.0, 2.0, 3.0],
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap();
        assert_eq!(provider.zero_lift_calls.get(), 1);
        assert_eq!(provider.polar_calls.get(), 1);
    }

    #[test]
    fn test_invalid_geometry_rejected_before_provider_call() {
        let provider = CountingProvider::new();
        let config = WingConfig {
            planform: PlanformGeometry {
                stations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = find_3d_coefficients(
            &provider,
            &AirfoilDescriptor::naca("0012"),
            &[1.0],
            &FlowCondition::default(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, AeroError::InvalidGeometry(_)));
        assert_eq!(provider.zero_lift_calls.get(), 0);
        assert_eq!(provider.polar_calls.get(), 0);

        let config = WingConfig {
            planform: PlanformGeometry {
                taper: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = find_3d_coefficients(
            &provider,
            &AirfoilDescriptor::naca("0012"),
            &[1.0],
            &FlowCondition::default(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, AeroError::InvalidGeometry(_)));
        assert_eq!(provider.zero_lift_calls.get(), 0);
    }

    #[test]
    fn test_provider_failure_propagates_unmodified() {
        let err = find_3d_coefficients(
            &BrokenProvider,
            &AirfoilDescriptor::naca("0012"),
            &[1.0],
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AeroError::Infrastructure(msg) if msg.contains("xfoil")));
    }

    #[test]
    fn test_non_convergent_angle_fails_fast() {
        // 20 deg is outside the thin-airfoil provider's attached range.
        let err = find_3d_coefficients(
            &ThinAirfoilProvider::default(),
            &AirfoilDescriptor::naca("0012"),
            &[1.0, 20.0],
            &FlowCondition::default(),
            &WingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AeroError::NonConvergence { alpha_deg, .. } if alpha_deg == 20.0));
    }

    #[test]
    fn test_cambered_wing_lifts_at_zero_alpha() {
        // naca2412 at alpha_root = 0: negative zero-lift angle still produces lift.
        let config = WingConfig {
            alpha_root_deg: 0.0,
            ..Default::default()
        };
        let result = find_3d_coefficients_single(
            &ThinAirfoilProvider::default(),
            &AirfoilDescriptor::naca("2412"),
            0.0,
            &FlowCondition::default(),
            &config,
        )
        .unwrap();
        assert!(result.cl_total > 0.0);
    }
}

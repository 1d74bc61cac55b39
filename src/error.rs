//! Error taxonomy for wing analyses.
//!
//! Failures are never recovered from silently: any error aborts the computation
//! for the angle of attack it occurred at and is surfaced to the caller with
//! enough context (airfoil, angle, Reynolds number) to diagnose it.

use thiserror::Error;

/// Errors that can occur while producing a spanwise lift distribution.
#[derive(Debug, Error)]
pub enum AeroError {
    /// Planform or flow inputs are degenerate. Raised before any solve is
    /// attempted and before the section polar provider is consulted.
    #[error("invalid wing geometry: {0}")]
    InvalidGeometry(String),

    /// The lifting-line collocation matrix is singular or ill-conditioned
    /// beyond tolerance. Always fatal to the call; never approximated.
    #[error("lifting-line system is singular or ill-conditioned (rcond = {rcond:.3e})")]
    SingularSystem {
        /// Reciprocal condition number estimate; 0.0 when factorization failed outright.
        rcond: f64,
    },

    /// The 2D section solver exhausted its iteration budget without converging.
    #[error("section solver did not converge for {airfoil} at alpha = {alpha_deg} deg (Re = {reynolds})")]
    NonConvergence {
        /// Airfoil the polar was requested for.
        airfoil: String,
        /// Angle of attack that failed, degrees.
        alpha_deg: f64,
        /// Reynolds number of the request (0.0 = inviscid).
        reynolds: f64,
    },

    /// The section polar provider could not run at all. Passed through
    /// unmodified from the provider.
    #[error("section polar provider failed: {0}")]
    Infrastructure(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AeroError>;

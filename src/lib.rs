//! Finite-wing lift distribution from 2D airfoil section data.
//!
//! This library implements classical Prandtl lifting-line theory for
//! preliminary wing sizing: given an airfoil (NACA parametric code or a
//! coordinate-file reference), flow conditions, and a linear-taper planform,
//! it produces the spanwise lift-coefficient distribution together with the
//! total lift, induced drag, and induced-angle distribution.
//!
//! # Structure
//!
//! - [`section`]: 2D section data behind the [`SectionPolarProvider`]
//!   capability, with an in-process thin-airfoil implementation
//! - [`planform`]: spanwise discretization of the planform
//! - [`llt`]: the lifting-line solver (Fourier circulation series, direct
//!   linear solve)
//! - [`wing`]: orchestration, vectorized over angles of attack
//!
//! # Example
//!
//! ```no_run
//! use liftline::{find_3d_coefficients_single, AirfoilDescriptor, FlowCondition,
//!                ThinAirfoilProvider, WingConfig};
//!
//! let result = find_3d_coefficients_single(
//!     &ThinAirfoilProvider::default(),
//!     &AirfoilDescriptor::naca("naca0012"),
//!     1.0,
//!     &FlowCondition::default(),
//!     &WingConfig::default(),
//! )?;
//! println!("CL = {:.4}, CDi = {:.5}", result.cl_total, result.cd_induced);
//! # Ok::<(), liftline::AeroError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod llt;
pub mod planform;
pub mod section;
pub mod wing;

pub use error::{AeroError, Result};
pub use llt::{LiftingLineSolver, SpanwiseResult};
pub use planform::{PlanformGeometry, SpanwiseStation};
pub use section::{
    AirfoilDescriptor, FlowCondition, SectionPolar, SectionPolarProvider, ThinAirfoilProvider,
};
pub use wing::{find_3d_coefficients, find_3d_coefficients_single, WingConfig};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

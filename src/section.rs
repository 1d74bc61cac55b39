//! Two-dimensional airfoil section data.
//!
//! The lifting-line solver only needs a handful of scalars per section: the
//! zero-lift angle of attack and a drag polar value. Where those numbers come
//! from is behind the [`SectionPolarProvider`] capability so that a
//! subprocess-driven panel method, a lookup table, or the in-process
//! thin-airfoil model shipped here can all be plugged into the same analysis.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AeroError, Result};

/// Identifies an airfoil geometry for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirfoilDescriptor {
    /// NACA 4- or 5-digit parametric code, with or without the "naca" prefix
    /// (e.g. "2412", "naca23012").
    Naca(String),
    /// Reference to a stored coordinate file, interpreted by the provider.
    CoordinateFile(String),
}

impl AirfoilDescriptor {
    /// Shorthand for a NACA parametric descriptor.
    pub fn naca(code: &str) -> Self {
        Self::Naca(code.to_string())
    }
}

impl fmt::Display for AirfoilDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naca(code) => write!(f, "naca{}", code.trim_start_matches("naca")),
            Self::CoordinateFile(path) => write!(f, "file:{path}"),
        }
    }
}

/// Flow conditions for a 2D polar request.
///
/// The iteration budget bounds the *section* solver's convergence loop only.
/// The lifting-line solve itself is a direct linear solve and carries no
/// iteration budget of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowCondition {
    /// Reynolds number; 0.0 selects the inviscid approximation.
    pub reynolds: f64,
    /// Convergence iteration budget for the section solver.
    pub panel_iterations: u32,
}

impl Default for FlowCondition {
    fn default() -> Self {
        Self {
            reynolds: 0.0,
            panel_iterations: 10,
        }
    }
}

/// Section coefficients for one airfoil at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPolar {
    /// Angle of attack this entry was computed at, degrees.
    pub alpha_deg: f64,
    /// Section lift coefficient.
    pub cl: f64,
    /// Section drag coefficient.
    pub cd: f64,
    /// Section quarter-chord moment coefficient, when the provider computes one.
    pub cm: Option<f64>,
}

/// Capability for producing 2D section data.
///
/// Implementations are synchronous black boxes; retries, caching, and process
/// management are their own concern. Failures must map onto
/// [`AeroError::NonConvergence`] or [`AeroError::Infrastructure`].
pub trait SectionPolarProvider {
    /// Section coefficients for each requested angle of attack, in input order.
    fn section_polars(
        &self,
        airfoil: &AirfoilDescriptor,
        alphas_deg: &[f64],
        flow: &FlowCondition,
    ) -> Result<Vec<SectionPolar>>;

    /// Angle of attack at which the section produces zero lift, degrees.
    ///
    /// A section property: independent of any requested angle of attack.
    fn zero_lift_angle(&self, airfoil: &AirfoilDescriptor, flow: &FlowCondition) -> Result<f64>;
}

/// Attached-flow range of the thin-airfoil model, degrees from zero lift.
/// Past this the panel method it stands in for would stop converging.
const ATTACHED_RANGE_DEG: f64 = 15.0;

/// Profile drag floor used for inviscid requests.
const CD0_INVISCID: f64 = 0.006;

/// In-process section data from thin-airfoil theory on the NACA camber line.
///
/// Lift and moment come from the classical camber-line Fourier integrals;
/// profile drag from a flat-plate friction estimate with a thickness form
/// factor. Good enough for preliminary sizing, and it keeps the library
/// usable without an external panel-method binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinAirfoilProvider {
    /// Midpoint-rule points for the camber integrals.
    pub quadrature_points: usize,
}

impl Default for ThinAirfoilProvider {
    fn default() -> Self {
        Self {
            quadrature_points: 200,
        }
    }
}

impl ThinAirfoilProvider {
    /// Camber-line Fourier coefficients (integral parts of A0, A1, A2) and
    /// thickness ratio for a NACA descriptor.
    fn camber_integrals(&self, airfoil: &AirfoilDescriptor) -> Result<CamberData> {
        let section = NacaSection::parse(airfoil)?;

        let k = self.quadrature_points.max(16);
        let dtheta = PI / k as f64;
        let mut i0 = 0.0; // (1/pi) int slope dtheta
        let mut i1 = 0.0; // (2/pi) int slope cos(theta) dtheta
        let mut i2 = 0.0; // (2/pi) int slope cos(2 theta) dtheta
        for j in 0..k {
            let theta = (j as f64 + 0.5) * dtheta;
            let x = 0.5 * (1.0 - theta.cos());
            let slope = section.camber_slope(x);
            i0 += slope * dtheta;
            i1 += slope * theta.cos() * dtheta;
            i2 += slope * (2.0 * theta).cos() * dtheta;
        }
        i0 /= PI;
        i1 *= 2.0 / PI;
        i2 *= 2.0 / PI;

        Ok(CamberData {
            i0,
            i1,
            i2,
            thickness: section.thickness,
        })
    }

    /// Profile drag estimate for one angle.
    fn profile_drag(&self, cl: f64, thickness: f64, flow: &FlowCondition) -> f64 {
        let cd0 = if flow.reynolds > 0.0 {
            // Turbulent flat plate, both surfaces, with a thickness form factor.
            let cf = 0.074 / flow.reynolds.powf(0.2);
            2.0 * cf * (1.0 + 2.0 * thickness)
        } else {
            CD0_INVISCID
        };
        cd0 + 0.01 * cl * cl
    }
}

impl SectionPolarProvider for ThinAirfoilProvider {
    fn section_polars(
        &self,
        airfoil: &AirfoilDescriptor,
        alphas_deg: &[f64],
        flow: &FlowCondition,
    ) -> Result<Vec<SectionPolar>> {
        let camber = self.camber_integrals(airfoil)?;
        let alpha_l0_deg = camber.alpha_l0_deg();
        let cm = camber.cm_quarter_chord();

        let mut polars = Vec::with_capacity(alphas_deg.len());
        for &alpha_deg in alphas_deg {
            if (alpha_deg - alpha_l0_deg).abs() > ATTACHED_RANGE_DEG {
                return Err(AeroError::NonConvergence {
                    airfoil: airfoil.to_string(),
                    alpha_deg,
                    reynolds: flow.reynolds,
                });
            }
            let cl = 2.0 * PI * (alpha_deg - alpha_l0_deg).to_radians();
            let cd = self.profile_drag(cl, camber.thickness, flow);
            polars.push(SectionPolar {
                alpha_deg,
                cl,
                cd,
                cm: Some(cm),
            });
        }
        Ok(polars)
    }

    fn zero_lift_angle(&self, airfoil: &AirfoilDescriptor, _flow: &FlowCondition) -> Result<f64> {
        Ok(self.camber_integrals(airfoil)?.alpha_l0_deg())
    }
}

/// Evaluated camber-line integrals for one section.
#[derive(Debug, Clone, Copy)]
struct CamberData {
    i0: f64,
    i1: f64,
    i2: f64,
    thickness: f64,
}

impl CamberData {
    /// Zero-lift angle of attack, degrees: alpha_L0 = -(1/pi) int slope (cos t - 1) dt.
    fn alpha_l0_deg(&self) -> f64 {
        (self.i0 - 0.5 * self.i1).to_degrees()
    }

    /// Quarter-chord moment coefficient: cm = pi/4 (A2 - A1).
    fn cm_quarter_chord(&self) -> f64 {
        0.25 * PI * (self.i2 - self.i1)
    }
}

/// Parsed NACA parametric section.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NacaSection {
    camber: CamberLine,
    /// Maximum thickness as a fraction of chord.
    thickness: f64,
}

/// Mean camber line of a NACA parametric section.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CamberLine {
    /// Symmetric section, zero camber everywhere.
    Flat,
    /// 4-digit: max camber `m` at chordwise position `p`.
    FourDigit { m: f64, p: f64 },
    /// 5-digit (non-reflex): transition point `m` and scale constant `k1`.
    FiveDigit { m: f64, k1: f64 },
}

/// `(designation, m, k1)` for the standard non-reflex 5-digit mean lines.
const FIVE_DIGIT_MEAN_LINES: [(&str, f64, f64); 5] = [
    ("210", 0.0580, 361.40),
    ("220", 0.1260, 51.640),
    ("230", 0.2025, 15.957),
    ("240", 0.2900, 6.643),
    ("250", 0.3910, 3.230),
];

impl NacaSection {
    /// Parse a NACA 4/5-digit code. `CoordinateFile` descriptors need an
    /// external panel solver and are rejected here.
    fn parse(airfoil: &AirfoilDescriptor) -> Result<Self> {
        let code = match airfoil {
            AirfoilDescriptor::Naca(code) => code,
            AirfoilDescriptor::CoordinateFile(_) => {
                return Err(AeroError::Infrastructure(format!(
                    "{airfoil}: coordinate-file airfoils require an external panel solver"
                )));
            }
        };

        let digits = code
            .trim()
            .to_ascii_lowercase()
            .trim_start_matches("naca")
            .to_string();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AeroError::Infrastructure(format!(
                "{airfoil}: not a NACA 4/5-digit code"
            )));
        }

        match digits.len() {
            4 => {
                let m = digits[0..1].parse::<f64>().unwrap_or(0.0) / 100.0;
                let p = digits[1..2].parse::<f64>().unwrap_or(0.0) / 10.0;
                let thickness = digits[2..4].parse::<f64>().unwrap_or(0.0) / 100.0;
                let camber = if m == 0.0 || p == 0.0 {
                    CamberLine::Flat
                } else {
                    CamberLine::FourDigit { m, p }
                };
                Ok(Self { camber, thickness })
            }
            5 => {
                let designation = &digits[0..3];
                let thickness = digits[3..5].parse::<f64>().unwrap_or(0.0) / 100.0;
                let entry = FIVE_DIGIT_MEAN_LINES
                    .iter()
                    .find(|(d, _, _)| *d == designation);
                match entry {
                    Some(&(_, m, k1)) => Ok(Self {
                        camber: CamberLine::FiveDigit { m, k1 },
                        thickness,
                    }),
                    None => Err(AeroError::Infrastructure(format!(
                        "{airfoil}: unsupported 5-digit mean line '{designation}'"
                    ))),
                }
            }
            _ => Err(AeroError::Infrastructure(format!(
                "{airfoil}: expected a 4- or 5-digit code"
            ))),
        }
    }

    /// Camber-line slope dz/dx at chordwise position `x` in [0, 1].
    fn camber_slope(&self, x: f64) -> f64 {
        match self.camber {
            CamberLine::Flat => 0.0,
            CamberLine::FourDigit { m, p } => {
                if x < p {
                    2.0 * m / (p * p) * (p - x)
                } else {
                    2.0 * m / ((1.0 - p) * (1.0 - p)) * (p - x)
                }
            }
            CamberLine::FiveDigit { m, k1 } => {
                if x < m {
                    k1 / 6.0 * (3.0 * x * x - 6.0 * m * x + m * m * (3.0 - m))
                } else {
                    -k1 * m * m * m / 6.0
                }
            }
        }
    }
}

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A tolerance for parent mass matching, either absolute in Dalton or
/// relative in parts per million. The quantized graph construction is exact
/// and does not consume the tolerance itself, it is carried so the
/// constructor signature matches the collaborators that do (peak calling and
/// parent mass correction happen upstream).
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Tolerance {
    /// An absolute tolerance in Dalton
    Absolute(OrderedFloat<f64>),
    /// A relative tolerance in parts per million
    Ppm(OrderedFloat<f64>),
}

impl Tolerance {
    /// Create an absolute tolerance of the given width in Dalton.
    pub fn new_absolute(value: f64) -> Self {
        Self::Absolute(value.abs().into())
    }

    /// Create a relative tolerance of the given width in parts per million.
    pub fn new_ppm(value: f64) -> Self {
        Self::Ppm(value.abs().into())
    }

    /// The lower and upper bound around the given mass.
    pub fn bounds(self, mass: f64) -> (f64, f64) {
        match self {
            Self::Absolute(tolerance) => (mass - tolerance.0, mass + tolerance.0),
            Self::Ppm(ppm) => (
                mass * (1.0 - ppm.0 / 1e6),
                mass * (1.0 + ppm.0 / 1e6),
            ),
        }
    }

    /// Check if two masses are within this tolerance of each other.
    pub fn within(self, a: f64, b: f64) -> bool {
        let (low, high) = self.bounds(a);
        (low..=high).contains(&b)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new_ppm(10.0)
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute(tolerance) => write!(f, "{} da", tolerance.0),
            Self::Ppm(ppm) => write!(f, "{} ppm", ppm.0),
        }
    }
}

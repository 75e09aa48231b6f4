use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// The rescaling constant used to quantize floating point masses to integers.
/// Scaling by this constant before rounding keeps the integer masses of the
/// standard amino acid residues exact, so mass arithmetic on nodes stays free
/// of floating point error.
pub const MASS_SCALER: f64 = 0.9995;

/// The monoisotopic mass of water, subtracted from the parent mass to get the
/// summed residue mass of the peptide.
pub const WATER_MASS: f64 = 18.010_564_684;

/// A cumulative residue mass quantized to a fixed integer scale. Two nominal
/// masses are equal iff their integer values are equal and they order by that
/// value, which makes them usable as graph node keys.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct NominalMass(i32);

impl NominalMass {
    /// The zero mass, the source node of every de novo graph.
    pub const ZERO: Self = Self(0);

    /// Create a nominal mass from an already quantized integer value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Quantize a floating point mass. Any mass that went through this
    /// function is directly comparable to any other, the parent mass and the
    /// residue masses have to use the same rule or scores misalign.
    pub fn from_mass(mass: f64) -> Self {
        Self((mass * MASS_SCALER).round() as i32)
    }

    /// The underlying integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The complementary mass relative to the given total, `total - self`.
    pub const fn complement(self, total: Self) -> Self {
        Self(total.0 - self.0)
    }
}

impl Add for NominalMass {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for NominalMass {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for NominalMass {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::fmt::Display for NominalMass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{MASS_SCALER, NominalMass};

    #[test]
    fn quantization() {
        // The 20 standard residues all quantize to their integer nominal mass
        for (mass, nominal) in [
            (57.021_46, 57),
            (71.037_11, 71),
            (103.009_19, 103),
            (128.094_96, 128),
            (156.101_11, 156),
            (186.079_31, 186),
        ] {
            assert_eq!(NominalMass::from_mass(mass), NominalMass::new(nominal));
        }
    }

    #[test]
    fn complement_involution() {
        let total = NominalMass::from_mass(174.0 / MASS_SCALER);
        assert_eq!(total, NominalMass::new(174));
        let node = NominalMass::new(103);
        assert_eq!(node.complement(total), NominalMass::new(71));
        assert_eq!(node.complement(total).complement(total), node);
        assert_eq!(NominalMass::ZERO.complement(total), total);
        assert_eq!(total.complement(total), NominalMass::ZERO);
    }

    #[test]
    fn ordering() {
        assert!(NominalMass::new(71) < NominalMass::new(103));
        assert_eq!(
            NominalMass::new(71) + NominalMass::new(103),
            NominalMass::new(174)
        );
        assert_eq!(
            NominalMass::new(174) - NominalMass::new(103),
            NominalMass::new(71)
        );
    }
}

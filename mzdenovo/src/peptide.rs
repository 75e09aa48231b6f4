use serde::{Deserialize, Serialize};

use crate::{nominal_mass::NominalMass, residue::Residue};

/// An ordered candidate residue sequence, always written N to C terminal.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Peptide(Vec<Residue>);

impl Peptide {
    /// Create a peptide from residues in N to C terminal order.
    pub const fn new(residues: Vec<Residue>) -> Self {
        Self(residues)
    }

    /// The summed nominal mass of all residues.
    pub fn nominal_mass(&self) -> NominalMass {
        self.0
            .iter()
            .fold(NominalMass::ZERO, |total, residue| {
                total + residue.nominal_mass()
            })
    }
}

impl std::ops::Deref for Peptide {
    type Target = [Residue];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Residue> for Peptide {
    fn from_iter<I: IntoIterator<Item = Residue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for residue in &self.0 {
            write!(f, "{residue}")?;
        }
        Ok(())
    }
}

/// A candidate peptide with its flanking residues in the source protein. A
/// missing flank means the peptide abuts a protein terminus.
#[derive(
    Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Annotation {
    /// The residue immediately N terminal of the peptide, if any
    pub previous: Option<Residue>,
    /// The candidate peptide itself
    pub peptide: Peptide,
    /// The residue immediately C terminal of the peptide, if any
    pub next: Option<Residue>,
}

impl Annotation {
    /// Create an annotation from a peptide and its optional flanks.
    pub const fn new(previous: Option<Residue>, peptide: Peptide, next: Option<Residue>) -> Self {
        Self {
            previous,
            peptide,
            next,
        }
    }
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.previous {
            Some(residue) => write!(f, "{residue}.")?,
            None => write!(f, "_.")?,
        }
        write!(f, "{}", self.peptide)?;
        match self.next {
            Some(residue) => write!(f, ".{residue}"),
            None => write!(f, "._"),
        }
    }
}

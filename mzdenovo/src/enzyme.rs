use serde::{Deserialize, Serialize};

use crate::residue::Residue;

/// A protease specificity rule: which residues it cleaves after (or before)
/// and on which side of those residues the cleavage happens.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Enzyme {
    name: String,
    cleavable: Vec<char>,
    c_terminal: bool,
}

impl Enzyme {
    /// Create an enzyme cleaving at the given residue symbols,
    /// `c_terminal` selects cleavage on the C terminal side of those
    /// residues (trypsin like) instead of the N terminal side (Asp-N like).
    pub fn new(name: &str, cleavable: impl IntoIterator<Item = char>, c_terminal: bool) -> Self {
        Self {
            name: name.to_string(),
            cleavable: cleavable.into_iter().collect(),
            c_terminal,
        }
    }

    /// Trypsin, cleaves after K and R.
    pub fn trypsin() -> Self {
        Self::new("Trypsin", ['K', 'R'], true)
    }

    /// Lys-C, cleaves after K.
    pub fn lys_c() -> Self {
        Self::new("Lys-C", ['K'], true)
    }

    /// Arg-C, cleaves after R.
    pub fn arg_c() -> Self {
        Self::new("Arg-C", ['R'], true)
    }

    /// Asp-N, cleaves before D.
    pub fn asp_n() -> Self {
        Self::new("Asp-N", ['D'], false)
    }

    /// Glu-C, cleaves after E.
    pub fn glu_c() -> Self {
        Self::new("Glu-C", ['E'], true)
    }

    /// The name of the enzyme.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this enzyme can cleave at the given residue.
    pub fn is_cleavable(&self, residue: &Residue) -> bool {
        self.cleavable.contains(&residue.symbol())
    }

    /// Whether cleavage happens on the C terminal side of the recognized
    /// residue.
    pub const fn cleaves_c_terminal_side(&self) -> bool {
        self.c_terminal
    }
}

impl std::fmt::Display for Enzyme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

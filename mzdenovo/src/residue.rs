use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{nominal_mass::NominalMass, peptide::Peptide};

/// The location class of a position in a peptide, used to select which subset
/// of the alphabet is allowed at that position.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum SequenceLocation {
    /// Any interior position
    #[default]
    Anywhere,
    /// The N terminus of a peptide
    PeptideNTerm,
    /// The N terminus of the whole protein
    ProteinNTerm,
    /// The C terminus of a peptide
    PeptideCTerm,
    /// The C terminus of the whole protein
    ProteinCTerm,
}

impl std::fmt::Display for SequenceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Anywhere => "anywhere",
                Self::PeptideNTerm => "peptide N terminus",
                Self::ProteinNTerm => "protein N terminus",
                Self::PeptideCTerm => "peptide C terminus",
                Self::ProteinCTerm => "protein C terminus",
            }
        )
    }
}

/// A single residue: one letter symbol, exact monoisotopic residue mass, the
/// quantized nominal mass derived from it, and a prior probability of
/// occurrence used as edge weight by downstream consumers.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Residue {
    symbol: char,
    nominal_mass: NominalMass,
    mass: OrderedFloat<f64>,
    probability: OrderedFloat<f64>,
}

impl Residue {
    /// Create a residue, quantizing the exact mass to its nominal mass.
    pub fn new(symbol: char, mass: f64, probability: f64) -> Self {
        Self {
            symbol,
            nominal_mass: NominalMass::from_mass(mass),
            mass: mass.into(),
            probability: probability.into(),
        }
    }

    /// The one letter symbol.
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// The quantized nominal mass.
    pub const fn nominal_mass(&self) -> NominalMass {
        self.nominal_mass
    }

    /// The exact monoisotopic residue mass.
    pub const fn mass(&self) -> f64 {
        self.mass.0
    }

    /// The prior probability of occurrence.
    pub const fn probability(&self) -> f64 {
        self.probability.0
    }
}

impl std::fmt::Display for Residue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// An alphabet of residues with an ordered subset per location class. The
/// `Anywhere` list defines the canonical residue order and indexing, the
/// terminal lists default to the same residues but can be replaced, for
/// example to admit modified residues only at a protein terminus.
///
/// The alphabet also carries the four cleavage score constants that the graph
/// applies when an enzyme is configured.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ResidueAlphabet {
    anywhere: Vec<Residue>,
    peptide_n_term: Vec<Residue>,
    protein_n_term: Vec<Residue>,
    peptide_c_term: Vec<Residue>,
    protein_c_term: Vec<Residue>,
    peptide_cleavage_credit: i32,
    peptide_cleavage_penalty: i32,
    neighboring_cleavage_credit: i32,
    neighboring_cleavage_penalty: i32,
}

impl ResidueAlphabet {
    /// Create an alphabet from the given residues, with every location
    /// initially admitting the full list and all cleavage scores zero.
    pub fn new(residues: Vec<Residue>) -> Self {
        Self {
            peptide_n_term: residues.clone(),
            protein_n_term: residues.clone(),
            peptide_c_term: residues.clone(),
            protein_c_term: residues.clone(),
            anywhere: residues,
            peptide_cleavage_credit: 0,
            peptide_cleavage_penalty: 0,
            neighboring_cleavage_credit: 0,
            neighboring_cleavage_penalty: 0,
        }
    }

    /// The alphabet of the 20 standard amino acids with uniform priors.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_RESIDUES
                .iter()
                .map(|&(symbol, mass)| Residue::new(symbol, mass, 0.05))
                .collect(),
        )
    }

    /// Replace the residue subset for one location class. Replacing
    /// `Anywhere` also redefines the canonical indexing.
    #[must_use]
    pub fn with_residues_for(mut self, location: SequenceLocation, residues: Vec<Residue>) -> Self {
        match location {
            SequenceLocation::Anywhere => self.anywhere = residues,
            SequenceLocation::PeptideNTerm => self.peptide_n_term = residues,
            SequenceLocation::ProteinNTerm => self.protein_n_term = residues,
            SequenceLocation::PeptideCTerm => self.peptide_c_term = residues,
            SequenceLocation::ProteinCTerm => self.protein_c_term = residues,
        }
        self
    }

    /// Set the cleavage scores, the `(credit, penalty)` applied to the
    /// peptide terminal residue and to the neighboring flank residue.
    #[must_use]
    pub const fn with_cleavage_scores(
        mut self,
        peptide: (i32, i32),
        neighboring: (i32, i32),
    ) -> Self {
        self.peptide_cleavage_credit = peptide.0;
        self.peptide_cleavage_penalty = peptide.1;
        self.neighboring_cleavage_credit = neighboring.0;
        self.neighboring_cleavage_penalty = neighboring.1;
        self
    }

    /// The ordered residue subset allowed at the given location.
    pub fn residues_for(&self, location: SequenceLocation) -> &[Residue] {
        match location {
            SequenceLocation::Anywhere => &self.anywhere,
            SequenceLocation::PeptideNTerm => &self.peptide_n_term,
            SequenceLocation::ProteinNTerm => &self.protein_n_term,
            SequenceLocation::PeptideCTerm => &self.peptide_c_term,
            SequenceLocation::ProteinCTerm => &self.protein_c_term,
        }
    }

    /// All residues of the alphabet in canonical order: the `Anywhere` list
    /// first, followed by any residues admitted only at a terminus, in
    /// location order. This is the order [`index_of`](Self::index_of)
    /// indexes into.
    pub fn canonical_residues(&self) -> impl Iterator<Item = &Residue> {
        let lists = [
            &self.anywhere,
            &self.peptide_n_term,
            &self.protein_n_term,
            &self.peptide_c_term,
            &self.protein_c_term,
        ];
        lists.into_iter().enumerate().flat_map(move |(i, list)| {
            list.iter().filter(move |residue| {
                lists[..i]
                    .iter()
                    .all(|earlier| !earlier.iter().any(|r| r.symbol() == residue.symbol()))
            })
        })
    }

    /// The canonical index of a residue, by symbol. Residues in the
    /// `Anywhere` list keep their list position, terminal only residues are
    /// indexed after them.
    /// # Panics
    /// If the residue is not part of any location subset of the alphabet.
    pub fn index_of(&self, residue: &Residue) -> usize {
        self.canonical_residues()
            .position(|r| r.symbol() == residue.symbol())
            .unwrap_or_else(|| panic!("Residue {residue} is not part of the alphabet"))
    }

    /// Find a residue by symbol in the `Anywhere` list.
    pub fn residue(&self, symbol: char) -> Option<&Residue> {
        self.anywhere.iter().find(|r| r.symbol() == symbol)
    }

    /// Parse a peptide from one letter symbols, `None` if any symbol is not
    /// part of the alphabet.
    pub fn peptide(&self, sequence: &str) -> Option<Peptide> {
        sequence
            .chars()
            .map(|symbol| self.residue(symbol).copied())
            .collect()
    }

    /// The score credit for a peptide terminal residue the enzyme can cleave.
    pub const fn peptide_cleavage_credit(&self) -> i32 {
        self.peptide_cleavage_credit
    }

    /// The score penalty for a peptide terminal residue the enzyme cannot cleave.
    pub const fn peptide_cleavage_penalty(&self) -> i32 {
        self.peptide_cleavage_penalty
    }

    /// The score credit for a cleavable (or absent) flanking residue.
    pub const fn neighboring_cleavage_credit(&self) -> i32 {
        self.neighboring_cleavage_credit
    }

    /// The score penalty for a non cleavable flanking residue.
    pub const fn neighboring_cleavage_penalty(&self) -> i32 {
        self.neighboring_cleavage_penalty
    }
}

/// The monoisotopic residue masses of the 20 standard amino acids.
const STANDARD_RESIDUES: &[(char, f64)] = &[
    ('G', 57.021_46),
    ('A', 71.037_11),
    ('S', 87.032_03),
    ('P', 97.052_76),
    ('V', 99.068_41),
    ('T', 101.047_68),
    ('C', 103.009_19),
    ('L', 113.084_06),
    ('I', 113.084_06),
    ('N', 114.042_93),
    ('D', 115.026_94),
    ('Q', 128.058_58),
    ('K', 128.094_96),
    ('E', 129.042_59),
    ('M', 131.040_49),
    ('H', 137.058_91),
    ('F', 147.068_41),
    ('R', 156.101_11),
    ('Y', 163.063_33),
    ('W', 186.079_31),
];

#[cfg(test)]
mod tests {
    use super::{Residue, ResidueAlphabet, SequenceLocation};
    use crate::nominal_mass::NominalMass;

    #[test]
    fn standard_alphabet() {
        let alphabet = ResidueAlphabet::standard();
        assert_eq!(alphabet.residues_for(SequenceLocation::Anywhere).len(), 20);
        let lysine = alphabet.residue('K').copied().unwrap();
        assert_eq!(lysine.nominal_mass(), NominalMass::new(128));
        assert_eq!(alphabet.index_of(&lysine), 12);
    }

    #[test]
    fn terminal_subsets() {
        let alphabet = ResidueAlphabet::standard().with_residues_for(
            SequenceLocation::ProteinNTerm,
            vec![Residue::new('A', 71.037_11, 1.0)],
        );
        assert_eq!(
            alphabet.residues_for(SequenceLocation::ProteinNTerm).len(),
            1
        );
        assert_eq!(
            alphabet.residues_for(SequenceLocation::PeptideNTerm).len(),
            20
        );
    }

    #[test]
    fn terminal_only_residues_index_after_the_alphabet() {
        let pyroglutamate = Residue::new('q', 111.032_03, 0.01);
        let alphabet = ResidueAlphabet::standard().with_residues_for(
            SequenceLocation::ProteinNTerm,
            vec![Residue::new('A', 71.037_11, 0.05), pyroglutamate],
        );
        // The Anywhere residues keep their positions, the modified residue
        // only admitted at the protein N terminus comes after them
        assert_eq!(alphabet.index_of(alphabet.residue('K').unwrap()), 12);
        assert_eq!(alphabet.index_of(&pyroglutamate), 20);
        assert_eq!(alphabet.canonical_residues().count(), 21);
    }

    #[test]
    fn parse_peptide() {
        let alphabet = ResidueAlphabet::standard();
        let peptide = alphabet.peptide("ACK").unwrap();
        assert_eq!(peptide.len(), 3);
        assert_eq!(peptide.to_string(), "ACK");
        assert!(alphabet.peptide("AXZ").is_none());
    }
}

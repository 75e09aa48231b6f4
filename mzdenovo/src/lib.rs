#![doc = include_str!("../README.md")]

#[cfg(test)]
use serde_json as _;

/// The enzyme specificity rule consumed by the graph
pub mod enzyme;
/// The generic de novo graph contract, node keys and edges
pub mod graph;
/// The core: construction and querying of the quantized mass graph
pub mod mass_graph;
/// Quantized masses and the shared quantization constants
pub mod nominal_mass;
/// Candidate peptides and annotations with protein flanks
pub mod peptide;
/// Residues, location subsets and the residue alphabet
pub mod residue;
/// The spectral scorer contract
pub mod scored_spectrum;
/// Parent mass tolerances
pub mod tolerance;

/// A subset of the types and traits that are envisioned to be used the most,
/// importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::enzyme::Enzyme;
    pub use crate::graph::{DeNovoGraph, Edge, GraphNode, INVALID_SCORE};
    pub use crate::mass_graph::{GraphSettings, MassGraph};
    pub use crate::nominal_mass::NominalMass;
    pub use crate::peptide::{Annotation, Peptide};
    pub use crate::residue::{Residue, ResidueAlphabet, SequenceLocation};
    pub use crate::scored_spectrum::ScoredSpectrum;
    pub use crate::tolerance::Tolerance;
}

use std::hash::Hash;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    peptide::{Annotation, Peptide},
    residue::ResidueAlphabet,
};

/// The sentinel returned by the sequence scorers when the candidate mass does
/// not match the graph sink. Callers must check for this value, it is the
/// failure channel instead of an error type.
pub const INVALID_SCORE: i32 = i32::MIN;

/// A key type usable as a de novo graph node. Node identity and iteration
/// order are fully determined by `Eq`/`Ord` on the key.
pub trait GraphNode: Copy + Eq + Ord + Hash + std::fmt::Debug {}

impl<T: Copy + Eq + Ord + Hash + std::fmt::Debug> GraphNode for T {}

/// A directed edge into a node, one residue extension of a partial sequence.
/// Parallel edges between the same node pair are kept, distinct residues
/// sharing a nominal mass stay distinguishable.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Edge<N> {
    /// The node this edge extends from
    pub previous: N,
    /// The canonical index of the residue in the alphabet
    pub residue_index: usize,
    /// The exact mass of the residue
    pub residue_mass: OrderedFloat<f64>,
    /// The prior probability of the residue
    pub probability: OrderedFloat<f64>,
    /// The spectral support score for this transition
    pub score: i32,
}

/// The read only contract of a fully constructed de novo search graph over an
/// arbitrary node key. The graph is immutable once built, all operations are
/// pure queries and safe for concurrent use.
pub trait DeNovoGraph<N: GraphNode> {
    /// The zero mass start node.
    fn source(&self) -> N;

    /// The sink node at the total peptide mass.
    fn sink(&self) -> N;

    /// The source and all intermediate nodes in ascending order, the
    /// canonical iteration order of the graph. The sink is not included.
    /// Intermediate nodes are not guaranteed to be reachable from the source.
    fn intermediate_nodes(&self) -> &[N];

    /// The complement of a node relative to the sink. Total, defined for any
    /// node value, not just graph members.
    fn complement(&self, node: N) -> N;

    /// The edges into a node in insertion order.
    /// # Panics
    /// If the node is not part of the graph.
    fn edges_into(&self, node: N) -> &[Edge<N>];

    /// The spectral score of a node, zero for source and sink.
    /// # Panics
    /// If the node is not part of the graph.
    fn node_score(&self, node: N) -> i32;

    /// Whether the graph anchors its source at the C terminus.
    fn is_reverse(&self) -> bool;

    /// The residue alphabet the graph was built over.
    fn alphabet(&self) -> &ResidueAlphabet;

    /// Score a fully formed candidate peptide against the graph, walking it
    /// from the source end. Returns [`INVALID_SCORE`] when the summed nominal
    /// mass does not equal the sink mass or when the walk steps outside the
    /// node set.
    fn score_peptide(&self, peptide: &Peptide) -> i32;

    /// Score an annotated candidate, [`score_peptide`](Self::score_peptide)
    /// plus the neighboring cleavage credit or penalty for the flank on the
    /// enzyme's cleavage side. A missing flank counts as cleavable.
    fn score_annotation(&self, annotation: &Annotation) -> i32;
}

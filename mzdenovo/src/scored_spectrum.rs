/// Spectral evidence for a single spectrum, already reduced to integer scores
/// over node pairs and transitions. The graph never inspects peaks itself, it
/// only asks this collaborator.
///
/// Implementations must be safe for concurrent reads for the built graph to
/// be shareable across threads.
pub trait ScoredSpectrum<N> {
    /// The direction of the main ion series, `true` anchors the graph source
    /// at the N terminus (forward search), `false` at the C terminus.
    fn main_ion_direction(&self) -> bool;

    /// The spectral score of an ordered node pair, a node and its complement.
    /// The caller is responsible for passing the pair in the order matching
    /// the search direction.
    fn node_score(&self, a: N, b: N) -> i32;

    /// The spectral support for the transition into `destination` from
    /// `source` by a residue of the given exact mass.
    fn edge_score(&self, destination: N, source: N, residue_mass: f64) -> i32;
}

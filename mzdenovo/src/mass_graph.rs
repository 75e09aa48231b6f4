use std::collections::HashMap;

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    enzyme::Enzyme,
    graph::{DeNovoGraph, Edge, INVALID_SCORE},
    nominal_mass::{NominalMass, WATER_MASS},
    peptide::{Annotation, Peptide},
    residue::{Residue, ResidueAlphabet, SequenceLocation},
    scored_spectrum::ScoredSpectrum,
    tolerance::Tolerance,
};

/// Construction options for a [`MassGraph`]: whether the peptide is allowed
/// to sit at a protein terminus on either end, which widens the residue
/// subset used for the terminal transitions.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct GraphSettings {
    /// Use the protein N terminal residue subset instead of the peptide one
    pub use_protein_n_term: bool,
    /// Use the protein C terminal residue subset instead of the peptide one
    pub use_protein_c_term: bool,
}

/// A scored de novo search graph over quantized masses, built in one pass for
/// a single spectrum and parent mass and immutable afterwards.
///
/// Every node is an achievable cumulative nominal mass, every edge one
/// residue extension. The node set is derived during construction: a node
/// exists iff some edge targets it, plus the source and sink which always
/// exist. Intermediate nodes are not guaranteed to be reachable from the
/// source, the downstream path search has to tolerate dead entries rather
/// than treat them as corruption.
#[derive(Debug)]
pub struct MassGraph<'a, S> {
    alphabet: &'a ResidueAlphabet,
    enzyme: Option<&'a Enzyme>,
    scorer: &'a S,
    parent_mass_tolerance: Tolerance,
    forward: bool,
    source: NominalMass,
    sink: NominalMass,
    nodes: Vec<NominalMass>,
    edges: HashMap<NominalMass, Vec<Edge<NominalMass>>>,
    node_scores: HashMap<NominalMass, i32>,
}

impl<'a, S: ScoredSpectrum<NominalMass>> MassGraph<'a, S> {
    /// Build the full graph for one spectrum.
    ///
    /// The search direction is taken from the scorer's main ion direction.
    /// The parent mass tolerance is carried for interface symmetry with the
    /// upstream collaborators, the quantized construction itself is exact. A
    /// parent mass too small to admit any residue yields a degenerate graph
    /// without source adjacent edges, not an error.
    pub fn new(
        alphabet: &'a ResidueAlphabet,
        parent_mass: f64,
        parent_mass_tolerance: Tolerance,
        enzyme: Option<&'a Enzyme>,
        scorer: &'a S,
        settings: GraphSettings,
    ) -> Self {
        let forward = scorer.main_ion_direction();
        let source = NominalMass::ZERO;
        let sink = NominalMass::from_mass(parent_mass - WATER_MASS);

        let mut edges = HashMap::new();
        edges.insert(source, Vec::new());

        // Transitions out of the source use the terminus the search is
        // anchored at: the N terminal subset for a forward search, the C
        // terminal subset for a reverse one.
        let source_location = if forward {
            if settings.use_protein_n_term {
                SequenceLocation::ProteinNTerm
            } else {
                SequenceLocation::PeptideNTerm
            }
        } else if settings.use_protein_c_term {
            SequenceLocation::ProteinCTerm
        } else {
            SequenceLocation::PeptideCTerm
        };
        make_forward_edges(
            &mut edges,
            alphabet,
            scorer,
            sink,
            source,
            alphabet.residues_for(source_location),
        );

        // Interior transitions start from every mass below the sink, whether
        // or not anything reaches that mass. This deliberately admits
        // unreachable nodes.
        let anywhere = alphabet.residues_for(SequenceLocation::Anywhere);
        for mass in 1..sink.value() {
            make_forward_edges(
                &mut edges,
                alphabet,
                scorer,
                sink,
                NominalMass::new(mass),
                anywhere,
            );
        }

        // The canonical node order: source plus every edge target, ascending.
        let nodes: Vec<NominalMass> = edges.keys().copied().sorted().collect();

        // Transitions into the sink use the opposite terminus from the
        // source end, restricted to predecessors the forward passes created.
        let sink_location = if forward {
            if settings.use_protein_c_term {
                SequenceLocation::ProteinCTerm
            } else {
                SequenceLocation::PeptideCTerm
            }
        } else if settings.use_protein_n_term {
            SequenceLocation::ProteinNTerm
        } else {
            SequenceLocation::PeptideNTerm
        };
        let sink_edges = alphabet
            .residues_for(sink_location)
            .iter()
            .filter_map(|residue| {
                let previous = sink - residue.nominal_mass();
                edges.contains_key(&previous).then(|| Edge {
                    previous,
                    residue_index: alphabet.index_of(residue),
                    residue_mass: residue.mass().into(),
                    probability: residue.probability().into(),
                    score: scorer.edge_score(sink, previous, residue.mass()),
                })
            })
            .collect();
        edges.insert(sink, sink_edges);

        // Source and sink are pinned to zero, every other node is scored
        // from the spectral evidence for the node and its complement, in the
        // argument order matching the ion direction.
        let mut node_scores = HashMap::with_capacity(nodes.len() + 1);
        node_scores.insert(source, 0);
        node_scores.insert(sink, 0);
        for &node in &nodes {
            if node == source {
                continue;
            }
            let complement = node.complement(sink);
            let score = if forward {
                scorer.node_score(node, complement)
            } else {
                scorer.node_score(complement, node)
            };
            node_scores.insert(node, score);
        }

        Self {
            alphabet,
            enzyme,
            scorer,
            parent_mass_tolerance,
            forward,
            source,
            sink,
            nodes,
            edges,
            node_scores,
        }
    }

    /// The enzyme the graph applies cleavage scores for, if any.
    pub const fn enzyme(&self) -> Option<&'a Enzyme> {
        self.enzyme
    }

    /// The parent mass tolerance the graph was constructed with.
    pub const fn parent_mass_tolerance(&self) -> Tolerance {
        self.parent_mass_tolerance
    }
}

#[cfg(feature = "rayon")]
impl<'a, S: ScoredSpectrum<NominalMass> + Sync> MassGraph<'a, S> {
    /// Build one independent graph per spectrum in parallel. The graphs
    /// share no mutable state, only the borrowed collaborators.
    pub fn build_batch(
        alphabet: &'a ResidueAlphabet,
        parent_mass_tolerance: Tolerance,
        enzyme: Option<&'a Enzyme>,
        settings: GraphSettings,
        spectra: &'a [(S, f64)],
    ) -> Vec<Self> {
        spectra
            .par_iter()
            .map(|(scorer, parent_mass)| {
                Self::new(
                    alphabet,
                    *parent_mass,
                    parent_mass_tolerance,
                    enzyme,
                    scorer,
                    settings,
                )
            })
            .collect()
    }
}

/// Create the edges from one node to all nodes one residue heavier, strictly
/// below the sink. Destination entries are created on first reference.
fn make_forward_edges<S: ScoredSpectrum<NominalMass>>(
    edges: &mut HashMap<NominalMass, Vec<Edge<NominalMass>>>,
    alphabet: &ResidueAlphabet,
    scorer: &S,
    sink: NominalMass,
    current: NominalMass,
    residues: &[Residue],
) {
    for residue in residues {
        let next = current + residue.nominal_mass();
        if next >= sink {
            continue;
        }
        edges.entry(next).or_default().push(Edge {
            previous: current,
            residue_index: alphabet.index_of(residue),
            residue_mass: residue.mass().into(),
            probability: residue.probability().into(),
            score: scorer.edge_score(next, current, residue.mass()),
        });
    }
}

impl<S: ScoredSpectrum<NominalMass>> DeNovoGraph<NominalMass> for MassGraph<'_, S> {
    fn source(&self) -> NominalMass {
        self.source
    }

    fn sink(&self) -> NominalMass {
        self.sink
    }

    fn intermediate_nodes(&self) -> &[NominalMass] {
        &self.nodes
    }

    fn complement(&self, node: NominalMass) -> NominalMass {
        node.complement(self.sink)
    }

    fn edges_into(&self, node: NominalMass) -> &[Edge<NominalMass>] {
        self.edges
            .get(&node)
            .unwrap_or_else(|| panic!("Node {node} is not part of the de novo graph"))
    }

    fn node_score(&self, node: NominalMass) -> i32 {
        *self
            .node_scores
            .get(&node)
            .unwrap_or_else(|| panic!("Node {node} is not part of the de novo graph"))
    }

    fn is_reverse(&self) -> bool {
        !self.forward
    }

    fn alphabet(&self) -> &ResidueAlphabet {
        self.alphabet
    }

    fn score_peptide(&self, peptide: &Peptide) -> i32 {
        let mut score = 0;
        let mut previous = self.source;
        let mut mass = NominalMass::ZERO;
        for step in 0..peptide.len().saturating_sub(1) {
            // The walk starts at the source end: left to right for a forward
            // search, right to left for a reverse one.
            let residue = if self.forward {
                &peptide[step]
            } else {
                &peptide[peptide.len() - 1 - step]
            };
            mass += residue.nominal_mass();
            // Only the first transition contributes: the cursor never leaves
            // the source more than once, so the gate closes after one step.
            // Later steps skip the retrieval entirely, a candidate drifting
            // off the node set must end in the sentinel, not a panic.
            if previous == self.source {
                let node = mass;
                let Some(&node_score) = self.node_scores.get(&node) else {
                    // A first step outside the node set scores as a mismatch
                    return INVALID_SCORE;
                };
                let mut edge_score = self.scorer.edge_score(node, previous, residue.mass());
                if let Some(enzyme) = self.enzyme {
                    edge_score += if enzyme.is_cleavable(residue) {
                        self.alphabet.peptide_cleavage_credit()
                    } else {
                        self.alphabet.peptide_cleavage_penalty()
                    };
                }
                score += node_score + edge_score;
                previous = node;
            }
        }
        if let Some(residue) = if self.forward {
            peptide.last()
        } else {
            peptide.first()
        } {
            mass += residue.nominal_mass();
        }

        if mass == self.sink { score } else { INVALID_SCORE }
    }

    fn score_annotation(&self, annotation: &Annotation) -> i32 {
        let score = self.score_peptide(&annotation.peptide);
        if score == INVALID_SCORE {
            return score;
        }
        self.enzyme.map_or(score, |enzyme| {
            let neighboring = if enzyme.cleaves_c_terminal_side() {
                annotation.previous.as_ref()
            } else {
                annotation.next.as_ref()
            };
            // A missing flank means the peptide abuts a protein terminus,
            // which counts as a valid cleavage site.
            score
                + if neighboring.is_none_or(|residue| enzyme.is_cleavable(residue)) {
                    self.alphabet.neighboring_cleavage_credit()
                } else {
                    self.alphabet.neighboring_cleavage_penalty()
                }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphSettings, MassGraph};
    use crate::{
        graph::DeNovoGraph,
        nominal_mass::{MASS_SCALER, NominalMass, WATER_MASS},
        residue::ResidueAlphabet,
        scored_spectrum::ScoredSpectrum,
        tolerance::Tolerance,
    };

    struct FlatSpectrum {
        forward: bool,
    }

    impl ScoredSpectrum<NominalMass> for FlatSpectrum {
        fn main_ion_direction(&self) -> bool {
            self.forward
        }
        fn node_score(&self, _a: NominalMass, _b: NominalMass) -> i32 {
            1
        }
        fn edge_score(&self, _d: NominalMass, _s: NominalMass, _m: f64) -> i32 {
            1
        }
    }

    #[test]
    fn degenerate_parent_mass() {
        // A parent mass below the lightest residue yields a valid graph
        // where the source has no outgoing edges at all.
        let alphabet = ResidueAlphabet::standard();
        let scorer = FlatSpectrum { forward: true };
        let parent_mass = 40.0 / MASS_SCALER + WATER_MASS;
        let graph = MassGraph::new(
            &alphabet,
            parent_mass,
            Tolerance::default(),
            None,
            &scorer,
            GraphSettings::default(),
        );
        assert_eq!(graph.sink(), NominalMass::new(40));
        assert_eq!(graph.intermediate_nodes(), [NominalMass::ZERO]);
        assert!(graph.edges_into(graph.sink()).is_empty());
    }

    #[test]
    fn source_and_sink_scores_are_zero() {
        let alphabet = ResidueAlphabet::standard();
        let scorer = FlatSpectrum { forward: true };
        let parent_mass = 300.0 / MASS_SCALER + WATER_MASS;
        let graph = MassGraph::new(
            &alphabet,
            parent_mass,
            Tolerance::default(),
            None,
            &scorer,
            GraphSettings::default(),
        );
        assert_eq!(graph.node_score(graph.source()), 0);
        assert_eq!(graph.node_score(graph.sink()), 0);
        // Every other node got the flat spectral score
        for &node in graph.intermediate_nodes() {
            if node != graph.source() {
                assert_eq!(graph.node_score(node), 1);
            }
        }
    }

    #[test]
    fn edges_are_strictly_increasing() {
        let alphabet = ResidueAlphabet::standard();
        let scorer = FlatSpectrum { forward: true };
        let parent_mass = 500.0 / MASS_SCALER + WATER_MASS;
        let graph = MassGraph::new(
            &alphabet,
            parent_mass,
            Tolerance::default(),
            None,
            &scorer,
            GraphSettings::default(),
        );
        let anywhere =
            alphabet.residues_for(crate::residue::SequenceLocation::Anywhere);
        for &node in graph.intermediate_nodes() {
            assert!(node < graph.sink());
            for edge in graph.edges_into(node) {
                assert!(edge.previous < node);
                assert_eq!(
                    node,
                    edge.previous + anywhere[edge.residue_index].nominal_mass()
                );
            }
        }
        for edge in graph.edges_into(graph.sink()) {
            assert!(edge.previous < graph.sink());
            assert!(graph.intermediate_nodes().contains(&edge.previous));
        }
    }

    #[test]
    fn unreachable_nodes_exist() {
        // Mass 58 is a generic edge target (1 + G) but mass 1 is itself not
        // a node, so 58 sits in the node set without being reachable from
        // the source. Consumers have to tolerate such entries.
        let alphabet = ResidueAlphabet::standard();
        let scorer = FlatSpectrum { forward: true };
        let parent_mass = 500.0 / MASS_SCALER + WATER_MASS;
        let graph = MassGraph::new(
            &alphabet,
            parent_mass,
            Tolerance::default(),
            None,
            &scorer,
            GraphSettings::default(),
        );
        assert!(graph.intermediate_nodes().contains(&NominalMass::new(58)));
        let incoming = graph.edges_into(NominalMass::new(58));
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].previous, NominalMass::new(1));
        assert!(!graph.intermediate_nodes().contains(&NominalMass::new(1)));
    }
}

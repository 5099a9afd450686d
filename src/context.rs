use crate::bipartite::{Bipartite, Vertex};
use crate::classify::classify_perfect;
use crate::decomposition::{Decomposition, Region};
use crate::digraph::Digraph;
use crate::error::{Error, Result};
use crate::matching::{HopcroftKarp, Matching, MatchingOracle};
use crate::persistence::{EdgeClass, Persistence};
use crate::scc::{SccOracle, Tarjan};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/**
 * Stores the working data for classifying the edges of a bipartite graph by
 * their persistence across all of its maximum matchings.
 *
 * The maximum matching is computed once, when the context is created, and
 * every classification run uses that matching. The result does not depend on
 * which maximum matching the oracle picked. 'partition' keeps no state of its
 * own, so a context can be re-run, or shared between threads.
 */
#[derive(Debug, Clone)]
pub struct Context<V: Vertex, S = Tarjan> {
    graph: Bipartite<V>,
    matching: Matching<V>,
    scc_oracle: S,
}

impl<V: Vertex, S> fmt::Display for Context<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Context {{")?;
        if let Some(label) = self.graph.label() {
            writeln!(f, "    label: {}", label)?;
        }
        writeln!(f, "    num_left: {}", self.graph.left().len())?;
        writeln!(f, "    num_right: {}", self.graph.right().len())?;
        writeln!(f, "    num_edges: {}", self.graph.num_edges())?;
        writeln!(f, "    matching_size: {}", self.matching.len())?;
        writeln!(f, "    perfect: {}", self.is_perfect())?;
        writeln!(f, "    matching: {}", self.matching)?;
        writeln!(f, "}}")
    }
}

impl<V: Vertex> Context<V> {
    /// Uses Hopcroft–Karp for the matching, and Tarjan for the components.
    pub fn new(graph: Bipartite<V>) -> Result<Self> {
        Self::with_oracles(graph, &HopcroftKarp, Tarjan)
    }
}

impl<V: Vertex, S> Context<V, S> {
    pub fn graph(&self) -> &Bipartite<V> {
        &self.graph
    }

    pub fn matching(&self) -> &Matching<V> {
        &self.matching
    }

    pub fn is_perfect(&self) -> bool {
        self.matching.is_perfect(&self.graph)
    }

    /// Dulmage–Mendelsohn sets, or 'None' when the matching is perfect.
    pub fn decomposition(&self) -> Result<Option<Decomposition<V>>> {
        if self.is_perfect() {
            return Ok(None);
        }
        Decomposition::new(&self.graph, &self.matching).map(Some)
    }
}

impl<V: Vertex, S: SccOracle<V>> Context<V, S> {
    pub fn with_oracles<M>(graph: Bipartite<V>, matching_oracle: &M, scc_oracle: S) -> Result<Self>
    where
        M: MatchingOracle<V> + ?Sized,
    {
        let matching = matching_oracle.maximum_matching(&graph)?;
        debug!(
            "matching of size {} for {} vertices, {} edges",
            matching.len(),
            graph.num_vertices(),
            graph.num_edges()
        );
        Ok(Self {
            graph,
            matching,
            scc_oracle,
        })
    }

    /**
     *  Partition the set of edges into the three persistence classes.
     *
     *  Algorithm:
     *   1) if the matching is perfect, classify the whole graph from the
     *      components of its oriented digraph, and stop;
     *   2) otherwise, decompose the vertices into the labelled and unlabelled
     *      regions, and classify every edge touching a labelled region from
     *      the regions of its endpoints;
     *   3) the unlabelled vertices induce a subgraph that the matching covers
     *      perfectly, so classify that as in 1); and
     *   4) merge, and check that every edge was classified exactly once.
     */
    pub fn partition(&self) -> Result<Persistence<V>> {
        let persistence = if self.is_perfect() {
            debug!("perfect matching, classifying the whole graph");
            self.partition_perfect(&self.graph, &self.matching)?
        } else {
            let decomposition = Decomposition::new(&self.graph, &self.matching)?;
            let labelled = partition_labelled(&self.graph, &decomposition)?;

            let residual = decomposition.residual(&self.graph);
            let matching = self.matching.restrict(&residual);
            if !matching.is_perfect(&residual) {
                let unmatched = residual.vertices().filter(|v| !matching.is_matched(v)).count();
                return Err(Error::ImperfectResidual(unmatched));
            }
            debug!(
                "{} labelled edges, {} residual edges",
                labelled.len(),
                residual.num_edges()
            );

            labelled.merge(self.partition_perfect(&residual, &matching)?)?
        };

        persistence.verify(&self.graph)?;
        info!(
            "{} edges: {} one-persistent, {} weakly-persistent, {} zero-persistent",
            persistence.len(),
            persistence.one().len(),
            persistence.weak().len(),
            persistence.zero().len()
        );
        Ok(persistence)
    }

    fn partition_perfect(
        &self,
        graph: &Bipartite<V>,
        matching: &Matching<V>,
    ) -> Result<Persistence<V>> {
        let digraph = Digraph::orient(graph, matching)?;
        let components = self.scc_oracle.strongly_connected_components(&digraph)?;
        debug!(
            "{} components over {} vertices",
            components.len(),
            digraph.num_vertices()
        );
        classify_perfect(graph, matching, &components)
    }
}

/**
 *  Classifies every edge with a labelled endpoint, from the regions of its
 *  endpoints alone:
 *
 *   - A_left -- B_right, and B_left -- A_right: weakly-persistent;
 *   - B_left -- B_right, B_left -- C_right, C_left -- B_right: zero-persistent.
 *
 *  C_left -- C_right edges are left for the residual subgraph. No other
 *  combination occurs for a maximum matching.
 */
fn partition_labelled<V: Vertex>(
    graph: &Bipartite<V>,
    decomposition: &Decomposition<V>,
) -> Result<Persistence<V>> {
    let region = |v: &V| {
        decomposition
            .region(v)
            .map(|(_, r)| r)
            .ok_or_else(|| Error::unknown(v))
    };

    let mut persistence = Persistence::new();
    for (u, v) in graph.edges() {
        let class = match (region(u)?, region(v)?) {
            (Region::A, Region::B) | (Region::B, Region::A) => EdgeClass::Weak,
            (Region::B, Region::B) | (Region::B, Region::C) | (Region::C, Region::B) => {
                EdgeClass::Zero
            }
            (Region::C, Region::C) => continue,
            _ => return Err(Error::unclassified(u, v)),
        };
        persistence.insert(class, u.clone(), v.clone())?;
    }
    Ok(persistence)
}

/**
 *  Classifies the edges of the graph given by a symmetric adjacency map and
 *  its two sides, with the default oracles.
 */
pub fn classify<V: Vertex>(
    adjacency: BTreeMap<V, BTreeSet<V>>,
    left: BTreeSet<V>,
    right: BTreeSet<V>,
) -> Result<Persistence<V>> {
    let graph = Bipartite::from_parts(adjacency, left, right)?;
    Context::new(graph)?.partition()
}

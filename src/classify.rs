use crate::bipartite::{Bipartite, Vertex};
use crate::error::{Error, Result};
use crate::matching::Matching;
use crate::persistence::{EdgeClass, Persistence};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Fewest vertices on a simple alternating cycle of a bipartite graph.
pub const MIN_CYCLE: usize = 4;

/**
 *  Classifies the edges of a graph from the strongly connected components of
 *  its oriented digraph (see 'Digraph::orient').
 *
 *  Algorithm:
 *   1) edges inside a component of at least 'MIN_CYCLE' vertices lie on an
 *      alternating cycle, so are weakly-persistent;
 *   2) the remaining matched edges are one-persistent;
 *   3) everything else is zero-persistent.
 *
 *  The components must partition the graph's vertices.
 */
pub fn classify_perfect<V: Vertex>(
    graph: &Bipartite<V>,
    matching: &Matching<V>,
    components: &[BTreeSet<V>],
) -> Result<Persistence<V>> {
    check_components(graph, components)?;
    let mut persistence = Persistence::new();

    for component in components.iter().filter(|c| c.len() >= MIN_CYCLE) {
        trace!("alternating component of {} vertices", component.len());
        for u in component.iter().filter(|u| graph.contains_left_node(u)) {
            for v in graph.neighbours(u)?.iter().filter(|v| component.contains(*v)) {
                persistence.insert(EdgeClass::Weak, u.clone(), v.clone())?;
            }
        }
    }

    for (u, v) in matching.pairs().filter(|(u, v)| graph.contains_edge(u, v)) {
        if !persistence.contains(u, v) {
            persistence.insert(EdgeClass::One, u.clone(), v.clone())?;
        }
    }

    for (u, v) in graph.edges() {
        if !persistence.contains(u, v) {
            persistence.insert(EdgeClass::Zero, u.clone(), v.clone())?;
        }
    }

    debug!(
        "classified {} edges: {} one, {} weak, {} zero",
        persistence.len(),
        persistence.one().len(),
        persistence.weak().len(),
        persistence.zero().len()
    );
    Ok(persistence)
}

fn check_components<V: Vertex>(graph: &Bipartite<V>, components: &[BTreeSet<V>]) -> Result<()> {
    let mut component_of: BTreeMap<&V, usize> = BTreeMap::new();
    for (i, component) in components.iter().enumerate() {
        for v in component.iter() {
            if !graph.contains_node(v) {
                return Err(Error::InvalidComponents(format!("unknown vertex {:?}", v)));
            }
            if component_of.insert(v, i).is_some() {
                return Err(Error::InvalidComponents(format!(
                    "{:?} is in more than one component",
                    v
                )));
            }
        }
    }
    if let Some(v) = graph.vertices().find(|v| !component_of.contains_key(v)) {
        return Err(Error::InvalidComponents(format!("{:?} is in no component", v)));
    }
    Ok(())
}

use crate::bipartite::{Bipartite, Side, Vertex};
use crate::error::Result;
use crate::matching::Matching;
use log::trace;
use std::collections::BTreeSet;

/// Layer parity of an alternating BFS. Even layers lie on the anchor side,
/// odd layers on the opposite side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn flip(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }
}

/**
 *  Returns every vertex reachable by an alternating path that starts at an
 *  unmatched vertex of the anchor side.
 *
 *  Even-layer vertices step across each of their edges except their own
 *  matching edge; odd-layer vertices step only across their matching edge.
 *  Each vertex is visited at most once, so this runs in O(V + E).
 */
pub fn label<V: Vertex>(
    graph: &Bipartite<V>,
    matching: &Matching<V>,
    anchor: Side,
) -> Result<BTreeSet<V>> {
    let mut visited: BTreeSet<V> = graph
        .side(anchor)
        .iter()
        .filter(|v| !matching.is_matched(v))
        .cloned()
        .collect();
    let mut layer: Vec<V> = visited.iter().cloned().collect();
    let mut parity = Parity::Even;
    let mut depth = 0;

    while !layer.is_empty() {
        trace!("{:?} layer {} ({:?}): {:?}", anchor, depth, parity, layer);
        let mut next = Vec::new();

        for u in layer.iter() {
            match parity {
                Parity::Even => {
                    let mate = matching.mate(u);
                    for v in graph.neighbours(u)?.iter() {
                        if Some(v) != mate && visited.insert(v.clone()) {
                            next.push(v.clone());
                        }
                    }
                }
                Parity::Odd => {
                    if let Some(v) = matching.mate(u) {
                        if visited.insert(v.clone()) {
                            next.push(v.clone());
                        }
                    }
                }
            }
        }

        layer = next;
        parity = parity.flip();
        depth += 1;
    }

    Ok(visited)
}

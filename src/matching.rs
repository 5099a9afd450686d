use crate::bipartite::{Bipartite, Side, Vertex};
use crate::error::{Error, OracleError, Result};
use log::{debug, trace, warn};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/**
 * A matching of a bipartite graph: a set of pairwise vertex-disjoint edges.
 *
 * Stored both as 'left -> right' pairs, and as the symmetric mate map, so
 * that 'mate(mate(v)) == v' wherever defined. Only constructed by checking
 * the pairs against the graph, and never mutated afterwards.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching<V: Vertex> {
    pairs: BTreeMap<V, V>,
    mates: BTreeMap<V, V>,
}

impl<V: Vertex> fmt::Display for Matching<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (u, v)) in self.pairs.iter().enumerate() {
            let sep = if i > 0 { ", " } else { "" };
            write!(f, "{}{:?}: {:?}", sep, u, v)?;
        }
        write!(f, "}}")
    }
}

impl<V: Vertex> Default for Matching<V> {
    fn default() -> Self {
        Self {
            pairs: BTreeMap::new(),
            mates: BTreeMap::new(),
        }
    }
}

impl<V: Vertex> Matching<V> {
    /**
     *  Checks each pair against the graph: both endpoints must be known, on
     *  opposite sides, joined by an edge, and matched at most once. Pairs may
     *  be given in either orientation.
     */
    pub fn from_pairs<I>(graph: &Bipartite<V>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut matching = Self::default();
        for (a, b) in pairs {
            let (u, v) = match (graph.side_of(&a)?, graph.side_of(&b)?) {
                (Side::Left, Side::Right) => (a, b),
                (Side::Right, Side::Left) => (b, a),
                _ => {
                    return Err(Error::InvalidMatching(format!(
                        "{:?} and {:?} are on the same side",
                        a, b
                    )))
                }
            };
            if !graph.contains_edge(&u, &v) {
                return Err(Error::InvalidMatching(format!(
                    "{:?} -- {:?} is not an edge",
                    u, v
                )));
            }
            for x in [&u, &v] {
                if matching.mates.contains_key(x) {
                    return Err(Error::InvalidMatching(format!(
                        "{:?} is matched twice",
                        x
                    )));
                }
            }
            matching.mates.insert(u.clone(), v.clone());
            matching.mates.insert(v.clone(), u.clone());
            matching.pairs.insert(u, v);
        }
        Ok(matching)
    }

    pub fn mate(&self, node: &V) -> Option<&V> {
        self.mates.get(node)
    }

    pub fn is_matched(&self, node: &V) -> bool {
        self.mates.contains_key(node)
    }

    /// Whether '(left, right)' is one of the matched pairs.
    pub fn contains(&self, node_left: &V, node_right: &V) -> bool {
        self.pairs.get(node_left) == Some(node_right)
    }

    /// Matched pairs, as '(left, right)'.
    pub fn pairs(&self) -> impl Iterator<Item = (&V, &V)> {
        self.pairs.iter()
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether every vertex of the graph is matched.
    pub fn is_perfect(&self, graph: &Bipartite<V>) -> bool {
        graph.vertices().all(|v| self.is_matched(v))
    }

    /**
     *  Keeps only the pairs that are edges of the given (sub)graph. Used to
     *  carry the matching over to an induced subgraph.
     */
    pub fn restrict(&self, graph: &Bipartite<V>) -> Self {
        let mut matching = Self::default();
        for (u, v) in self.pairs.iter().filter(|(u, v)| graph.contains_edge(u, v)) {
            matching.mates.insert(u.clone(), v.clone());
            matching.mates.insert(v.clone(), u.clone());
            matching.pairs.insert(u.clone(), v.clone());
        }
        matching
    }
}

/// Computes one maximum-cardinality matching; any tie-break is allowed.
pub trait MatchingOracle<V: Vertex> {
    fn maximum_matching(
        &self,
        graph: &Bipartite<V>,
    ) -> std::result::Result<Matching<V>, OracleError>;
}

impl<V, F> MatchingOracle<V> for F
where
    V: Vertex,
    F: Fn(&Bipartite<V>) -> std::result::Result<Matching<V>, OracleError>,
{
    fn maximum_matching(
        &self,
        graph: &Bipartite<V>,
    ) -> std::result::Result<Matching<V>, OracleError> {
        self(graph)
    }
}

/**
 * Hopcroft–Karp maximum matching.
 *
 * Algorithm:
 *  1) BFS from all free left vertices, layering the left vertices by their
 *     alternating distance;
 *  2) DFS from each free left vertex, only following edges into the next
 *     layer, and flipping every augmenting path that is found;
 *  3) repeat until the BFS finds no free right vertex.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HopcroftKarp;

const FREE: usize = usize::MAX;
const UNREACHED: usize = usize::MAX;

struct SearchState {
    pair_left: Vec<usize>,
    pair_right: Vec<usize>,
    dist: Vec<usize>,
}

impl SearchState {
    fn layer(&mut self, neighbours: &[Vec<usize>]) -> bool {
        let mut queue = VecDeque::new();
        for (u, d) in self.dist.iter_mut().enumerate() {
            if self.pair_left[u] == FREE {
                *d = 0;
                queue.push_back(u);
            } else {
                *d = UNREACHED;
            }
        }

        let mut found = false;
        while let Some(u) = queue.pop_front() {
            for &v in neighbours[u].iter() {
                let w = self.pair_right[v];
                if w == FREE {
                    found = true;
                } else if self.dist[w] == UNREACHED {
                    self.dist[w] = self.dist[u] + 1;
                    queue.push_back(w);
                }
            }
        }
        found
    }

    /**
     *  Searches for an augmenting path from the free left vertex 'root',
     *  following only edges into the next layer, and flips it if found.
     *
     *  The search keeps its own stack of '(left vertex, next neighbour)'
     *  entries, plus the right vertex used to step down from each entry, so
     *  path length is not limited by the native stack. A left vertex that
     *  leads nowhere is dropped from the layering for the rest of the phase.
     */
    fn augment(&mut self, root: usize, neighbours: &[Vec<usize>]) -> bool {
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        let mut via: Vec<usize> = Vec::new();

        while let Some(&(u, pos)) = stack.last() {
            if pos == neighbours[u].len() {
                self.dist[u] = UNREACHED;
                stack.pop();
                via.pop();
                continue;
            }
            let top = stack.len() - 1;
            stack[top].1 += 1;

            let v = neighbours[u][pos];
            let w = self.pair_right[v];
            if w == FREE {
                via.push(v);
                for (&(x, _), &y) in stack.iter().zip(via.iter()) {
                    self.pair_left[x] = y;
                    self.pair_right[y] = x;
                }
                return true;
            }
            if self.dist[w] == self.dist[u] + 1 {
                via.push(v);
                stack.push((w, 0));
            }
        }
        false
    }
}

impl<V: Vertex> MatchingOracle<V> for HopcroftKarp {
    fn maximum_matching(
        &self,
        graph: &Bipartite<V>,
    ) -> std::result::Result<Matching<V>, OracleError> {
        let lefts: Vec<&V> = graph.left().iter().collect();
        let rights: Vec<&V> = graph.right().iter().collect();
        let index: BTreeMap<&V, usize> = rights.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let mut neighbours: Vec<Vec<usize>> = Vec::with_capacity(lefts.len());
        for u in lefts.iter() {
            let ns = graph.neighbours(u)?;
            neighbours.push(ns.iter().filter_map(|v| index.get(v).copied()).collect());
        }

        let mut state = SearchState {
            pair_left: vec![FREE; lefts.len()],
            pair_right: vec![FREE; rights.len()],
            dist: vec![UNREACHED; lefts.len()],
        };

        let mut phases = 0;
        while state.layer(&neighbours) {
            phases += 1;
            let mut augmented = 0;
            for u in 0..lefts.len() {
                if state.pair_left[u] == FREE && state.augment(u, &neighbours) {
                    augmented += 1;
                }
            }
            trace!("phase {}: {} augmenting paths", phases, augmented);
            if augmented == 0 {
                break;
            }
        }

        let pairs = state
            .pair_left
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != FREE)
            .map(|(u, &v)| (lefts[u].clone(), rights[v].clone()));
        let matching = Matching::from_pairs(graph, pairs)?;

        if matching.is_empty() && graph.num_edges() > 0 {
            warn!("empty matching for a graph with {} edges", graph.num_edges());
        }
        debug!(
            "maximum matching of size {} after {} phases",
            matching.len(),
            phases
        );
        Ok(matching)
    }
}

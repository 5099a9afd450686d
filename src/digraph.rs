use crate::bipartite::{Bipartite, Vertex};
use crate::error::{Error, Result};
use crate::matching::Matching;
use log::trace;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/**
 * Directed graph with one successor set per vertex.
 *
 * Vertices must be declared before any arc that touches them is inserted, so
 * every successor lookup of a declared vertex succeeds, even for vertices
 * that end up with no outgoing arcs.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digraph<V: Vertex> {
    arcs: BTreeMap<V, BTreeSet<V>>,
    num_arcs: usize,
}

impl<V: Vertex> fmt::Display for Digraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Digraph {{")?;
        for (u, vs) in self.arcs.iter() {
            writeln!(f, "    {:?} -> {:?}", u, vs)?;
        }
        writeln!(f, "}}")
    }
}

impl<V: Vertex> Default for Digraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Digraph<V> {
    pub fn new() -> Self {
        Self {
            arcs: BTreeMap::new(),
            num_arcs: 0,
        }
    }

    /**
     *  Orients every edge of the bipartite graph using the matching: matched
     *  edges point left-to-right, all other edges right-to-left. Any directed
     *  cycle is then an alternating cycle of the matching.
     */
    pub fn orient(graph: &Bipartite<V>, matching: &Matching<V>) -> Result<Self> {
        let mut digraph = Self::new();
        for v in graph.vertices() {
            digraph.add_vertex(v.clone());
        }

        for (u, v) in graph.edges() {
            if matching.contains(u, v) {
                digraph.add_arc(u.clone(), v.clone())?;
            } else {
                digraph.add_arc(v.clone(), u.clone())?;
            }
        }
        debug_assert_eq!(digraph.num_arcs(), graph.num_edges());
        trace!(
            "oriented {} vertices, {} arcs",
            digraph.num_vertices(),
            digraph.num_arcs()
        );

        Ok(digraph)
    }

    pub fn add_vertex(&mut self, node: V) -> &mut Self {
        self.arcs.entry(node).or_default();
        self
    }

    /// Inserts the arc 'src -> dst'; both endpoints must already be declared.
    pub fn add_arc(&mut self, src: V, dst: V) -> Result<&mut Self> {
        if !self.arcs.contains_key(&dst) {
            return Err(Error::unknown(&dst));
        }
        let successors = self
            .arcs
            .get_mut(&src)
            .ok_or_else(|| Error::unknown(&src))?;
        if successors.insert(dst) {
            self.num_arcs += 1;
        }
        Ok(self)
    }

    pub fn successors(&self, node: &V) -> Result<&BTreeSet<V>> {
        self.arcs.get(node).ok_or_else(|| Error::unknown(node))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.arcs.keys()
    }

    pub fn num_vertices(&self) -> usize {
        self.arcs.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.num_arcs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_arc<V: Vertex>(d: &Digraph<V>, src: V, dst: V) -> bool {
        d.successors(&src).unwrap().contains(&dst)
    }

    #[test]
    fn one_arc_per_edge() {
        let g = Bipartite::from_edges([("a", "1"), ("a", "2"), ("b", "1"), ("b", "2")]).unwrap();
        let m = Matching::from_pairs(&g, [("a", "1"), ("b", "2")]).unwrap();
        let d = Digraph::orient(&g, &m).unwrap();

        assert_eq!(d.num_arcs(), g.num_edges());
        assert!(has_arc(&d, "a", "1"));
        assert!(has_arc(&d, "b", "2"));
        assert!(has_arc(&d, "2", "a"));
        assert!(has_arc(&d, "1", "b"));
        assert!(!has_arc(&d, "1", "a"));
    }

    #[test]
    fn vertices_without_outgoing_arcs_are_declared() {
        // "2" is unmatched, so its only edge points away from it; "b" has
        // only an incoming arc.
        let g = Bipartite::from_edges([("a", "1"), ("b", "2")]).unwrap();
        let m = Matching::from_pairs(&g, [("a", "1")]).unwrap();
        let d = Digraph::orient(&g, &m).unwrap();

        assert_eq!(d.num_vertices(), 4);
        assert!(d.successors(&"b").unwrap().is_empty());
        assert_eq!(d.successors(&"2").unwrap(), &BTreeSet::from(["b"]));
        assert!(d.successors(&"1").unwrap().is_empty());
    }

    #[test]
    fn undeclared_vertices_are_rejected() {
        let mut d = Digraph::new();
        d.add_vertex(1);
        assert!(matches!(d.add_arc(1, 2), Err(Error::UnknownVertex(_))));
        assert!(matches!(d.add_arc(2, 1), Err(Error::UnknownVertex(_))));
        assert!(matches!(d.successors(&3), Err(Error::UnknownVertex(_))));
        assert_eq!(d.num_arcs(), 0);
    }

    #[test]
    fn high_degree_vertex_keeps_every_arc() {
        // Right vertex 0 is shared by every left vertex; only 1 -- 0 is
        // matched, so 0 points back to all the others.
        let n: u32 = 20_000;
        let g = Bipartite::from_edges((1..=n).map(|i| (i, 0))).unwrap();
        let m = Matching::from_pairs(&g, [(1, 0)]).unwrap();
        let d = Digraph::orient(&g, &m).unwrap();

        assert_eq!(d.num_arcs(), g.num_edges());
        assert_eq!(d.successors(&0).unwrap().len(), n as usize - 1);
        assert!(has_arc(&d, 1, 0));
    }

    #[test]
    fn repeated_arcs_are_counted_once() {
        let mut d = Digraph::new();
        d.add_vertex("u").add_vertex("v");
        d.add_arc("u", "v").unwrap().add_arc("u", "v").unwrap();
        assert_eq!(d.num_arcs(), 1);
    }
}

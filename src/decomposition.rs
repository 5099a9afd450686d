use crate::bipartite::{Bipartite, Side, Vertex};
use crate::error::{Error, Result};
use crate::labelling::label;
use crate::matching::Matching;
use log::debug;
use std::collections::BTreeSet;
use std::fmt;

/// Region of a vertex in the Dulmage–Mendelsohn decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Reached from a free vertex of the own side ('star' label)
    A,
    /// Reached from a free vertex of the opposite side ('circle' label)
    B,
    /// Unlabelled
    C,
}

/**
 * Dulmage–Mendelsohn partition of each side of a bipartite graph, derived
 * from alternating reachability with respect to a maximum matching.
 *
 *  - 'a_left', 'b_right': reachable from the free left vertices;
 *  - 'b_left', 'a_right': reachable from the free right vertices;
 *  - 'c_left', 'c_right': everything else.
 *
 * The sets of each side are pairwise disjoint and cover the side. Does not
 * depend on which maximum matching was used.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition<V: Vertex> {
    pub a_left: BTreeSet<V>,
    pub b_left: BTreeSet<V>,
    pub c_left: BTreeSet<V>,
    pub a_right: BTreeSet<V>,
    pub b_right: BTreeSet<V>,
    pub c_right: BTreeSet<V>,
}

impl<V: Vertex> fmt::Display for Decomposition<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Decomposition {{")?;
        writeln!(f, "    a_left: {:?}", self.a_left)?;
        writeln!(f, "    b_left: {:?}", self.b_left)?;
        writeln!(f, "    c_left: {:?}", self.c_left)?;
        writeln!(f, "    a_right: {:?}", self.a_right)?;
        writeln!(f, "    b_right: {:?}", self.b_right)?;
        writeln!(f, "    c_right: {:?}", self.c_right)?;
        writeln!(f, "}}")
    }
}

impl<V: Vertex> Decomposition<V> {
    /**
     *  Labels the graph twice, once from the free left vertices and once from
     *  the free right vertices. A vertex carrying both labels lies on an
     *  augmenting path, so the matching was not maximum.
     */
    pub fn new(graph: &Bipartite<V>, matching: &Matching<V>) -> Result<Self> {
        let star = label(graph, matching, Side::Left)?;
        let circle = label(graph, matching, Side::Right)?;

        if let Some(v) = star.intersection(&circle).next() {
            return Err(Error::NotMaximum(format!("{:?}", v)));
        }

        let (a_left, b_right): (BTreeSet<V>, BTreeSet<V>) =
            star.into_iter().partition(|v| graph.contains_left_node(v));
        let (b_left, a_right): (BTreeSet<V>, BTreeSet<V>) =
            circle.into_iter().partition(|v| graph.contains_left_node(v));

        let c_left = graph
            .left()
            .iter()
            .filter(|v| !a_left.contains(*v) && !b_left.contains(*v))
            .cloned()
            .collect();
        let c_right = graph
            .right()
            .iter()
            .filter(|v| !a_right.contains(*v) && !b_right.contains(*v))
            .cloned()
            .collect();

        let decomposition = Self {
            a_left,
            b_left,
            c_left,
            a_right,
            b_right,
            c_right,
        };
        debug!(
            "decomposition: left {}/{}/{}, right {}/{}/{}",
            decomposition.a_left.len(),
            decomposition.b_left.len(),
            decomposition.c_left.len(),
            decomposition.a_right.len(),
            decomposition.b_right.len(),
            decomposition.c_right.len()
        );
        Ok(decomposition)
    }

    pub fn region(&self, node: &V) -> Option<(Side, Region)> {
        let regions = [
            (&self.a_left, Side::Left, Region::A),
            (&self.b_left, Side::Left, Region::B),
            (&self.c_left, Side::Left, Region::C),
            (&self.a_right, Side::Right, Region::A),
            (&self.b_right, Side::Right, Region::B),
            (&self.c_right, Side::Right, Region::C),
        ];
        regions
            .into_iter()
            .find(|(set, _, _)| set.contains(node))
            .map(|(_, side, region)| (side, region))
    }

    /// Subgraph induced by the unlabelled vertices.
    pub fn residual(&self, graph: &Bipartite<V>) -> Bipartite<V> {
        graph.induced(&self.c_left, &self.c_right)
    }
}

use crate::error::{Error, Result};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Anything that can name a vertex: cloneable, totally ordered, printable.
pub trait Vertex: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> Vertex for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/**
 * Undirected bipartite graph, stored as a symmetric adjacency map together
 * with the two side sets.
 *
 * Every vertex of the graph has an adjacency entry (possibly empty), and is on
 * exactly one side. Edges only ever join a left vertex to a right vertex. The
 * builder functions maintain these invariants, and 'from_parts' checks them
 * for externally-assembled adjacency maps.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartite<V: Vertex> {
    label: Option<String>,
    adjacency: BTreeMap<V, BTreeSet<V>>,
    left: BTreeSet<V>,
    right: BTreeSet<V>,
}

impl<V: Vertex> fmt::Display for Bipartite<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Bipartite {{")?;
        if let Some(label) = &self.label {
            writeln!(f, "    label: {}", label)?;
        }
        writeln!(f, "    left: {:?}", self.left)?;
        writeln!(f, "    right: {:?}", self.right)?;
        writeln!(f, "    edges {{")?;
        for (u, v) in self.edges() {
            writeln!(f, "        {:?} -- {:?}", u, v)?;
        }
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}

impl<V: Vertex> Default for Bipartite<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Bipartite<V> {
    pub fn new() -> Self {
        Self {
            label: None,
            adjacency: BTreeMap::new(),
            left: BTreeSet::new(),
            right: BTreeSet::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /**
     *  Validates an externally-assembled adjacency map and side sets: the
     *  sides must be disjoint and cover exactly the vertices of the map, and
     *  the map must be symmetric with every edge crossing between the sides.
     */
    pub fn from_parts(
        adjacency: BTreeMap<V, BTreeSet<V>>,
        left: BTreeSet<V>,
        right: BTreeSet<V>,
    ) -> Result<Self> {
        if let Some(v) = left.intersection(&right).next() {
            return Err(Error::SideOverlap(format!("{:?}", v)));
        }
        if let Some(v) = left.iter().chain(right.iter()).find(|v| !adjacency.contains_key(*v)) {
            return Err(Error::unknown(v));
        }

        for (u, neighbours) in adjacency.iter() {
            let u_left = if left.contains(u) {
                true
            } else if right.contains(u) {
                false
            } else {
                return Err(Error::Unassigned(format!("{:?}", u)));
            };

            for v in neighbours.iter() {
                let back = adjacency.get(v).ok_or_else(|| Error::unknown(v))?;
                if !left.contains(v) && !right.contains(v) {
                    return Err(Error::Unassigned(format!("{:?}", v)));
                }
                if u_left == left.contains(v) {
                    return Err(Error::same_side(u, v));
                }
                if !back.contains(u) {
                    return Err(Error::Asymmetric {
                        u: format!("{:?}", u),
                        v: format!("{:?}", v),
                    });
                }
            }
        }

        Ok(Self {
            label: None,
            adjacency,
            left,
            right,
        })
    }

    /// Builds a graph from '(left, right)' edge pairs.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    // -- PUBLIC NODES FUNCTIONS -- //

    pub fn contains_left_node(&self, node: &V) -> bool {
        self.left.contains(node)
    }

    pub fn add_left_node(&mut self, node: V) -> Result<&mut Self> {
        if self.contains_right_node(&node) {
            return Err(Error::SideOverlap(format!("{:?}", node)));
        }
        if self.left.insert(node.clone()) {
            self.adjacency.entry(node).or_default();
        }
        Ok(self)
    }

    pub fn contains_right_node(&self, node: &V) -> bool {
        self.right.contains(node)
    }

    pub fn add_right_node(&mut self, node: V) -> Result<&mut Self> {
        if self.contains_left_node(&node) {
            return Err(Error::SideOverlap(format!("{:?}", node)));
        }
        if self.right.insert(node.clone()) {
            self.adjacency.entry(node).or_default();
        }
        Ok(self)
    }

    pub fn contains_node(&self, node: &V) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn side_of(&self, node: &V) -> Result<Side> {
        if self.left.contains(node) {
            Ok(Side::Left)
        } else if self.right.contains(node) {
            Ok(Side::Right)
        } else {
            Err(Error::unknown(node))
        }
    }

    pub fn side(&self, side: Side) -> &BTreeSet<V> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn left(&self) -> &BTreeSet<V> {
        &self.left
    }

    pub fn right(&self) -> &BTreeSet<V> {
        &self.right
    }

    pub fn neighbours(&self, node: &V) -> Result<&BTreeSet<V>> {
        self.adjacency.get(node).ok_or_else(|| Error::unknown(node))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    // -- PUBLIC EDGES FUNCTIONS -- //

    pub fn contains_edge(&self, node_left: &V, node_right: &V) -> bool {
        self.left.contains(node_left)
            && self
                .adjacency
                .get(node_left)
                .is_some_and(|ns| ns.contains(node_right))
    }

    /**
     *  Inserts the edge, adding either endpoint to its side when not yet
     *  present. Fails if either endpoint is already on the other side.
     */
    pub fn add_edge(&mut self, node_left: V, node_right: V) -> Result<&mut Self> {
        if self.contains_right_node(&node_left) || self.contains_left_node(&node_right) {
            return Err(Error::same_side(&node_left, &node_right));
        }
        if node_left == node_right {
            return Err(Error::same_side(&node_left, &node_right));
        }
        self.add_left_node(node_left.clone())?;
        self.add_right_node(node_right.clone())?;

        self.adjacency
            .entry(node_left.clone())
            .or_default()
            .insert(node_right.clone());
        self.adjacency.entry(node_right).or_default().insert(node_left);
        Ok(self)
    }

    /// All edges, as '(left, right)' pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.left.iter().flat_map(move |u| {
            self.adjacency
                .get(u)
                .into_iter()
                .flat_map(move |ns| ns.iter().map(move |v| (u, v)))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.left
            .iter()
            .filter_map(|u| self.adjacency.get(u))
            .map(|ns| ns.len())
            .sum()
    }

    /**
     *  Returns the subgraph induced by the given vertices. Vertices that are
     *  not in this graph, or are given for the wrong side, are ignored.
     */
    pub fn induced(&self, left: &BTreeSet<V>, right: &BTreeSet<V>) -> Self {
        let left: BTreeSet<V> = left.intersection(&self.left).cloned().collect();
        let right: BTreeSet<V> = right.intersection(&self.right).cloned().collect();

        let mut adjacency = BTreeMap::new();
        for (keep, other) in [(&left, &right), (&right, &left)] {
            for u in keep.iter() {
                let ns: BTreeSet<V> = self
                    .adjacency
                    .get(u)
                    .map(|ns| ns.intersection(other).cloned().collect())
                    .unwrap_or_default();
                adjacency.insert(u.clone(), ns);
            }
        }
        trace!(
            "induced subgraph: {} left, {} right, {} vertices",
            left.len(),
            right.len(),
            adjacency.len()
        );

        Self {
            label: self.label.clone(),
            adjacency,
            left,
            right,
        }
    }
}

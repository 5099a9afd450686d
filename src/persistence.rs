use crate::bipartite::{Bipartite, Vertex};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// How an edge behaves across all maximum matchings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EdgeClass {
    /// In every maximum matching
    One,
    /// In some, but not all, maximum matchings
    Weak,
    /// In no maximum matching
    Zero,
}

impl EdgeClass {
    pub const ALL: [EdgeClass; 3] = [EdgeClass::One, EdgeClass::Weak, EdgeClass::Zero];
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EdgeClass::One => "one-persistent",
            EdgeClass::Weak => "weakly-persistent",
            EdgeClass::Zero => "zero-persistent",
        };
        write!(f, "{}", name)
    }
}

/**
 * The three persistence classes of a graph's edges, as '(left, right)' pairs.
 *
 * Only ever grows: edges are inserted into exactly one class, and partial
 * results are combined with 'merge', which refuses to classify an edge twice.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persistence<V: Vertex> {
    #[serde(rename = "one_persistent")]
    one: BTreeSet<(V, V)>,
    #[serde(rename = "weakly_persistent")]
    weak: BTreeSet<(V, V)>,
    #[serde(rename = "zero_persistent")]
    zero: BTreeSet<(V, V)>,
}

impl<V: Vertex> fmt::Display for Persistence<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Persistence {{")?;
        for class in EdgeClass::ALL {
            let edges = self.edges(class);
            writeln!(f, "    {} ({}) {{", class, edges.len())?;
            for (u, v) in edges.iter() {
                writeln!(f, "        {:?} -- {:?}", u, v)?;
            }
            writeln!(f, "    }}")?;
        }
        writeln!(f, "}}")
    }
}

impl<V: Vertex> Default for Persistence<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Persistence<V> {
    pub fn new() -> Self {
        Self {
            one: BTreeSet::new(),
            weak: BTreeSet::new(),
            zero: BTreeSet::new(),
        }
    }

    pub fn edges(&self, class: EdgeClass) -> &BTreeSet<(V, V)> {
        match class {
            EdgeClass::One => &self.one,
            EdgeClass::Weak => &self.weak,
            EdgeClass::Zero => &self.zero,
        }
    }

    /// One-persistent edges (E1).
    pub fn one(&self) -> &BTreeSet<(V, V)> {
        &self.one
    }

    /// Weakly-persistent edges (Ew).
    pub fn weak(&self) -> &BTreeSet<(V, V)> {
        &self.weak
    }

    /// Zero-persistent edges (E0).
    pub fn zero(&self) -> &BTreeSet<(V, V)> {
        &self.zero
    }

    pub fn class_of(&self, node_left: &V, node_right: &V) -> Option<EdgeClass> {
        let edge = (node_left.clone(), node_right.clone());
        EdgeClass::ALL
            .into_iter()
            .find(|class| self.edges(*class).contains(&edge))
    }

    pub fn contains(&self, node_left: &V, node_right: &V) -> bool {
        self.class_of(node_left, node_right).is_some()
    }

    /// Total number of classified edges.
    pub fn len(&self) -> usize {
        self.one.len() + self.weak.len() + self.zero.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, class: EdgeClass, node_left: V, node_right: V) -> Result<&mut Self> {
        if self.contains(&node_left, &node_right) {
            return Err(Error::overlap(&node_left, &node_right));
        }
        let edges = match class {
            EdgeClass::One => &mut self.one,
            EdgeClass::Weak => &mut self.weak,
            EdgeClass::Zero => &mut self.zero,
        };
        edges.insert((node_left, node_right));
        Ok(self)
    }

    /// Union of two classifications over disjoint edge sets.
    pub fn merge(mut self, other: Self) -> Result<Self> {
        for class in EdgeClass::ALL {
            let edges = match class {
                EdgeClass::One => &other.one,
                EdgeClass::Weak => &other.weak,
                EdgeClass::Zero => &other.zero,
            };
            for (u, v) in edges.iter() {
                self.insert(class, u.clone(), v.clone())?;
            }
        }
        Ok(self)
    }

    /**
     *  Checks that the classes partition the graph's edge set exactly: no
     *  edge of the graph missing, and nothing classified that is not an edge.
     */
    pub fn verify(&self, graph: &Bipartite<V>) -> Result<()> {
        for (u, v) in graph.edges() {
            if !self.contains(u, v) {
                return Err(Error::unclassified(u, v));
            }
        }
        if self.len() != graph.num_edges() {
            return Err(Error::Incomplete {
                classified: self.len(),
                expected: graph.num_edges(),
            });
        }
        Ok(())
    }
}

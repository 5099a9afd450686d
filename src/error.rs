//! Error types for the persistence classifier.

use thiserror::Error;

/// Error type produced by a matching or SCC oracle. Propagated unchanged.
pub type OracleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using the crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a graph or classifying its edges.
///
/// Vertices are carried in their `Debug` rendering, so the error type does
/// not depend on the vertex type.
#[derive(Error, Debug)]
pub enum Error {
    /// A vertex was looked up that is not part of the graph
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// An edge joins two vertices on the same side (or a vertex to itself)
    #[error("edge {u} -- {v} joins two vertices on the same side")]
    SameSide {
        /// First endpoint
        u: String,
        /// Second endpoint
        v: String,
    },

    /// The adjacency lists `v` under `u`, but not `u` under `v`
    #[error("adjacency is not symmetric: {u} lists {v}, but not the reverse")]
    Asymmetric {
        /// Vertex whose list contains the edge
        u: String,
        /// Vertex whose list is missing it
        v: String,
    },

    /// A vertex was placed on both sides
    #[error("vertex {0} is on both the left and the right side")]
    SideOverlap(String),

    /// A vertex of the adjacency is on neither side
    #[error("vertex {0} is on neither side")]
    Unassigned(String),

    /// The matching oracle returned something that is not a matching
    #[error("invalid matching: {0}")]
    InvalidMatching(String),

    /// The alternating labels overlap, so the matching has an augmenting path
    #[error("matching is not maximum: {0} is reachable from both sides")]
    NotMaximum(String),

    /// The SCC oracle did not partition the digraph's vertices
    #[error("invalid strongly connected components: {0}")]
    InvalidComponents(String),

    /// The doubly-unlabelled subgraph did not inherit a perfect matching
    #[error("residual subgraph has {0} unmatched vertices")]
    ImperfectResidual(usize),

    /// An edge fell outside every classification rule
    #[error("edge {u} -- {v} was not classified")]
    UnclassifiedEdge {
        /// Left endpoint
        u: String,
        /// Right endpoint
        v: String,
    },

    /// An edge was placed in more than one persistence class
    #[error("edge {u} -- {v} was classified twice")]
    Overlap {
        /// Left endpoint
        u: String,
        /// Right endpoint
        v: String,
    },

    /// The persistence classes do not cover the graph's edge set
    #[error("classified {classified} edges, but the graph has {expected}")]
    Incomplete {
        /// Number of classified edges
        classified: usize,
        /// Number of edges in the graph
        expected: usize,
    },

    /// Error raised by an injected oracle
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl Error {
    pub(crate) fn unknown<V: std::fmt::Debug>(v: &V) -> Self {
        Error::UnknownVertex(format!("{:?}", v))
    }

    pub(crate) fn same_side<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        Error::SameSide {
            u: format!("{:?}", u),
            v: format!("{:?}", v),
        }
    }

    pub(crate) fn unclassified<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        Error::UnclassifiedEdge {
            u: format!("{:?}", u),
            v: format!("{:?}", v),
        }
    }

    pub(crate) fn overlap<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        Error::Overlap {
            u: format!("{:?}", u),
            v: format!("{:?}", v),
        }
    }
}

//! Classifies the edges of a bipartite graph by their persistence across all
//! maximum matchings: one-persistent (in every maximum matching),
//! weakly-persistent (in some), or zero-persistent (in none), without
//! enumerating the matchings.

pub use crate::bipartite::*;
pub use crate::classify::*;
pub use crate::context::*;
pub use crate::decomposition::*;
pub use crate::digraph::*;
pub use crate::error::*;
pub use crate::labelling::*;
pub use crate::matching::*;
pub use crate::persistence::*;
pub use crate::scc::*;

pub mod bipartite;
pub mod classify;
pub mod context;
pub mod decomposition;
pub mod digraph;
pub mod error;
pub mod labelling;
pub mod logger;
pub mod matching;
pub mod persistence;
pub mod scc;

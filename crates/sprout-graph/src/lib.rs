//! Sprout task graphs.
//!
//! A task graph is declared as a list of named nodes, each listing the names
//! it depends on. [`TaskGraph::new`] validates the declaration before anything
//! can run:
//! - names are unique
//! - every dependency names a declared node
//! - the dependency relation is acyclic
//!
//! The payload type is opaque to this crate; the runtime stores its tasks there.

mod error;
mod graph;
mod task_graph;

pub use error::GraphError;
pub use graph::Graph;
pub use task_graph::{NodeDecl, TaskGraph};

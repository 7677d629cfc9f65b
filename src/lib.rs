//! A comparator-ordered graph.
//!
//! Vertices are kept in a sorted singly-linked chain, and each vertex owns an
//! unordered singly-linked chain of its outgoing weighted edges.  Both chains
//! live in slot arenas and are linked by stable keys.  See [`OrderedGraph`].
//!
//! ```
//! use ordgraph::OrderedGraph;
//!
//! let mut graph = OrderedGraph::directed();
//! for v in [1, 2, 3] {
//!     graph.insert_vertex(v);
//! }
//! graph.insert_edge(&1, &2, 1.0);
//! graph.insert_edge(&2, &3, 2.0);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.out_degree(&1), Ok(1));
//! assert!(graph.degree(&1).is_err());
//! ```

pub mod directedness;
pub mod edge_ref;
pub mod error;
pub mod order;
pub mod ordered_graph;
pub mod prelude;
pub mod tracing_support;

mod degree;
mod edge_store;
mod id_vec;
mod vertex_store;

#[cfg(test)]
mod graph_test_support;

pub use directedness::Directedness;
pub use edge_ref::EdgeRef;
pub use error::{AddEdgeResult, GraphError, RemoveEdgeResult};
pub use order::{NaturalOrder, Reversed, VertexOrder};
pub use ordered_graph::OrderedGraph;

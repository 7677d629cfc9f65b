//! Convenience re-exports of the types most callers need.

pub use crate::{
    AddEdgeResult, Directedness, EdgeRef, GraphError, NaturalOrder, OrderedGraph,
    RemoveEdgeResult, Reversed, VertexOrder,
};

/// Errors signalling that the caller broke a precondition of a degree query.
///
/// Expected negative outcomes, such as inserting a vertex that already
/// exists, are not errors; see [`AddEdgeResult`] and [`RemoveEdgeResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An in-degree or out-degree query on an undirected graph.
    #[error("undirected graphs have no {query}; use `degree` instead")]
    DirectedOnly { query: &'static str },
    /// A plain degree query on a directed graph.
    #[error("directed graphs track in-degree and out-degree separately; use `in_degree` or `out_degree` instead")]
    UndirectedOnly,
    /// The queried vertex is not in the graph.
    #[error("vertex {vertex} does not exist")]
    NoSuchVertex { vertex: String },
}

/// Outcome of [`OrderedGraph::insert_edge`](crate::OrderedGraph::insert_edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEdgeResult {
    /// The edge was stored.
    Added,
    /// An edge with the same endpoints and weight already exists.
    AlreadyPresent,
    /// At least one endpoint is not a vertex of the graph.
    MissingEndpoint,
}

impl AddEdgeResult {
    pub fn is_added(self) -> bool {
        self == AddEdgeResult::Added
    }
}

/// Outcome of [`OrderedGraph::delete_edge`](crate::OrderedGraph::delete_edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveEdgeResult {
    /// The edge was removed.
    Removed,
    /// Both endpoints exist but no edge with that weight joins them.
    NotFound,
    /// At least one endpoint is not a vertex of the graph.
    MissingEndpoint,
}

impl RemoveEdgeResult {
    pub fn is_removed(self) -> bool {
        self == RemoveEdgeResult::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::DirectedOnly { query: "in-degree" };
        assert_eq!(
            err.to_string(),
            "undirected graphs have no in-degree; use `degree` instead"
        );
        let err = GraphError::NoSuchVertex {
            vertex: "\"q\"".to_string(),
        };
        assert_eq!(err.to_string(), "vertex \"q\" does not exist");
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(AddEdgeResult::Added.is_added());
        assert!(!AddEdgeResult::AlreadyPresent.is_added());
        assert!(!AddEdgeResult::MissingEndpoint.is_added());
        assert!(RemoveEdgeResult::Removed.is_removed());
        assert!(!RemoveEdgeResult::NotFound.is_removed());
    }
}

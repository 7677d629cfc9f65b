use std::cmp::Ordering;

/// A total ordering over vertex payloads.  The graph keeps its vertex chain
/// sorted under this ordering, and two payloads that compare `Equal` name the
/// same vertex.
///
/// Any `Fn(&V, &V) -> Ordering` is a `VertexOrder<V>`, so a custom
/// ordering can be passed as a closure:
///
/// ```
/// use ordgraph::{Directedness, OrderedGraph};
///
/// let mut graph: OrderedGraph<String, _> = OrderedGraph::with_order(
///     |a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase()),
///     Directedness::Directed,
/// );
/// assert!(graph.insert_vertex("Alpha".to_string()));
/// assert!(!graph.insert_vertex("ALPHA".to_string()));
/// ```
pub trait VertexOrder<V: ?Sized> {
    fn compare(&self, a: &V, b: &V) -> Ordering;
}

/// The payload type's own `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<V: Ord + ?Sized> VertexOrder<V> for NaturalOrder {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<O>(pub O);

impl<V: ?Sized, O: VertexOrder<V>> VertexOrder<V> for Reversed<O> {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<V: ?Sized, F> VertexOrder<V> for F
where
    F: Fn(&V, &V) -> Ordering,
{
    fn compare(&self, a: &V, b: &V) -> Ordering {
        self(a, b)
    }
}

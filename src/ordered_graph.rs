use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Debug},
};

use crate::{
    AddEdgeResult, Directedness, EdgeRef, GraphError, NaturalOrder, RemoveEdgeResult, VertexOrder,
    degree,
    edge_store::{EdgeRecord, EdgeStore, weights_match},
    tracing_support::{debug, debug_span, trace},
    vertex_store::{VertexKey, VertexRecord, VertexStore},
};

/// A graph whose vertices are kept sorted by a [`VertexOrder`] and whose
/// edges carry `f64` weights.
///
/// Vertices are identified by their payload: two payloads that compare
/// `Equal` under the graph's ordering name the same vertex.  Edges are
/// identified by `(from, to, weight)`, so two edges between the same
/// vertices with different weights are distinct.
///
/// An undirected edge is stored as two directed records, one in each
/// endpoint's edge chain, and counts as two towards [`Self::edge_count`].
///
/// # Type Parameters
/// * `V` - The vertex payload
/// * `O` - The ordering strategy, [`NaturalOrder`] unless given explicitly
pub struct OrderedGraph<V, O = NaturalOrder> {
    vertices: VertexStore<V, O>,
    edges: EdgeStore<V>,
    edge_count: usize,
    directedness: Directedness,
}

impl<V: Ord> OrderedGraph<V> {
    /// Creates an empty graph ordered by `V`'s own `Ord`.
    pub fn new(directedness: Directedness) -> Self {
        Self::with_order(NaturalOrder, directedness)
    }

    pub fn directed() -> Self {
        Self::new(Directedness::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Directedness::Undirected)
    }
}

impl<V, O> OrderedGraph<V, O>
where
    O: VertexOrder<V>,
{
    /// Creates an empty graph that orders its vertices with `order`.
    pub fn with_order(order: O, directedness: Directedness) -> Self {
        OrderedGraph {
            vertices: VertexStore::new(order),
            edges: EdgeStore::new(),
            edge_count: 0,
            directedness,
        }
    }

    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    pub fn is_directed(&self) -> bool {
        self.directedness.is_directed()
    }

    pub fn order(&self) -> &O {
        self.vertices.order()
    }

    /// Gets the number of vertices.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Gets the number of stored edge records.  Each undirected edge
    /// accounts for two.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, data: &V) -> bool {
        self.vertices.contains(data)
    }

    // Degrees

    /// Gets the number of edges ending at `data`.  Only defined for directed
    /// graphs.
    pub fn in_degree(&self, data: &V) -> Result<usize, GraphError>
    where
        V: Debug,
    {
        if !self.is_directed() {
            return Err(GraphError::DirectedOnly { query: "in-degree" });
        }
        Ok(self.existing_vertex(data)?.in_deg)
    }

    /// Gets the number of edges starting at `data`.  Only defined for
    /// directed graphs.
    pub fn out_degree(&self, data: &V) -> Result<usize, GraphError>
    where
        V: Debug,
    {
        if !self.is_directed() {
            return Err(GraphError::DirectedOnly {
                query: "out-degree",
            });
        }
        Ok(self.existing_vertex(data)?.out_deg)
    }

    /// Gets the degree of `data` in an undirected graph, reported as
    /// `2 * out + 2 * in` over the primary records touching it, so each
    /// incident edge contributes 2.
    pub fn degree(&self, data: &V) -> Result<usize, GraphError>
    where
        V: Debug,
    {
        if self.is_directed() {
            return Err(GraphError::UndirectedOnly);
        }
        Ok(degree::undirected_degree(self.existing_vertex(data)?))
    }

    fn existing_vertex(&self, data: &V) -> Result<&VertexRecord<V>, GraphError>
    where
        V: Debug,
    {
        self.vertices
            .retrieve(data)
            .map(|key| self.vertices.get(key))
            .ok_or_else(|| GraphError::NoSuchVertex {
                vertex: format!("{data:?}"),
            })
    }

    // Vertices

    /// Inserts a vertex in sorted position.  Returns false, leaving the graph
    /// unchanged, if an equal vertex is already present.
    pub fn insert_vertex(&mut self, data: V) -> bool {
        let _span = debug_span!("insert_vertex").entered();
        let inserted = self.vertices.insert(data).is_some();
        trace!(inserted, size = self.size(), "insert_vertex");
        self.debug_check_counters();
        inserted
    }

    /// Removes a vertex together with every edge leaving or entering it.
    /// Returns false if no such vertex exists.
    pub fn delete_vertex(&mut self, data: &V) -> bool {
        let _span = debug_span!("delete_vertex").entered();
        let Some((key, mut record)) = self.vertices.remove(data) else {
            trace!("delete_vertex: no such vertex");
            return false;
        };

        // Outgoing edges are owned by the removed record.  Incoming edges
        // can only be found by scanning every remaining chain.
        let mut removed = self.edges.drain(&mut record.first_edge);
        let mut cursor = self.vertices.head();
        while let Some(other) = cursor {
            let other_record = self.vertices.get_mut(other);
            removed.extend(
                self.edges
                    .retain(&mut other_record.first_edge, |edge| edge.to != key),
            );
            cursor = other_record.next;
        }

        for edge in &removed {
            degree::edge_removed(&mut self.vertices, edge);
        }
        self.edge_count -= removed.len();
        debug!(
            removed_edges = removed.len(),
            size = self.size(),
            "deleted vertex"
        );
        self.debug_check_counters();
        true
    }

    /// Iterates over the vertices in sorted order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter().map(|(_, record)| &record.data)
    }

    // Edges

    /// Adds an edge of the given weight from `from` to `to`.  In an
    /// undirected graph the reversed record is stored as well, and an
    /// existing edge in either orientation counts as already present.
    pub fn insert_edge(&mut self, from: &V, to: &V, weight: f64) -> AddEdgeResult {
        let _span = debug_span!("insert_edge", weight).entered();
        let (Some(from_key), Some(to_key)) =
            (self.vertices.retrieve(from), self.vertices.retrieve(to))
        else {
            trace!("insert_edge: missing endpoint");
            return AddEdgeResult::MissingEndpoint;
        };

        if self.find_record(from_key, to_key, weight).is_some()
            || (!self.is_directed() && self.find_record(to_key, from_key, weight).is_some())
        {
            trace!("insert_edge: already present");
            return AddEdgeResult::AlreadyPresent;
        }

        self.link_record(from_key, to_key, weight, false);
        if !self.is_directed() {
            self.link_record(to_key, from_key, weight, true);
        }
        degree::edge_added(&mut self.vertices, from_key, to_key);
        self.edge_count += self.directedness.records_per_edge();
        trace!(edge_count = self.edge_count, "insert_edge: added");
        self.debug_check_counters();
        AddEdgeResult::Added
    }

    /// Removes the edge `(from, to, weight)`.  In an undirected graph both
    /// stored records go, and the edge may be named in either orientation.
    pub fn delete_edge(&mut self, from: &V, to: &V, weight: f64) -> RemoveEdgeResult {
        let _span = debug_span!("delete_edge", weight).entered();
        let (Some(from_key), Some(to_key)) =
            (self.vertices.retrieve(from), self.vertices.retrieve(to))
        else {
            trace!("delete_edge: missing endpoint");
            return RemoveEdgeResult::MissingEndpoint;
        };

        if self.find_record(from_key, to_key, weight).is_none() {
            trace!("delete_edge: not found");
            return RemoveEdgeResult::NotFound;
        }

        let removed = self
            .unlink_record(from_key, to_key, weight)
            .expect("edge record vanished between lookup and removal");
        let primary = if self.is_directed() {
            removed
        } else {
            let counterpart = self
                .unlink_record(to_key, from_key, weight)
                .expect("undirected edge is missing its reversed record");
            if removed.mirror { counterpart } else { removed }
        };
        degree::edge_removed(&mut self.vertices, &primary);
        self.edge_count -= self.directedness.records_per_edge();
        trace!(edge_count = self.edge_count, "delete_edge: removed");
        self.debug_check_counters();
        RemoveEdgeResult::Removed
    }

    /// Checks for the edge `(from, to, weight)`.  In an undirected graph
    /// either orientation matches.
    pub fn has_edge(&self, from: &V, to: &V, weight: f64) -> bool {
        match (self.vertices.retrieve(from), self.vertices.retrieve(to)) {
            (Some(from_key), Some(to_key)) => self.find_record(from_key, to_key, weight).is_some(),
            _ => false,
        }
    }

    /// Iterates over every stored edge record, grouped by source vertex in
    /// sorted order.  Within a source, the most recently added edge comes
    /// first.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, V>> + '_ {
        self.vertices
            .iter()
            .flat_map(move |(_, record)| self.edges.iter(record.first_edge))
            .map(move |(_, edge)| self.edge_ref(edge))
    }

    /// Returns every stored edge record ordered by source, then target, under
    /// the graph's ordering, then by weight.
    pub fn edges_sorted(&self) -> Vec<EdgeRef<'_, V>> {
        let order = self.vertices.order();
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_by(|a, b| {
            order
                .compare(a.from, b.from)
                .then_with(|| order.compare(a.to, b.to))
                .then_with(|| a.weight.total_cmp(&b.weight))
        });
        edges
    }

    /// Iterates over the edge records leaving `data`.  Empty if the vertex
    /// does not exist.
    pub fn edges_from(&self, data: &V) -> impl Iterator<Item = EdgeRef<'_, V>> + '_ {
        let head = self
            .vertices
            .retrieve(data)
            .and_then(|key| self.vertices.get(key).first_edge);
        self.edges
            .iter(head)
            .map(move |(_, edge)| self.edge_ref(edge))
    }

    /// Iterates over the distinct vertices reachable from `data` by one edge.
    pub fn successors(&self, data: &V) -> impl Iterator<Item = &V> + '_ {
        let head = self
            .vertices
            .retrieve(data)
            .and_then(|key| self.vertices.get(key).first_edge);
        let mut visited = HashSet::new();
        self.edges.iter(head).filter_map(move |(_, edge)| {
            visited
                .insert(edge.to)
                .then(|| &self.vertices.get(edge.to).data)
        })
    }

    /// Removes all vertices and edges.  The ordering and directedness are
    /// kept.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
        self.edge_count = 0;
    }

    // Traversal marks

    /// Sets the `accessed` mark on a vertex.  Returns false if the vertex
    /// does not exist.
    pub fn mark_accessed(&mut self, data: &V) -> bool {
        self.update_vertex(data, |record| record.accessed = true)
    }

    /// Sets the `processed` mark on a vertex.  Returns false if the vertex
    /// does not exist.
    pub fn mark_processed(&mut self, data: &V) -> bool {
        self.update_vertex(data, |record| record.processed = true)
    }

    pub fn is_accessed(&self, data: &V) -> Option<bool> {
        self.vertices
            .retrieve(data)
            .map(|key| self.vertices.get(key).accessed)
    }

    pub fn is_processed(&self, data: &V) -> Option<bool> {
        self.vertices
            .retrieve(data)
            .map(|key| self.vertices.get(key).processed)
    }

    /// Resets the `accessed` and `processed` marks on every vertex.
    pub fn clear_marks(&mut self) {
        let mut cursor = self.vertices.head();
        while let Some(key) = cursor {
            let record = self.vertices.get_mut(key);
            record.accessed = false;
            record.processed = false;
            cursor = record.next;
        }
    }

    fn update_vertex(&mut self, data: &V, f: impl FnOnce(&mut VertexRecord<V>)) -> bool {
        match self.vertices.retrieve(data) {
            Some(key) => {
                f(self.vertices.get_mut(key));
                true
            }
            None => false,
        }
    }

    // Record helpers

    fn find_record(&self, from: VertexKey<V>, to: VertexKey<V>, weight: f64) -> Option<&EdgeRecord<V>> {
        self.edges
            .find_edge(self.vertices.get(from).first_edge, to, weight)
    }

    fn link_record(&mut self, from: VertexKey<V>, to: VertexKey<V>, weight: f64, mirror: bool) {
        let head = &mut self.vertices.get_mut(from).first_edge;
        self.edges.add_edge(head, from, to, weight, mirror);
    }

    fn unlink_record(
        &mut self,
        from: VertexKey<V>,
        to: VertexKey<V>,
        weight: f64,
    ) -> Option<EdgeRecord<V>> {
        let head = &mut self.vertices.get_mut(from).first_edge;
        self.edges.remove_edge(head, to, weight)
    }

    fn edge_ref<'a>(&'a self, edge: &EdgeRecord<V>) -> EdgeRef<'a, V> {
        EdgeRef {
            from: &self.vertices.get(edge.from).data,
            to: &self.vertices.get(edge.to).data,
            weight: edge.weight,
            mirror: edge.mirror,
        }
    }

    // Consistency

    /// Constant-time counter check run after each mutation.  The full sweep
    /// is [`Self::check_invariants`].
    fn debug_check_counters(&self) {
        #[cfg(not(feature = "unchecked"))]
        {
            debug_assert_eq!(
                self.vertices.len(),
                self.vertices.arena_len(),
                "vertex count is stale"
            );
            debug_assert_eq!(self.edge_count, self.edges.len(), "edge count is stale");
        }
    }

    /// Panics if any internal invariant is broken: vertex order or
    /// uniqueness, counters, dangling edge endpoints, degree bookkeeping, or
    /// the pairing of undirected records.  Costs O(V + E^2 / V), so only
    /// tests call it.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        let order = self.vertices.order();

        let mut chain_len = 0;
        let mut prev: Option<&V> = None;
        for (_, record) in self.vertices.iter() {
            if let Some(prev) = prev {
                assert!(
                    order.compare(prev, &record.data).is_lt(),
                    "vertex chain is not strictly increasing"
                );
            }
            prev = Some(&record.data);
            chain_len += 1;
        }
        assert_eq!(chain_len, self.vertices.len(), "vertex count is stale");
        assert_eq!(
            chain_len,
            self.vertices.arena_len(),
            "vertex arena holds unlinked records"
        );

        let mut degrees: HashMap<VertexKey<V>, (usize, usize)> = HashMap::new();
        let mut record_count = 0;
        for (key, record) in self.vertices.iter() {
            for (_, edge) in self.edges.iter(record.first_edge) {
                record_count += 1;
                assert!(edge.from == key, "edge is filed under the wrong vertex");
                assert!(
                    self.vertices.contains_key(edge.to),
                    "edge points at a deleted vertex"
                );
                if self.is_directed() {
                    assert!(!edge.mirror, "directed graph holds a mirror record");
                } else {
                    let counterparts = self
                        .edges
                        .iter(self.vertices.get(edge.to).first_edge)
                        .filter(|(_, other)| {
                            other.to == edge.from
                                && weights_match(other.weight, edge.weight)
                                && other.mirror != edge.mirror
                        })
                        .count();
                    assert_eq!(counterparts, 1, "undirected edge is not paired");
                }
                if !edge.mirror {
                    degrees.entry(edge.from).or_default().1 += 1;
                    degrees.entry(edge.to).or_default().0 += 1;
                }
            }
        }
        assert_eq!(record_count, self.edge_count, "edge count is stale");
        assert_eq!(
            record_count,
            self.edges.len(),
            "edge arena holds unlinked records"
        );

        for (key, record) in self.vertices.iter() {
            let (in_deg, out_deg) = degrees.get(&key).copied().unwrap_or_default();
            assert_eq!(record.in_deg, in_deg, "in-degree is stale");
            assert_eq!(record.out_deg, out_deg, "out-degree is stale");
        }
    }
}

impl<V, O> Clone for OrderedGraph<V, O>
where
    V: Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        OrderedGraph {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            edge_count: self.edge_count,
            directedness: self.directedness,
        }
    }
}

impl<V, O> Debug for OrderedGraph<V, O>
where
    V: Debug,
    O: VertexOrder<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedGraph")
            .field("directedness", &self.directedness)
            .field(
                "vertices",
                &FormatDebugWith(|f: &mut fmt::Formatter<'_>| {
                    f.debug_list().entries(self.vertices()).finish()
                }),
            )
            .field(
                "edges",
                &FormatDebugWith(|f: &mut fmt::Formatter<'_>| {
                    f.debug_list()
                        .entries(self.edges().filter(|edge| !edge.is_mirror()).map(|edge| {
                            FormatDebugWith(move |f: &mut fmt::Formatter<'_>| {
                                write!(f, "{:?} -> {:?} ({})", edge.from, edge.to, edge.weight)
                            })
                        }))
                        .finish()
                }),
            )
            .finish()
    }
}

/// Adapts a formatting closure to `Debug`.
struct FormatDebugWith<F>(F)
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result;

impl<F> Debug for FormatDebugWith<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.0)(f)
    }
}

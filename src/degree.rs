//! In/out-degree bookkeeping on vertex records.
//!
//! Every logical edge moves exactly one `out_deg` and one `in_deg`.  For an
//! undirected edge that is the primary record; its mirror only provides
//! adjacency from the other end and leaves the counters alone.

use crate::{
    edge_store::EdgeRecord,
    order::VertexOrder,
    vertex_store::{VertexKey, VertexRecord, VertexStore},
};

/// Counts a newly stored logical edge `from -> to`.
pub(crate) fn edge_added<V, O>(vertices: &mut VertexStore<V, O>, from: VertexKey<V>, to: VertexKey<V>)
where
    O: VertexOrder<V>,
{
    vertices.get_mut(from).out_deg += 1;
    vertices.get_mut(to).in_deg += 1;
}

/// Reverses [`edge_added`] for a record that has been unlinked.  Endpoints
/// that are no longer in the store (a vertex being deleted) are skipped, as
/// are mirror records.
pub(crate) fn edge_removed<V, O>(vertices: &mut VertexStore<V, O>, record: &EdgeRecord<V>)
where
    O: VertexOrder<V>,
{
    if record.mirror {
        return;
    }
    if let Some(from) = vertices.try_get_mut(record.from) {
        decrement(&mut from.out_deg, "out-degree");
    }
    if let Some(to) = vertices.try_get_mut(record.to) {
        decrement(&mut to.in_deg, "in-degree");
    }
}

/// The degree the undirected query surface reports for a vertex.
pub(crate) fn undirected_degree<V>(record: &VertexRecord<V>) -> usize {
    record.out_deg * 2 + record.in_deg * 2
}

fn decrement(counter: &mut usize, what: &str) {
    *counter = counter
        .checked_sub(1)
        .unwrap_or_else(|| panic!("{what} counter would go negative"));
}

use crate::{
    id_vec::{IdVec, IdVecKey},
    vertex_store::VertexKey,
};

pub(crate) type EdgeKey<V> = IdVecKey<EdgeRecord<V>>;

/// A directed edge record, owned by the chain of its `from` vertex.
#[derive(Debug)]
pub(crate) struct EdgeRecord<V> {
    pub from: VertexKey<V>,
    pub to: VertexKey<V>,
    pub weight: f64,
    /// Set on the reversed copy stored for an undirected edge.
    pub mirror: bool,
    pub next: Option<EdgeKey<V>>,
}

impl<V> Clone for EdgeRecord<V> {
    fn clone(&self) -> Self {
        EdgeRecord {
            from: self.from,
            to: self.to,
            weight: self.weight,
            mirror: self.mirror,
            next: self.next,
        }
    }
}

impl<V> EdgeRecord<V> {
    fn matches(&self, to: VertexKey<V>, weight: f64) -> bool {
        self.to == to && weights_match(self.weight, weight)
    }
}

/// Exact weight equality under IEEE total ordering: no tolerance, `NaN`
/// matches `NaN`, and `0.0` does not match `-0.0`.
pub(crate) fn weights_match(a: f64, b: f64) -> bool {
    a.total_cmp(&b).is_eq()
}

/// Storage for the per-vertex edge chains.  Chains are unordered; the head
/// of each chain is kept by the owning vertex record and passed in by the
/// caller.
#[derive(Debug)]
pub(crate) struct EdgeStore<V> {
    records: IdVec<EdgeRecord<V>>,
}

impl<V> Clone for EdgeStore<V> {
    fn clone(&self) -> Self {
        EdgeStore {
            records: self.records.clone(),
        }
    }
}

impl<V> EdgeStore<V> {
    pub fn new() -> Self {
        EdgeStore {
            records: IdVec::new(),
        }
    }

    /// Total number of records across all chains.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Prepends a record for `from -> to` to the chain at `head`.  Does not
    /// check for an existing identical record.
    pub fn add_edge(
        &mut self,
        head: &mut Option<EdgeKey<V>>,
        from: VertexKey<V>,
        to: VertexKey<V>,
        weight: f64,
        mirror: bool,
    ) -> EdgeKey<V> {
        let key = self.records.insert(EdgeRecord {
            from,
            to,
            weight,
            mirror,
            next: *head,
        });
        *head = Some(key);
        key
    }

    /// Finds the first record in the chain at `head` pointing at `to` with
    /// exactly `weight`.
    pub fn find_edge(
        &self,
        head: Option<EdgeKey<V>>,
        to: VertexKey<V>,
        weight: f64,
    ) -> Option<&EdgeRecord<V>> {
        self.iter(head)
            .map(|(_, record)| record)
            .find(|record| record.matches(to, weight))
    }

    /// Unlinks and returns the first record in the chain at `head` pointing
    /// at `to` with exactly `weight`.
    pub fn remove_edge(
        &mut self,
        head: &mut Option<EdgeKey<V>>,
        to: VertexKey<V>,
        weight: f64,
    ) -> Option<EdgeRecord<V>> {
        let mut prev: Option<EdgeKey<V>> = None;
        let mut current = *head;
        while let Some(key) = current {
            let record = self.get(key);
            if record.matches(to, weight) {
                let next = record.next;
                match prev {
                    Some(prev) => self.get_mut(prev).next = next,
                    None => *head = next,
                }
                return self.records.remove(key);
            }
            prev = Some(key);
            current = record.next;
        }
        None
    }

    /// Unlinks every record in the chain at `head` for which `keep` returns
    /// false, returning the removed records.
    pub fn retain(
        &mut self,
        head: &mut Option<EdgeKey<V>>,
        mut keep: impl FnMut(&EdgeRecord<V>) -> bool,
    ) -> Vec<EdgeRecord<V>> {
        let mut removed = Vec::new();
        let mut prev: Option<EdgeKey<V>> = None;
        let mut current = *head;
        while let Some(key) = current {
            let record = self.get(key);
            let next = record.next;
            if keep(record) {
                prev = Some(key);
            } else {
                match prev {
                    Some(prev) => self.get_mut(prev).next = next,
                    None => *head = next,
                }
                removed.extend(self.records.remove(key));
            }
            current = next;
        }
        removed
    }

    /// Removes the whole chain at `head`.
    pub fn drain(&mut self, head: &mut Option<EdgeKey<V>>) -> Vec<EdgeRecord<V>> {
        self.retain(head, |_| false)
    }

    /// Iterates over the chain at `head`, most recently added first.
    pub fn iter(&self, head: Option<EdgeKey<V>>) -> EdgeChain<'_, V> {
        EdgeChain {
            store: self,
            current: head,
        }
    }

    fn get(&self, key: EdgeKey<V>) -> &EdgeRecord<V> {
        self.records.get(key).expect("edge key is dangling")
    }

    fn get_mut(&mut self, key: EdgeKey<V>) -> &mut EdgeRecord<V> {
        self.records.get_mut(key).expect("edge key is dangling")
    }
}

pub(crate) struct EdgeChain<'a, V> {
    store: &'a EdgeStore<V>,
    current: Option<EdgeKey<V>>,
}

impl<'a, V> Iterator for EdgeChain<'a, V> {
    type Item = (EdgeKey<V>, &'a EdgeRecord<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        let record = self.store.get(key);
        self.current = record.next;
        Some((key, record))
    }
}

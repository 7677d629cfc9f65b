use std::cmp::Ordering;

use crate::{
    edge_store::EdgeKey,
    id_vec::{IdVec, IdVecKey},
    order::VertexOrder,
};

pub(crate) type VertexKey<V> = IdVecKey<VertexRecord<V>>;

#[derive(Clone, Debug)]
pub(crate) struct VertexRecord<V> {
    pub data: V,
    pub in_deg: usize,
    pub out_deg: usize,
    pub accessed: bool,
    pub processed: bool,
    /// Head of the chain of edges leaving this vertex.
    pub first_edge: Option<EdgeKey<V>>,
    /// The next vertex in sorted order.
    pub next: Option<VertexKey<V>>,
}

impl<V> VertexRecord<V> {
    fn new(data: V, next: Option<VertexKey<V>>) -> Self {
        VertexRecord {
            data,
            in_deg: 0,
            out_deg: 0,
            accessed: false,
            processed: false,
            first_edge: None,
            next,
        }
    }
}

/// Vertices kept in a singly-linked chain, strictly increasing under `O`.
/// Records live in an arena; the chain links are arena keys.
#[derive(Clone, Debug)]
pub(crate) struct VertexStore<V, O> {
    records: IdVec<VertexRecord<V>>,
    head: Option<VertexKey<V>>,
    size: usize,
    order: O,
}

impl<V, O> VertexStore<V, O>
where
    O: VertexOrder<V>,
{
    pub fn new(order: O) -> Self {
        VertexStore {
            records: IdVec::new(),
            head: None,
            size: 0,
            order,
        }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<VertexKey<V>> {
        self.head
    }

    pub fn get(&self, key: VertexKey<V>) -> &VertexRecord<V> {
        self.records.get(key).expect("vertex key is dangling")
    }

    pub fn get_mut(&mut self, key: VertexKey<V>) -> &mut VertexRecord<V> {
        self.records.get_mut(key).expect("vertex key is dangling")
    }

    /// Like [`Self::get_mut`], but returns `None` for a vertex that has been
    /// removed.
    pub fn try_get_mut(&mut self, key: VertexKey<V>) -> Option<&mut VertexRecord<V>> {
        self.records.get_mut(key)
    }

    pub fn contains_key(&self, key: VertexKey<V>) -> bool {
        self.records.get(key).is_some()
    }

    /// Number of records held by the arena, which must always match the
    /// length of the chain.
    pub fn arena_len(&self) -> usize {
        self.records.len()
    }

    /// Finds the vertex equal to `data`.  The scan stops as soon as it passes
    /// the position `data` would occupy.
    pub fn retrieve(&self, data: &V) -> Option<VertexKey<V>> {
        let mut current = self.head;
        while let Some(key) = current {
            let record = self.get(key);
            match self.order.compare(data, &record.data) {
                Ordering::Greater => current = record.next,
                Ordering::Equal => return Some(key),
                Ordering::Less => return None,
            }
        }
        None
    }

    pub fn contains(&self, data: &V) -> bool {
        !self.is_empty() && self.retrieve(data).is_some()
    }

    /// Splices a new vertex in front of the first vertex greater than `data`.
    /// Returns `None` without inserting if an equal vertex already exists.
    pub fn insert(&mut self, data: V) -> Option<VertexKey<V>> {
        let (prev, current) = self.seek(&data);
        if let Some(key) = current {
            if self.order.compare(&data, &self.get(key).data) == Ordering::Equal {
                return None;
            }
        }

        let key = self.records.insert(VertexRecord::new(data, current));
        match prev {
            Some(prev) => self.get_mut(prev).next = Some(key),
            None => self.head = Some(key),
        }
        self.size += 1;
        Some(key)
    }

    /// Unlinks the vertex equal to `data` and takes its record out of the
    /// arena.  The record still owns its edge chain; the caller is
    /// responsible for releasing it.
    pub fn remove(&mut self, data: &V) -> Option<(VertexKey<V>, VertexRecord<V>)> {
        let (prev, current) = self.seek(data);
        let key = current?;
        if self.order.compare(data, &self.get(key).data) != Ordering::Equal {
            return None;
        }

        let next = self.get(key).next;
        match prev {
            Some(prev) => self.get_mut(prev).next = next,
            None => self.head = next,
        }
        self.size -= 1;
        let record = self.records.remove(key).expect("vertex key is dangling");
        Some((key, record))
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.head = None;
        self.size = 0;
    }

    /// Iterates over the vertices in sorted order.
    pub fn iter(&self) -> VertexChain<'_, V, O> {
        VertexChain {
            store: self,
            current: self.head,
        }
    }

    /// Returns the last vertex less than `data` and the first vertex not less
    /// than it.
    fn seek(&self, data: &V) -> (Option<VertexKey<V>>, Option<VertexKey<V>>) {
        let mut prev = None;
        let mut current = self.head;
        while let Some(key) = current {
            let record = self.get(key);
            if self.order.compare(data, &record.data) != Ordering::Greater {
                break;
            }
            prev = Some(key);
            current = record.next;
        }
        (prev, current)
    }
}

/// Iterator over the vertex chain in sorted order.
pub(crate) struct VertexChain<'a, V, O> {
    store: &'a VertexStore<V, O>,
    current: Option<VertexKey<V>>,
}

impl<'a, V, O> Iterator for VertexChain<'a, V, O>
where
    O: VertexOrder<V>,
{
    type Item = (VertexKey<V>, &'a VertexRecord<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        let record = self.store.get(key);
        self.current = record.next;
        Some((key, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{NaturalOrder, Reversed};

    fn chain<O: VertexOrder<i32>>(store: &VertexStore<i32, O>) -> Vec<i32> {
        store.iter().map(|(_, record)| record.data).collect()
    }

    #[test]
    fn test_empty_store() {
        let store: VertexStore<i32, _> = VertexStore::new(NaturalOrder);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.contains(&1));
        assert!(store.retrieve(&1).is_none());
    }

    #[test]
    fn test_insert_keeps_sorted_order() {
        let mut store = VertexStore::new(NaturalOrder);
        for value in [5, 1, 9, 3, 7] {
            assert!(store.insert(value).is_some());
        }
        assert_eq!(chain(&store), vec![1, 3, 5, 7, 9]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_insert_at_head_and_tail() {
        let mut store = VertexStore::new(NaturalOrder);
        store.insert(5);
        store.insert(1);
        store.insert(10);
        assert_eq!(chain(&store), vec![1, 5, 10]);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut store = VertexStore::new(NaturalOrder);
        assert!(store.insert(4).is_some());
        assert!(store.insert(2).is_some());
        assert!(store.insert(4).is_none());
        assert!(store.insert(2).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_retrieve() {
        let mut store = VertexStore::new(NaturalOrder);
        let two = store.insert(2).unwrap();
        store.insert(4);
        assert_eq!(store.retrieve(&2), Some(two));
        assert!(store.retrieve(&3).is_none());
        assert!(store.retrieve(&0).is_none());
        assert!(store.retrieve(&5).is_none());
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut store = VertexStore::new(NaturalOrder);
        for value in 1..=5 {
            store.insert(value);
        }
        assert_eq!(store.remove(&1).map(|(_, r)| r.data), Some(1));
        assert_eq!(store.remove(&3).map(|(_, r)| r.data), Some(3));
        assert_eq!(store.remove(&5).map(|(_, r)| r.data), Some(5));
        assert!(store.remove(&3).is_none());
        assert_eq!(chain(&store), vec![2, 4]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.arena_len(), 2);
    }

    #[test]
    fn test_remove_missing() {
        let mut store = VertexStore::new(NaturalOrder);
        store.insert(1);
        store.insert(3);
        assert!(store.remove(&2).is_none());
        assert!(store.remove(&4).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut store = VertexStore::new(NaturalOrder);
        store.insert(1);
        store.insert(2);
        store.remove(&1);
        store.insert(0);
        store.insert(1);
        assert_eq!(chain(&store), vec![0, 1, 2]);
    }

    #[test]
    fn test_custom_order() {
        let mut store = VertexStore::new(Reversed(NaturalOrder));
        for value in [2, 8, 5] {
            store.insert(value);
        }
        assert_eq!(chain(&store), vec![8, 5, 2]);
        assert!(store.contains(&5));
        assert!(!store.contains(&6));
    }

    #[test]
    fn test_clear() {
        let mut store = VertexStore::new(NaturalOrder);
        store.insert(1);
        store.insert(2);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(chain(&store).is_empty());
    }
}

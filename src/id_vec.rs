use std::{fmt::Debug, marker::PhantomData, mem::MaybeUninit};

use bitvec::vec::BitVec;
use derivative::Derivative;

/// A typed index into an `IdVec<T>`.  Stable across insertions and removals
/// of other entries.  Once the entry it names is removed, the slot may be
/// handed out again, so holders must drop a key together with its entry.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    PartialOrd(bound = ""),
    Ord(bound = ""),
    Debug(bound = "")
)]
pub struct IdVecKey<T> {
    index: usize,
    #[derivative(Debug = "ignore")]
    marker: PhantomData<fn() -> T>,
}

impl<T> IdVecKey<T> {
    fn new(index: usize) -> Self {
        IdVecKey {
            index,
            marker: PhantomData,
        }
    }

    /// The slot index this key refers to.
    pub fn index(self) -> usize {
        self.index
    }
}

/// A slot arena that assigns stable keys to inserted values.  Live slots are
/// tracked in a `BitVec`; freed slots are recycled by later insertions.
pub struct IdVec<T> {
    vec: Vec<MaybeUninit<T>>,
    liveness: BitVec,
    free: Vec<usize>,
}

impl<T> IdVec<T> {
    /// Creates a new, empty IdVec.
    pub fn new() -> Self {
        IdVec {
            vec: Vec::new(),
            liveness: BitVec::new(),
            free: Vec::new(),
        }
    }

    /// Gets the number of live entries in the `IdVec`.
    pub fn len(&self) -> usize {
        self.vec.len() - self.free.len()
    }

    /// Inserts a new value, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> IdVecKey<T> {
        debug_assert_eq!(self.vec.len(), self.liveness.len());
        match self.free.pop() {
            Some(index) => {
                debug_assert!(!self.liveness[index]);
                self.vec[index] = MaybeUninit::new(value);
                self.liveness.set(index, true);
                IdVecKey::new(index)
            }
            None => {
                let index = self.vec.len();
                self.vec.push(MaybeUninit::new(value));
                self.liveness.push(true);
                IdVecKey::new(index)
            }
        }
    }

    /// Removes the value at the given key, returning it if it was live.
    pub fn remove(&mut self, key: IdVecKey<T>) -> Option<T> {
        let index = key.index;
        if !self.is_live(index) {
            return None;
        }
        self.liveness.set(index, false);
        self.free.push(index);
        // SAFETY: The slot was live, and it is now marked dead, so it will not
        // be read or dropped again until it is overwritten by `insert`.
        Some(unsafe { self.vec[index].assume_init_read() })
    }

    /// Gets a reference to the item at the given key, if it exists.
    pub fn get(&self, key: IdVecKey<T>) -> Option<&T> {
        if self.is_live(key.index) {
            // SAFETY: Live slots are always initialized.
            Some(unsafe { self.vec[key.index].assume_init_ref() })
        } else {
            None
        }
    }

    /// Gets a mutable reference to the item at the given key, if it exists.
    pub fn get_mut(&mut self, key: IdVecKey<T>) -> Option<&mut T> {
        if self.is_live(key.index) {
            // SAFETY: Live slots are always initialized.
            Some(unsafe { self.vec[key.index].assume_init_mut() })
        } else {
            None
        }
    }

    /// Removes every entry.  All outstanding keys become invalid.
    ///
    /// The arena is emptied before any value is dropped, so a panicking
    /// destructor leaks the remaining values instead of dropping any twice.
    pub fn clear(&mut self) {
        let liveness = std::mem::take(&mut self.liveness);
        let mut vec = std::mem::take(&mut self.vec);
        self.free.clear();
        for index in liveness.iter_ones() {
            // SAFETY: Live slots are initialized, and `vec` is no longer
            // reachable from `self`, so each slot is dropped at most once.
            unsafe { vec[index].assume_init_drop() };
        }
    }

    /// Iterates over all live values with their keys, in slot order.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (IdVecKey<T>, &T)> + '_ {
        self.liveness.iter_ones().map(|index| {
            // SAFETY: `iter_ones` only yields live, initialized slots.
            (IdVecKey::new(index), unsafe {
                self.vec[index].assume_init_ref()
            })
        })
    }

    fn is_live(&self, index: usize) -> bool {
        index < self.liveness.len() && self.liveness[index]
    }

}

impl<T> Default for IdVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for IdVec<T> {
    fn clone(&self) -> Self {
        let vec = self
            .vec
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                if self.liveness[index] {
                    // SAFETY: Live slots are always initialized.
                    MaybeUninit::new(unsafe { slot.assume_init_ref() }.clone())
                } else {
                    MaybeUninit::uninit()
                }
            })
            .collect();
        IdVec {
            vec,
            liveness: self.liveness.clone(),
            free: self.free.clone(),
        }
    }
}

impl<T> Drop for IdVec<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for IdVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter_pairs().map(|(key, value)| (key.index(), value)))
            .finish()
    }
}

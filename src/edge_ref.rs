use std::fmt::Debug;

use derivative::Derivative;

/// A borrowed view of one stored edge record.
///
/// An undirected edge is stored as two records, one per direction; the
/// record created from the caller's orientation is the primary one and the
/// reversed copy reports [`EdgeRef::is_mirror`].
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = "V: Debug"),
    PartialEq(bound = "V: PartialEq")
)]
pub struct EdgeRef<'a, V> {
    pub(crate) from: &'a V,
    pub(crate) to: &'a V,
    pub(crate) weight: f64,
    pub(crate) mirror: bool,
}

impl<'a, V> EdgeRef<'a, V> {
    pub fn from(&self) -> &'a V {
        self.from
    }

    pub fn to(&self) -> &'a V {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror
    }

    /// The `(from, to, weight)` triple that identifies this record.
    pub fn as_tuple(&self) -> (&'a V, &'a V, f64) {
        (self.from, self.to, self.weight)
    }
}

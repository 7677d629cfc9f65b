use std::fmt;

/// Whether a graph's edges are directed.  Fixed when the graph is built.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Directedness {
    Directed,
    Undirected,
}

impl Directedness {
    pub fn is_directed(self) -> bool {
        matches!(self, Directedness::Directed)
    }

    /// Number of edge records a single logical edge occupies.  Undirected
    /// edges are stored once in each direction.
    pub(crate) fn records_per_edge(self) -> usize {
        match self {
            Directedness::Directed => 1,
            Directedness::Undirected => 2,
        }
    }
}

impl From<bool> for Directedness {
    fn from(directed: bool) -> Self {
        if directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        }
    }
}

impl fmt::Display for Directedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directedness::Directed => f.write_str("directed"),
            Directedness::Undirected => f.write_str("undirected"),
        }
    }
}

use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::prelude::*;

/// Vertex payloads are drawn from a small domain so that scripts hit
/// duplicates, missing vertices and parallel edges often.
pub const VERTEX_DOMAIN: u8 = 8;
const WEIGHT_DOMAIN: u8 = 3;

impl Arbitrary for Directedness {
    fn arbitrary(g: &mut Gen) -> Self {
        Directedness::from(bool::arbitrary(g))
    }
}

/// One graph mutation in a generated script.
#[derive(Clone, Copy, Debug)]
pub enum Op {
    InsertVertex(u8),
    DeleteVertex(u8),
    InsertEdge(u8, u8, f64),
    DeleteEdge(u8, u8, f64),
}

fn arbitrary_vertex(g: &mut Gen) -> u8 {
    u8::arbitrary(g) % VERTEX_DOMAIN
}

fn arbitrary_weight(g: &mut Gen) -> f64 {
    f64::from(u8::arbitrary(g) % WEIGHT_DOMAIN)
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        // Bias towards edge operations; vertex deletion is the rarest.
        match u8::arbitrary(g) % 10 {
            0..=2 => Op::InsertVertex(arbitrary_vertex(g)),
            3 => Op::DeleteVertex(arbitrary_vertex(g)),
            4..=7 => Op::InsertEdge(arbitrary_vertex(g), arbitrary_vertex(g), arbitrary_weight(g)),
            _ => Op::DeleteEdge(arbitrary_vertex(g), arbitrary_vertex(g), arbitrary_weight(g)),
        }
    }
}

/// A generated sequence of mutations for a graph of arbitrary directedness.
#[derive(Clone, Debug)]
pub struct ArbScript {
    pub directedness: Directedness,
    pub ops: Vec<Op>,
}

impl Arbitrary for ArbScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_ops = usize::arbitrary(g) % 60;
        ArbScript {
            directedness: Directedness::arbitrary(g),
            ops: (0..num_ops).map(|_| Op::arbitrary(g)).collect(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let directedness = self.directedness;
        Box::new(self.ops.shrink().map(move |ops| ArbScript { directedness, ops }))
    }
}

impl ArbScript {
    /// Builds a graph by running the script.
    pub fn build(&self) -> OrderedGraph<u8> {
        let mut graph = OrderedGraph::new(self.directedness);
        for op in &self.ops {
            apply(&mut graph, *op);
        }
        graph
    }
}

/// Outcome of one operation, comparable between the graph and the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Vertex(bool),
    Added(AddEdgeResult),
    Removed(RemoveEdgeResult),
}

pub fn apply(graph: &mut OrderedGraph<u8>, op: Op) -> Outcome {
    match op {
        Op::InsertVertex(v) => Outcome::Vertex(graph.insert_vertex(v)),
        Op::DeleteVertex(v) => Outcome::Vertex(graph.delete_vertex(&v)),
        Op::InsertEdge(a, b, w) => Outcome::Added(graph.insert_edge(&a, &b, w)),
        Op::DeleteEdge(a, b, w) => Outcome::Removed(graph.delete_edge(&a, &b, w)),
    }
}

/// A deliberately naive reference implementation: a sorted set of vertices
/// and a flat list of logical edges in the orientation they were inserted.
#[derive(Debug, Default)]
pub struct Model {
    pub directed: bool,
    pub vertices: BTreeSet<u8>,
    pub edges: Vec<(u8, u8, f64)>,
}

impl Model {
    pub fn new(directedness: Directedness) -> Self {
        Model {
            directed: directedness.is_directed(),
            ..Model::default()
        }
    }

    pub fn apply(&mut self, op: Op) -> Outcome {
        match op {
            Op::InsertVertex(v) => Outcome::Vertex(self.vertices.insert(v)),
            Op::DeleteVertex(v) => {
                let removed = self.vertices.remove(&v);
                self.edges.retain(|&(a, b, _)| a != v && b != v);
                Outcome::Vertex(removed)
            }
            Op::InsertEdge(a, b, w) => Outcome::Added(if !self.has_endpoints(a, b) {
                AddEdgeResult::MissingEndpoint
            } else if self.position(a, b, w).is_some() {
                AddEdgeResult::AlreadyPresent
            } else {
                self.edges.push((a, b, w));
                AddEdgeResult::Added
            }),
            Op::DeleteEdge(a, b, w) => Outcome::Removed(if !self.has_endpoints(a, b) {
                RemoveEdgeResult::MissingEndpoint
            } else if let Some(index) = self.position(a, b, w) {
                self.edges.remove(index);
                RemoveEdgeResult::Removed
            } else {
                RemoveEdgeResult::NotFound
            }),
        }
    }

    pub fn record_count(&self) -> usize {
        if self.directed {
            self.edges.len()
        } else {
            self.edges.len() * 2
        }
    }

    pub fn in_degree(&self, v: u8) -> usize {
        self.edges.iter().filter(|&&(_, b, _)| b == v).count()
    }

    pub fn out_degree(&self, v: u8) -> usize {
        self.edges.iter().filter(|&&(a, _, _)| a == v).count()
    }

    fn has_endpoints(&self, a: u8, b: u8) -> bool {
        self.vertices.contains(&a) && self.vertices.contains(&b)
    }

    fn position(&self, a: u8, b: u8, w: f64) -> Option<usize> {
        self.edges.iter().position(|&(x, y, z)| {
            z == w && ((x == a && y == b) || (!self.directed && x == b && y == a))
        })
    }
}

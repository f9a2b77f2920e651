//! A* shortest path search over the visibility graph.

use std::{cmp::Ordering, collections::BinaryHeap};

use glam::DVec2;
use ordered_float::OrderedFloat;

use crate::{graph::VisibilityGraph, path::Path};

/// Finds the shortest path between two graph vertices.
///
/// Straight line distance to the target is used as the heuristic, which is
/// admissible and consistent for Euclidean edge weights. A vertex is
/// finalized when it is popped from the open set for the first time.
///
/// Returns `None` if the target is not reachable from the source.
pub(crate) fn find_path(graph: &VisibilityGraph, source: u32, target: u32) -> Option<Path> {
    if source == target {
        return Some(Path::single(graph.point(source)));
    }

    let target_point = graph.point(target);
    let mut nodes = vec![Node::default(); graph.len()];
    let mut open_set = OpenSet::new();

    nodes[source as usize].distance = 0.;
    open_set.push(Step::new(
        graph.point(source).distance(target_point),
        source,
    ));

    while let Some(step) = open_set.pop() {
        let current = &mut nodes[step.vertex_id() as usize];
        if current.closed {
            continue;
        }
        current.closed = true;
        let distance = current.distance;

        if step.vertex_id() == target {
            return Some(resolve(graph, &nodes, source, target));
        }

        for neighbour in graph.neighbours(step.vertex_id()) {
            let node = &mut nodes[neighbour.id() as usize];
            if node.closed {
                continue;
            }

            let candidate = distance + neighbour.weight();
            if candidate < node.distance {
                node.distance = candidate;
                node.prev = Some(step.vertex_id());
                let heuristic = graph.point(neighbour.id()).distance(target_point);
                open_set.push(Step::new(candidate + heuristic, neighbour.id()));
            }
        }
    }

    None
}

/// Walks the predecessor chain from `target` back to `source`.
fn resolve(graph: &VisibilityGraph, nodes: &[Node], source: u32, target: u32) -> Path {
    let mut waypoints: Vec<DVec2> = vec![graph.point(target)];
    let mut current = target;
    while current != source {
        // Every closed vertex except the source has a predecessor.
        let Some(prev) = nodes[current as usize].prev else {
            break;
        };
        waypoints.push(graph.point(prev));
        current = prev;
    }
    waypoints.reverse();

    Path::new(nodes[target as usize].distance, waypoints)
}

#[derive(Clone, Copy)]
struct Node {
    /// Length of the shortest known path from the source.
    distance: f64,
    prev: Option<u32>,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            distance: f64::INFINITY,
            prev: None,
            closed: false,
        }
    }
}

/// A priority queue of vertices to be expanded, lowest score first.
struct OpenSet {
    heap: BinaryHeap<Step>,
}

impl OpenSet {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    fn pop(&mut self) -> Option<Step> {
        self.heap.pop()
    }

    fn push(&mut self, step: Step) {
        self.heap.push(step);
    }
}

/// A vertex reached during the search.
struct Step {
    /// Length of the path to the vertex plus estimated remaining distance.
    score: OrderedFloat<f64>,
    vertex_id: u32,
}

impl Step {
    fn new(score: f64, vertex_id: u32) -> Self {
        Self {
            score: OrderedFloat(score),
            vertex_id,
        }
    }

    fn vertex_id(&self) -> u32 {
        self.vertex_id
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Step) -> bool {
        self.vertex_id == other.vertex_id && self.score == other.score
    }
}

impl Eq for Step {}

impl PartialOrd for Step {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Step {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.score, other.vertex_id).cmp(&(self.score, self.vertex_id))
    }
}

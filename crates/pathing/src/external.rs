//! Transient (per query cycle) points layered on top of the static
//! visibility graph.

use glam::DVec2;
use nav_geometry::{Segment, Tangents};
use tracing::debug;

use crate::{graph::VisibilityGraph, obstacles::Obstacles};

/// The current batch of external points (agent and goal positions) and
/// everything it added to the visibility graph.
///
/// A batch is wholesale replaced by the next one. Vertices created for a
/// batch are removed and their IDs recycled when the batch is replaced.
/// Points coinciding with an already existing (static) vertex reuse that
/// vertex, only the edges added by the batch are removed from it.
pub(crate) struct ExternalPoints {
    points: Vec<DVec2>,
    /// IDs of vertices created by the batch.
    owned: Vec<u32>,
    /// All edges added by the batch.
    edges: Vec<(u32, u32)>,
}

impl ExternalPoints {
    pub(crate) fn new() -> Self {
        Self {
            points: Vec::new(),
            owned: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Returns external points, after snapping out of obstacles, in the
    /// order they were given.
    pub(crate) fn points(&self) -> &[DVec2] {
        self.points.as_slice()
    }

    /// Forgets the batch without touching any graph. Used when the graph the
    /// batch was added to is dropped.
    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.owned.clear();
        self.edges.clear();
    }

    /// Removes the current batch from the graph and adds `points` instead.
    ///
    /// Points inside obstacles are moved to the nearest point outside of
    /// them. Each point is connected to all mutually visible other points of
    /// the batch and to all visible non-occluded obstacle vertices.
    pub(crate) fn replace(
        &mut self,
        graph: &mut VisibilityGraph,
        obstacles: &Obstacles,
        points: &[DVec2],
    ) {
        self.retire(graph);

        self.points
            .extend(points.iter().map(|&point| obstacles.snap(point)));

        let mut ids = Vec::with_capacity(self.points.len());
        for &point in &self.points {
            ids.push(insert_vertex(&mut self.owned, graph, point));
        }

        let tangents: Vec<Vec<Tangents>> = self
            .points
            .iter()
            .map(|&point| {
                let mut tangents = Vec::with_capacity(obstacles.polygons().len());
                obstacles.tangents(point, &mut tangents);
                tangents
            })
            .collect();
        let valid_vertices: Vec<DVec2> = obstacles.valid_vertices().collect();

        for (i, &point) in self.points.iter().enumerate() {
            let point_tangents = tangents[i].as_slice();

            for (j, &other) in self.points.iter().enumerate().skip(i + 1) {
                if obstacles.is_clear(Segment::new(point, other), point_tangents) {
                    push_edge(&mut self.edges, graph, ids[i], ids[j]);
                }
            }

            for (j, polygon) in obstacles.polygons().iter().enumerate() {
                let polygon_tangents = point_tangents[j];
                if polygon_tangents.first().is_none()
                    || polygon_tangents.second().is_none()
                    || polygon_tangents.is_degenerate()
                {
                    continue;
                }

                for index in polygon_tangents.iter() {
                    if obstacles.is_inside(j, index) {
                        continue;
                    }
                    let target = polygon.point(index);
                    if obstacles.is_clear(Segment::new(point, target), point_tangents) {
                        let target_id = insert_vertex(&mut self.owned, graph, target);
                        push_edge(&mut self.edges, graph, ids[i], target_id);
                    }
                }
            }

            // Tangent detection alone misses some lines of sight (for
            // example to vertices on the far side of an obstacle seen through
            // a gap), thus all remaining vertices are tried.
            for &target in &valid_vertices {
                let is_tangent = obstacles
                    .polygons()
                    .iter()
                    .zip(point_tangents)
                    .any(|(polygon, tangents)| {
                        tangents.iter().any(|index| polygon.point(index) == target)
                    });
                if is_tangent {
                    continue;
                }

                if obstacles.is_clear(Segment::new(point, target), point_tangents) {
                    let target_id = insert_vertex(&mut self.owned, graph, target);
                    push_edge(&mut self.edges, graph, ids[i], target_id);
                }
            }
        }

        debug!(
            "{} external points registered: {} new vertices, {} new edges",
            self.points.len(),
            self.owned.len(),
            self.edges.len()
        );
    }

    /// Removes everything the current batch added to `graph`.
    fn retire(&mut self, graph: &mut VisibilityGraph) {
        for (a, b) in self.edges.drain(..) {
            graph.remove_edge(a, b);
        }

        for id in self.owned.drain(..) {
            let point = graph.point(id);
            debug_assert!(graph.neighbours(id).is_empty());
            graph.remove_vertex(point);
        }

        self.points.clear();
    }
}

/// Returns ID of the vertex at `point`. A vertex created by this call is
/// recorded in `owned`: obstacle vertices without static edges are not part
/// of the static graph and live only as long as the batch.
fn insert_vertex(owned: &mut Vec<u32>, graph: &mut VisibilityGraph, point: DVec2) -> u32 {
    let (id, created) = graph.insert_vertex(point);
    if created {
        owned.push(id);
    }
    id
}

/// Adds edge `a` - `b` unless it is already present and records it.
fn push_edge(edges: &mut Vec<(u32, u32)>, graph: &mut VisibilityGraph, a: u32, b: u32) {
    if graph.neighbours(a).iter().any(|n| n.id() == b) {
        return;
    }
    if graph.add_edge(a, b) {
        edges.push((a, b));
    }
}

//! Construction of the static (obstacle derived) part of the visibility
//! graph.

use nav_geometry::{Segment, Tangents};
use tracing::debug;

use crate::{graph::VisibilityGraph, obstacles::Obstacles};

/// Builds a visibility graph connecting vertices of the obstacles.
///
/// The graph consists of:
///
/// * polygon boundary edges, so that paths may follow obstacle perimeters,
///
/// * tangent edges between distinct polygons, id est line segments touching
///   both polygons without entering either of them. Any shortest path among
///   convex obstacles bends only at such tangent points.
///
/// Vertices inside other obstacles are never connected. The returned graph
/// has a dense vertex ID space starting from 0.
pub(crate) fn build(obstacles: &Obstacles) -> VisibilityGraph {
    let mut graph = VisibilityGraph::new();
    let polygons = obstacles.polygons();
    // Tangents from the currently considered vertex to all polygons.
    let mut tangents = Vec::with_capacity(polygons.len());

    for (i, polygon) in polygons.iter().enumerate() {
        let len = polygon.points().len();

        for k in 0..len {
            if obstacles.is_inside(i, k) {
                continue;
            }

            let point = polygon.point(k);
            obstacles.tangents(point, &mut tangents);

            // The other side is added when the previous vertex is considered.
            let next = (k + 1) % len;
            if !obstacles.is_inside(i, next) {
                connect(
                    &mut graph,
                    obstacles,
                    Segment::new(point, polygon.point(next)),
                    &tangents,
                );
            }

            for (j, other) in polygons.iter().enumerate().skip(i + 1) {
                let other_tangents = tangents[j];
                // The point coincides with a vertex of the other polygon.
                if other_tangents.is_degenerate() {
                    continue;
                }

                for index in other_tangents.iter() {
                    let target = other.point(index);
                    if obstacles.is_inside(j, index) || !polygon.is_tangent(k, target) {
                        continue;
                    }
                    connect(
                        &mut graph,
                        obstacles,
                        Segment::new(point, target),
                        &tangents,
                    );
                }
            }
        }
    }

    debug!(
        "Visibility graph of {} obstacles built: {} vertices, {} edges",
        polygons.len(),
        graph.vertex_count(),
        graph.edge_count()
    );

    graph
}

/// Adds an edge corresponding to `segment` if it doesn't cross any obstacle.
fn connect(
    graph: &mut VisibilityGraph,
    obstacles: &Obstacles,
    segment: Segment,
    tangents: &[Tangents],
) {
    if obstacles.is_clear(segment, tangents) {
        let (a, _) = graph.insert_vertex(segment.a());
        let (b, _) = graph.insert_vertex(segment.b());
        graph.add_edge(a, b);
    }
}

//! Inflated obstacles and line-of-sight queries against them.

use glam::DVec2;
use nav_geometry::{ConvexPolygon, Segment, Tangents};
use tracing::trace;

/// Maximum number of passes over all obstacles when pushing a point out of
/// (possibly overlapping) obstacles.
const MAX_SNAP_PASSES: usize = 10;

/// Set of inflated convex obstacles.
pub(crate) struct Obstacles {
    polygons: Vec<ConvexPolygon>,
    /// `inside[i][k]` is true if vertex `k` of polygon `i` lies strictly
    /// inside another polygon. Such vertices are unreachable and never end
    /// a graph edge.
    inside: Vec<Vec<bool>>,
}

impl Obstacles {
    pub(crate) fn empty() -> Self {
        Self {
            polygons: Vec::new(),
            inside: Vec::new(),
        }
    }

    /// Inflates all polygons by `inflate_by` and marks vertices which lie
    /// inside other inflated polygons.
    ///
    /// Polygons which collapse during inflation are not obstacles and are
    /// dropped.
    pub(crate) fn new(polygons: &[ConvexPolygon], inflate_by: f64) -> Self {
        let polygons: Vec<ConvexPolygon> = polygons
            .iter()
            .filter_map(|polygon| polygon.inflated(inflate_by))
            .collect();

        let inside = polygons
            .iter()
            .enumerate()
            .map(|(i, polygon)| {
                polygon
                    .points()
                    .iter()
                    .map(|&point| {
                        polygons
                            .iter()
                            .enumerate()
                            .any(|(j, other)| i != j && other.contains(point))
                    })
                    .collect()
            })
            .collect();

        Self { polygons, inside }
    }

    pub(crate) fn polygons(&self) -> &[ConvexPolygon] {
        self.polygons.as_slice()
    }

    /// Returns true if vertex `vertex` of polygon `polygon` lies inside
    /// another polygon.
    pub(crate) fn is_inside(&self, polygon: usize, vertex: usize) -> bool {
        self.inside[polygon][vertex]
    }

    /// Fills `tangents` with tangents from `point` to every polygon. The
    /// result is indexed by polygon index.
    pub(crate) fn tangents(&self, point: DVec2, tangents: &mut Vec<Tangents>) {
        tangents.clear();
        tangents.extend(self.polygons.iter().map(|polygon| polygon.tangents(point)));
    }

    /// Returns true if `segment` does not cross interior of any polygon.
    ///
    /// `tangents` must be tangents from `segment.a()` as computed by
    /// [`Self::tangents`].
    pub(crate) fn is_clear(&self, segment: Segment, tangents: &[Tangents]) -> bool {
        debug_assert_eq!(tangents.len(), self.polygons.len());
        self.polygons
            .iter()
            .zip(tangents)
            .all(|(polygon, &tangents)| !polygon.intersects(segment, tangents))
    }

    /// Iterates over vertices of all polygons which are not inside any other
    /// polygon.
    pub(crate) fn valid_vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.polygons
            .iter()
            .zip(&self.inside)
            .flat_map(|(polygon, inside)| {
                polygon
                    .points()
                    .iter()
                    .zip(inside)
                    .filter(|&(_, &inside)| !inside)
                    .map(|(&point, _)| point)
            })
    }

    /// Moves `point` to the nearest point outside of the polygon containing
    /// it. This is repeated since the moved point might end up in another,
    /// overlapping polygon.
    pub(crate) fn snap(&self, point: DVec2) -> DVec2 {
        let mut snapped = point;
        for _ in 0..MAX_SNAP_PASSES {
            let Some(polygon) = self.polygons.iter().find(|p| p.contains(snapped)) else {
                break;
            };
            snapped = polygon.closest_point_outside(snapped);
        }

        if snapped != point {
            trace!("Point {:?} snapped out of obstacles to {:?}", point, snapped);
        }
        snapped
    }
}

//! Convex obstacle polygons.

use glam::DVec2;
use parry2d_f64::{
    math::Point,
    query::PointQuery,
    shape::{ConvexPolygon as ParryPolygon, Segment as ParrySegment},
};

use crate::{
    segment::Segment,
    side::{which_side, Side},
    tangents::Tangents,
    EPSILON,
};

/// A strictly convex polygon with counter-clockwise vertices.
///
/// The polygon is never empty: constructors return `None` whenever the input
/// does not describe a polygon with a positive area.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    points: Vec<DVec2>,
    mins: DVec2,
    maxs: DVec2,
}

impl ConvexPolygon {
    /// Creates a polygon from the convex hull of `points`.
    ///
    /// Returns `None` if any of the points is not finite or if the points do
    /// not span a non-zero area.
    pub fn from_convex_hull(points: &[DVec2]) -> Option<Self> {
        if points.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let mut distinct: Vec<Point<f64>> = Vec::with_capacity(points.len());
        for point in points {
            let point = Point::new(point.x, point.y);
            if !distinct.contains(&point) {
                distinct.push(point);
            }
        }
        if distinct.len() < 3 {
            return None;
        }
        let base = distinct[0];
        let axis = distinct[1] - base;
        if distinct
            .iter()
            .all(|p| axis.perp(&(*p - base)).abs() <= EPSILON * axis.norm())
        {
            return None;
        }

        let hull = ParryPolygon::from_convex_hull(&distinct)?;
        let mut points: Vec<DVec2> = hull.points().iter().map(|p| DVec2::new(p.x, p.y)).collect();

        let area = signed_area(&points);
        if area.abs() <= EPSILON {
            return None;
        }
        if area < 0. {
            points.reverse();
        }

        let mins = points.iter().fold(DVec2::INFINITY, |acc, &p| acc.min(p));
        let maxs = points.iter().fold(DVec2::NEG_INFINITY, |acc, &p| acc.max(p));
        Some(Self { points, mins, maxs })
    }

    /// Returns counter-clockwise vertices of the polygon.
    pub fn points(&self) -> &[DVec2] {
        self.points.as_slice()
    }

    /// Returns a vertex of the polygon.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn point(&self, index: usize) -> DVec2 {
        self.points[index]
    }

    /// Returns the next (counter-clockwise) vertex.
    pub fn next(&self, index: usize) -> DVec2 {
        self.points[(index + 1) % self.points.len()]
    }

    /// Returns the previous (clockwise) vertex.
    pub fn prev(&self, index: usize) -> DVec2 {
        let len = self.points.len();
        self.points[(index + len - 1) % len]
    }

    /// Iterates over polygon edges in counter-clockwise order.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.points.len()).map(|i| Segment::new(self.points[i], self.next(i)))
    }

    /// Returns the polygon offset outwards by `margin`.
    ///
    /// Each edge is moved along its outer normal by `margin` and the new
    /// vertices are placed at the intersections of neighbouring offset edges
    /// (miter joint). Thus every point of the returned polygon boundary is at
    /// least `margin` away from the original polygon.
    ///
    /// Returns `None` if the polygon collapses, which may happen only with a
    /// negative `margin`.
    pub fn inflated(&self, margin: f64) -> Option<Self> {
        if margin == 0. {
            return Some(self.clone());
        }
        if !margin.is_finite() {
            return None;
        }

        let mut points = Vec::with_capacity(self.points.len());
        for (index, &vertex) in self.points.iter().enumerate() {
            let before = outward_normal(self.prev(index), vertex);
            let after = outward_normal(vertex, self.next(index));
            let scale = 1. + before.dot(after);
            if scale <= f64::EPSILON {
                return None;
            }
            points.push(vertex + (before + after) * (margin / scale));
        }

        if margin < 0. {
            for index in 0..points.len() {
                let next = (index + 1) % points.len();
                let old = self.points[next] - self.points[index];
                let new = points[next] - points[index];
                if old.dot(new) <= 0. {
                    return None;
                }
            }
        }

        Self::from_convex_hull(&points)
    }

    /// Returns true if the point lies strictly inside the polygon. Points on
    /// the boundary (up to [`EPSILON`]) are not inside.
    pub fn contains(&self, point: DVec2) -> bool {
        self.edges().all(|edge| {
            let direction = edge.direction();
            direction.perp_dot(point - edge.a()) > EPSILON * direction.length()
        })
    }

    /// Returns vertex indices of the two tangents from `point` to the
    /// polygon. See [`Tangents`].
    ///
    /// When `point` lies on the line of a polygon edge, both end points of
    /// the edge qualify and the one nearer to `point` is returned.
    pub fn tangents(&self, point: DVec2) -> Tangents {
        if let Some(index) = self.points.iter().position(|&p| p == point) {
            return Tangents::vertex(index);
        }
        if self.contains(point) {
            return Tangents::none();
        }

        let mut first: Option<(usize, f64)> = None;
        let mut second: Option<(usize, f64)> = None;

        for (index, &vertex) in self.points.iter().enumerate() {
            let prev = which_side(point, vertex, self.prev(index));
            let next = which_side(point, vertex, self.next(index));
            let distance = point.distance_squared(vertex);

            if prev != Side::Right && next != Side::Right {
                if first.map_or(true, |(_, best)| distance < best) {
                    first = Some((index, distance));
                }
            } else if prev != Side::Left && next != Side::Left {
                if second.map_or(true, |(_, best)| distance < best) {
                    second = Some((index, distance));
                }
            }
        }

        Tangents::new(first.map(|t| t.0), second.map(|t| t.0))
    }

    /// Returns true if the sightline from `point` to vertex `index` only
    /// touches the polygon, id est both neighbours of the vertex lie on the
    /// same side of the sightline.
    ///
    /// Returns false if `index` is out of bounds or the vertex coincides with
    /// `point`.
    pub fn is_tangent(&self, index: usize, point: DVec2) -> bool {
        let Some(&vertex) = self.points.get(index) else {
            return false;
        };
        if vertex == point {
            return false;
        }

        let prev = which_side(point, vertex, self.prev(index));
        let next = which_side(point, vertex, self.next(index));
        (prev != Side::Right && next != Side::Right) || (prev != Side::Left && next != Side::Left)
    }

    /// Returns true if any part of the segment lies strictly inside the
    /// polygon. Touching a vertex or sliding along an edge is not an
    /// intersection.
    ///
    /// # Arguments
    ///
    /// * `segment` - the tested line segment.
    ///
    /// * `tangents` - tangents from `segment.a()` to this polygon. A segment
    ///   ending in one of the tangent vertices grazes the polygon.
    pub fn intersects(&self, segment: Segment, tangents: Tangents) -> bool {
        if tangents.iter().any(|index| self.points[index] == segment.b()) {
            return false;
        }

        let (mins, maxs) = segment.bounds();
        if maxs.cmplt(self.mins).any() || mins.cmpgt(self.maxs).any() {
            return false;
        }

        // Clip the segment parameter range to the (shrunk) polygon interior.
        let start = segment.a();
        let direction = segment.direction();
        let mut t_min: f64 = 0.;
        let mut t_max: f64 = 1.;

        for edge in self.edges() {
            let edge_direction = edge.direction();
            let offset =
                edge_direction.perp_dot(start - edge.a()) - EPSILON * edge_direction.length();
            let slope = edge_direction.perp_dot(direction);

            if slope == 0. {
                if offset <= 0. {
                    return false;
                }
                continue;
            }

            let t = -offset / slope;
            if slope > 0. {
                t_min = t_min.max(t);
            } else {
                t_max = t_max.min(t);
            }
            if t_min >= t_max {
                return false;
            }
        }

        true
    }

    /// Returns the nearest point on the polygon boundary if `point` lies
    /// inside the polygon, otherwise returns `point` unchanged.
    pub fn closest_point_outside(&self, point: DVec2) -> DVec2 {
        if !self.contains(point) {
            return point;
        }

        let query = Point::new(point.x, point.y);
        self.edges()
            .map(|edge| {
                let segment = ParrySegment::new(
                    Point::new(edge.a().x, edge.a().y),
                    Point::new(edge.b().x, edge.b().y),
                );
                let projection = segment.project_local_point(&query, true).point;
                DVec2::new(projection.x, projection.y)
            })
            .min_by(|a, b| {
                point
                    .distance_squared(*a)
                    .total_cmp(&point.distance_squared(*b))
            })
            .unwrap_or(point)
    }
}

fn outward_normal(from: DVec2, to: DVec2) -> DVec2 {
    let direction = (to - from).normalize();
    DVec2::new(direction.y, -direction.x)
}

fn signed_area(points: &[DVec2]) -> f64 {
    let len = points.len();
    0.5 * (0..len)
        .map(|i| points[i].perp_dot(points[(i + 1) % len]))
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square(half: f64) -> ConvexPolygon {
        ConvexPolygon::from_convex_hull(&[
            DVec2::new(-half, -half),
            DVec2::new(half, -half),
            DVec2::new(half, half),
            DVec2::new(-half, half),
        ])
        .unwrap()
    }

    fn index_of(polygon: &ConvexPolygon, point: DVec2) -> usize {
        polygon.points().iter().position(|&p| p == point).unwrap()
    }

    #[test]
    fn test_from_convex_hull() {
        let polygon = ConvexPolygon::from_convex_hull(&[
            DVec2::new(1., 1.),
            DVec2::new(-1., -1.),
            DVec2::new(0., 0.),
            DVec2::new(1., -1.),
            DVec2::new(-1., 1.),
            DVec2::new(1., 1.),
        ])
        .unwrap();
        assert_eq!(polygon.points().len(), 4);
        assert!(signed_area(polygon.points()) > 0.);
        assert_abs_diff_eq!(signed_area(polygon.points()), 4., epsilon = 1e-9);

        assert!(ConvexPolygon::from_convex_hull(&[]).is_none());
        assert!(ConvexPolygon::from_convex_hull(&[DVec2::ZERO, DVec2::X]).is_none());
        assert!(ConvexPolygon::from_convex_hull(&[DVec2::ZERO, DVec2::ZERO, DVec2::X]).is_none());
        assert!(
            ConvexPolygon::from_convex_hull(&[DVec2::ZERO, DVec2::X, DVec2::new(2., 0.)])
                .is_none()
        );
        assert!(ConvexPolygon::from_convex_hull(&[
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(f64::NAN, 1.)
        ])
        .is_none());
    }

    #[test]
    fn test_inflated() {
        let polygon = square(1.);
        assert_eq!(polygon.inflated(0.).unwrap(), polygon);

        let inflated = polygon.inflated(0.5).unwrap();
        assert_eq!(inflated.points().len(), 4);
        for point in inflated.points() {
            assert_abs_diff_eq!(point.x.abs(), 1.5, epsilon = 1e-9);
            assert_abs_diff_eq!(point.y.abs(), 1.5, epsilon = 1e-9);
        }

        let deflated = polygon.inflated(-0.5).unwrap();
        for point in deflated.points() {
            assert_abs_diff_eq!(point.x.abs(), 0.5, epsilon = 1e-9);
        }

        assert!(polygon.inflated(-1.).is_none());
        assert!(polygon.inflated(-3.).is_none());
    }

    #[test]
    fn test_inflated_triangle_keeps_clearance() {
        let triangle = ConvexPolygon::from_convex_hull(&[
            DVec2::new(0., 0.),
            DVec2::new(4., 0.),
            DVec2::new(0., 3.),
        ])
        .unwrap();
        let inflated = triangle.inflated(1.).unwrap();
        for edge in inflated.edges() {
            for &vertex in triangle.points() {
                let segment = ParrySegment::new(
                    Point::new(edge.a().x, edge.a().y),
                    Point::new(edge.b().x, edge.b().y),
                );
                let distance = segment.distance_to_local_point(&Point::new(vertex.x, vertex.y), true);
                assert!(distance >= 1. - 1e-9);
            }
        }
    }

    #[test]
    fn test_contains() {
        let polygon = square(1.);
        assert!(polygon.contains(DVec2::ZERO));
        assert!(polygon.contains(DVec2::new(0.99, -0.99)));
        assert!(!polygon.contains(DVec2::new(1., 0.)));
        assert!(!polygon.contains(DVec2::new(1., 1.)));
        assert!(!polygon.contains(DVec2::new(2., 0.)));
    }

    #[test]
    fn test_tangents() {
        let polygon = square(1.);
        let lower_left = index_of(&polygon, DVec2::new(-1., -1.));
        let upper_left = index_of(&polygon, DVec2::new(-1., 1.));
        let lower_right = index_of(&polygon, DVec2::new(1., -1.));

        let tangents = polygon.tangents(DVec2::new(-5., 0.));
        assert_eq!(tangents.first(), Some(lower_left));
        assert_eq!(tangents.second(), Some(upper_left));

        assert_eq!(polygon.tangents(DVec2::ZERO), Tangents::none());
        assert_eq!(
            polygon.tangents(DVec2::new(-1., 1.)),
            Tangents::vertex(upper_left)
        );

        // On the extension of the bottom edge, the nearer end point wins.
        let tangents = polygon.tangents(DVec2::new(-5., -1.));
        assert_eq!(tangents.first(), Some(lower_left));
        assert_eq!(tangents.second(), Some(upper_left));

        // A point on an edge sees its end points.
        let tangents = polygon.tangents(DVec2::new(0., -1.));
        assert!(tangents.contains(lower_left));
        assert!(tangents.contains(lower_right));
        assert!(!tangents.is_degenerate());
    }

    #[test]
    fn test_is_tangent() {
        let polygon = square(1.);
        let lower_left = index_of(&polygon, DVec2::new(-1., -1.));
        let upper_right = index_of(&polygon, DVec2::new(1., 1.));

        assert!(polygon.is_tangent(lower_left, DVec2::new(-5., 0.)));
        assert!(polygon.is_tangent(lower_left, DVec2::new(-5., -1.)));
        assert!(!polygon.is_tangent(upper_right, DVec2::new(-5., 0.)));
        assert!(!polygon.is_tangent(lower_left, DVec2::new(-1., -1.)));
        assert!(!polygon.is_tangent(42, DVec2::new(-5., 0.)));
    }

    #[test]
    fn test_intersects() {
        let polygon = square(1.);
        let check = |a: DVec2, b: DVec2| polygon.intersects(Segment::new(a, b), polygon.tangents(a));

        // Crossing.
        assert!(check(DVec2::new(-5., 0.), DVec2::new(5., 0.)));
        assert!(check(DVec2::new(-5., 0.), DVec2::new(1., -1.)));
        assert!(check(DVec2::new(-1., -1.), DVec2::new(1., 1.)));
        assert!(check(DVec2::new(0., 0.), DVec2::new(5., 5.)));
        // Ending inside.
        assert!(check(DVec2::new(-5., 0.), DVec2::new(0., 0.)));

        // Grazing a vertex or sliding along an edge.
        assert!(!check(DVec2::new(-5., 0.), DVec2::new(-1., -1.)));
        assert!(!check(DVec2::new(-3., 1.), DVec2::new(1., -3.)));
        assert!(!check(DVec2::new(-1., -1.), DVec2::new(1., -1.)));
        assert!(!check(DVec2::new(-5., -1.), DVec2::new(5., -1.)));
        assert!(!check(DVec2::new(0., -1.), DVec2::new(0., -5.)));

        // Far away.
        assert!(!check(DVec2::new(-5., 3.), DVec2::new(5., 3.)));
        assert!(!check(DVec2::new(2., -5.), DVec2::new(2., 5.)));
    }

    #[test]
    fn test_closest_point_outside() {
        let polygon = square(1.);
        assert_eq!(
            polygon.closest_point_outside(DVec2::new(3., 0.)),
            DVec2::new(3., 0.)
        );

        let snapped = polygon.closest_point_outside(DVec2::new(0.5, 0.2));
        assert_abs_diff_eq!(snapped.x, 1., epsilon = 1e-9);
        assert_abs_diff_eq!(snapped.y, 0.2, epsilon = 1e-9);
        assert!(!polygon.contains(snapped));

        let snapped = polygon.closest_point_outside(DVec2::new(-0.1, -0.9));
        assert_abs_diff_eq!(snapped.x, -0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(snapped.y, -1., epsilon = 1e-9);
    }
}

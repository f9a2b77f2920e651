//! Shortest path representation.

#[cfg(debug_assertions)]
use approx::assert_abs_diff_eq;
use glam::DVec2;

/// A polyline path defined by a sequence of way points. Start and target
/// positions are included, the first way point is the start.
///
/// An empty path (with no way points) represents a path which was not found.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    length: f64,
    waypoints: Vec<DVec2>,
}

impl Path {
    /// Creates a path with no way points.
    pub fn empty() -> Self {
        Self {
            length: 0.,
            waypoints: Vec::new(),
        }
    }

    /// Creates a zero length path consisting of a single point.
    pub fn single(point: DVec2) -> Self {
        Self {
            length: 0.,
            waypoints: vec![point],
        }
    }

    /// Creates a new path.
    ///
    /// # Panics
    ///
    /// May panic if sum of distances of `waypoints` is not equal to provided
    /// `length`.
    pub fn new(length: f64, waypoints: Vec<DVec2>) -> Self {
        #[cfg(debug_assertions)]
        {
            assert_abs_diff_eq!(
                waypoints
                    .windows(2)
                    .map(|pair| (pair[1] - pair[0]).length())
                    .sum::<f64>(),
                length,
                epsilon = 1e-6 * length.max(1.),
            );
        }
        Self { length, waypoints }
    }

    /// Returns total Euclidean length of the path.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns complete sequence of the path way points from the start to
    /// the target.
    pub fn waypoints(&self) -> &[DVec2] {
        self.waypoints.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn into_waypoints(self) -> Vec<DVec2> {
        self.waypoints
    }
}

//! Planar geometry needed by the navigation graph: points, line segments and
//! convex obstacle polygons.
//!
//! Points are plain [`glam::DVec2`] values. Polygons are always stored
//! counter-clockwise and strictly convex.

mod polygon;
mod segment;
mod side;
mod tangents;

pub use glam::DVec2 as Point;
pub use polygon::ConvexPolygon;
pub use segment::Segment;
pub use side::{which_side, Side};
pub use tangents::Tangents;

/// Points closer than this distance to a polygon edge line are treated as
/// lying on the edge.
pub const EPSILON: f64 = 1e-7;

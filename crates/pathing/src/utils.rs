use glam::DVec2;
use ordered_float::OrderedFloat;

/// Point usable as a canonical map key. Two points are equal only if their
/// coordinates are exactly equal, except that `-0.0` equals `0.0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub(crate) struct HashablePoint(OrderedFloat<f64>, OrderedFloat<f64>);

impl HashablePoint {
    pub(crate) fn new(point: DVec2) -> Self {
        debug_assert!(!point.is_nan());
        Self(OrderedFloat(point.x), OrderedFloat(point.y))
    }
}

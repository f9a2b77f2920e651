use glam::DVec2;

/// A line segment with begin point `a` and end point `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    a: DVec2,
    b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> DVec2 {
        self.a
    }

    pub fn b(&self) -> DVec2 {
        self.b
    }

    /// Vector from `a` to `b`.
    pub fn direction(&self) -> DVec2 {
        self.b - self.a
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns the same segment with swapped end points.
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Returns minimum and maximum corner of the segment's bounding box.
    pub(crate) fn bounds(&self) -> (DVec2, DVec2) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

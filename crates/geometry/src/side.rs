//! Orientation predicates.

use glam::DVec2;

/// Returns the side at which point `new` appears relative to point `old` from
/// the perspective of `eye`. Counter-clockwise turn is [`Side::Left`].
///
/// Returns [`Side::Straight`] if `eye`, `old` and `new` are collinear
/// (including the case where `eye` coincides with any of them).
pub fn which_side(eye: DVec2, old: DVec2, new: DVec2) -> Side {
    let perp = (old - eye).perp_dot(new - eye);
    if perp > 0. {
        Side::Left
    } else if perp < 0. {
        Side::Right
    } else {
        Side::Straight
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Straight,
    Right,
}

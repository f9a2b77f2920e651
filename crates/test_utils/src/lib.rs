use glam::DVec2;
use nav_geometry::ConvexPolygon;

/// An enum to allow for safe selection of the number of generated items.
#[derive(Copy, Clone, Debug)]
pub enum NumPoints {
    Ten,
    OneHundred,
    OneThousand,
}

impl TryFrom<u32> for NumPoints {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            100 => Ok(Self::OneHundred),
            1000 => Ok(Self::OneThousand),
            _ => Err("Invalid number of points"),
        }
    }
}

impl From<&NumPoints> for usize {
    fn from(value: &NumPoints) -> Self {
        match value {
            NumPoints::Ten => 10,
            NumPoints::OneHundred => 100,
            NumPoints::OneThousand => 1000,
        }
    }
}

impl From<NumPoints> for usize {
    fn from(value: NumPoints) -> Self {
        Self::from(&value)
    }
}

/// Generates deterministic pseudo-random points.
///
/// # Arguments
/// * `number` - the selected number of points from the [NumPoints] enum.
/// * `max_value` - the max and min value for the returned point, the numbers returned will be
/// between -max_value and +max_value.
/// * `seed` - seed of the generator.
///
/// # Returns
/// A list of points with x and y between -max_value and +max_value. This is guaranteed to be
/// deterministic across calls with the same input.
pub fn random_points(number: NumPoints, max_value: f64, seed: u64) -> Vec<DVec2> {
    let number: usize = number.into();
    let rng = fastrand::Rng::with_seed(seed);

    (0..number)
        .map(|_| max_value * 2. * (DVec2::new(rng.f64(), rng.f64()) - 0.5))
        .collect()
}

/// Generates deterministic axis aligned square obstacles centered at
/// [`random_points`]. The squares may overlap.
pub fn random_squares(
    number: NumPoints,
    max_value: f64,
    half_size: f64,
    seed: u64,
) -> Vec<ConvexPolygon> {
    random_points(number, max_value, seed)
        .into_iter()
        .map(|center| square(center, half_size))
        .collect()
}

/// Returns an axis aligned square.
///
/// # Panics
///
/// Panics if `half_size` is not a positive finite number.
pub fn square(center: DVec2, half_size: f64) -> ConvexPolygon {
    let half = DVec2::splat(half_size);
    rectangle(center - half, center + half)
}

/// Returns an axis aligned rectangle.
///
/// # Panics
///
/// Panics if the rectangle has zero area.
pub fn rectangle(min: DVec2, max: DVec2) -> ConvexPolygon {
    ConvexPolygon::from_convex_hull(&[
        min,
        DVec2::new(max.x, min.y),
        max,
        DVec2::new(min.x, max.y),
    ])
    .expect("Degenerate rectangle.")
}

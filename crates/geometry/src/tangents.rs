/// Indices of the two polygon vertices where sightlines from an outside
/// point graze the polygon.
///
/// `first` keeps the polygon on the left-hand side of the sightline, `second`
/// on the right-hand side. Both are equal when the point coincides with a
/// polygon vertex and both are `None` when no tangent exists (the point lies
/// strictly inside the polygon).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tangents {
    first: Option<usize>,
    second: Option<usize>,
}

impl Tangents {
    pub fn new(first: Option<usize>, second: Option<usize>) -> Self {
        Self { first, second }
    }

    /// Tangents of a point coinciding with vertex `index`.
    pub fn vertex(index: usize) -> Self {
        Self::new(Some(index), Some(index))
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<usize> {
        self.first
    }

    pub fn second(&self) -> Option<usize> {
        self.second
    }

    /// Returns true if the two tangents do not describe two distinct
    /// vertices.
    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }

    /// Returns true if `index` is one of the tangent vertices.
    pub fn contains(&self, index: usize) -> bool {
        self.first == Some(index) || self.second == Some(index)
    }

    /// Iterates over existing tangent vertex indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.first.into_iter().chain(self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tangents() {
        let tangents = Tangents::new(Some(1), Some(3));
        assert!(!tangents.is_degenerate());
        assert!(tangents.contains(1));
        assert!(tangents.contains(3));
        assert!(!tangents.contains(2));
        assert_eq!(tangents.iter().collect::<Vec<_>>(), vec![1, 3]);

        assert!(Tangents::vertex(2).is_degenerate());
        assert!(Tangents::none().is_degenerate());
        assert_eq!(Tangents::none().iter().count(), 0);
        assert_eq!(Tangents::new(None, Some(4)).iter().collect::<Vec<_>>(), vec![4]);
    }
}

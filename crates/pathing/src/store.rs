//! Bidirectional mapping between points and small integer vertex IDs.

use ahash::AHashMap;
use glam::DVec2;

use crate::utils::HashablePoint;

/// Arena of vertex points indexed by vertex ID.
///
/// IDs of removed vertices are kept on a free list and reused (last removed
/// first) before the arena grows. The arena never shrinks.
pub(crate) struct VertexStore {
    ids: AHashMap<HashablePoint, u32>,
    points: Vec<DVec2>,
    free: Vec<u32>,
}

impl VertexStore {
    pub(crate) fn new() -> Self {
        Self {
            ids: AHashMap::new(),
            points: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Returns number of vertices currently bound to a point.
    pub(crate) fn alive(&self) -> usize {
        self.ids.len()
    }

    /// Returns ID of a registered point.
    pub(crate) fn id(&self, point: DVec2) -> Option<u32> {
        self.ids.get(&HashablePoint::new(point)).copied()
    }

    /// Returns the ID bound to `point`, binding a new or recycled ID if the
    /// point is not yet registered. The second item is true if the ID was
    /// bound by this call.
    ///
    /// # Panics
    ///
    /// Panics if the number of bound IDs would exceed `u32::MAX`.
    pub(crate) fn insert(&mut self, point: DVec2) -> (u32, bool) {
        let key = HashablePoint::new(point);
        if let Some(&id) = self.ids.get(&key) {
            return (id, false);
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.points[id as usize] = point;
                id
            }
            None => {
                let id = u32::try_from(self.points.len()).expect("Too many graph vertices.");
                self.points.push(point);
                id
            }
        };
        self.ids.insert(key, id);
        (id, true)
    }

    /// Unbinds `point` and puts its ID on the free list. Returns the freed ID
    /// or `None` if the point was not registered.
    pub(crate) fn remove(&mut self, point: DVec2) -> Option<u32> {
        let id = self.ids.remove(&HashablePoint::new(point))?;
        self.free.push(id);
        Some(id)
    }

    /// Returns the point bound to (or last bound to) vertex `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never handed out.
    pub(crate) fn point(&self, id: u32) -> DVec2 {
        self.points[id as usize]
    }
}

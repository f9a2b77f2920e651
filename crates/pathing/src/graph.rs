//! This module contains implementation of a point based visibility graph used
//! in shortest path search among obstacles.

use glam::DVec2;
use nav_geometry::Segment;

use crate::store::VertexStore;

/// Undirected weighted visibility graph.
///
/// Each graph vertex is a point in the plane, each graph edge is a straight
/// line segment between two mutually visible points weighted by its
/// Euclidean length. Edges are stored symmetrically: an edge is present in
/// the adjacency lists of both of its end vertices, with equal weight.
pub(crate) struct VisibilityGraph {
    vertices: VertexStore,
    adjacency: Vec<Vec<Neighbour>>,
}

impl VisibilityGraph {
    /// Returns a new empty visibility graph.
    pub(crate) fn new() -> Self {
        Self {
            vertices: VertexStore::new(),
            adjacency: Vec::new(),
        }
    }

    /// Returns size of the vertex ID space. All vertex IDs are smaller than
    /// this number.
    pub(crate) fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns number of vertices bound to a point.
    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices.alive()
    }

    /// Returns number of undirected edges.
    pub(crate) fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns ID of the vertex at `point`.
    pub(crate) fn id(&self, point: DVec2) -> Option<u32> {
        self.vertices.id(point)
    }

    /// Returns position of a vertex.
    pub(crate) fn point(&self, id: u32) -> DVec2 {
        self.vertices.point(id)
    }

    /// Returns ID of the vertex at `point`, creating an isolated vertex if
    /// there is none. The second item is true if the vertex was created.
    ///
    /// # Panics
    ///
    /// Panics if the number of vertex IDs would exceed `u32::MAX`.
    pub(crate) fn insert_vertex(&mut self, point: DVec2) -> (u32, bool) {
        let (id, created) = self.vertices.insert(point);
        let index = id as usize;
        if index == self.adjacency.len() {
            self.adjacency.push(Vec::new());
        }
        debug_assert!(!created || self.adjacency[index].is_empty());
        (id, created)
    }

    /// Returns all neighbours of a vertex.
    pub(crate) fn neighbours(&self, id: u32) -> &[Neighbour] {
        self.adjacency[id as usize].as_slice()
    }

    /// Connects two vertices with an edge weighted by their distance.
    ///
    /// Returns false (and does nothing) if both IDs are equal.
    pub(crate) fn add_edge(&mut self, a: u32, b: u32) -> bool {
        if a == b {
            return false;
        }
        let weight = self.point(a).distance(self.point(b));
        self.adjacency[a as usize].push(Neighbour::new(b, weight));
        self.adjacency[b as usize].push(Neighbour::new(a, weight));
        true
    }

    /// Removes a single occurrence of edge `a` - `b` from both adjacency
    /// lists. Order of the remaining neighbours is not preserved.
    pub(crate) fn remove_edge(&mut self, a: u32, b: u32) {
        swap_remove_neighbour(&mut self.adjacency[a as usize], b);
        swap_remove_neighbour(&mut self.adjacency[b as usize], a);
    }

    /// Unlinks the vertex at `point` from all its neighbours and recycles
    /// its ID.
    ///
    /// Returns the freed ID or `None` if there is no vertex at `point`.
    pub(crate) fn remove_vertex(&mut self, point: DVec2) -> Option<u32> {
        let id = self.vertices.id(point)?;
        let neighbours = std::mem::take(&mut self.adjacency[id as usize]);
        for neighbour in neighbours {
            swap_remove_neighbour(&mut self.adjacency[neighbour.id() as usize], id);
        }
        self.vertices.remove(point)
    }

    /// Returns line segments of all edges, each undirected edge exactly once
    /// (per stored edge).
    pub(crate) fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(index, neighbours)| {
                let id = index as u32;
                neighbours
                    .iter()
                    .filter(move |neighbour| neighbour.id() > id)
                    .map(move |neighbour| Segment::new(self.point(id), self.point(neighbour.id())))
            })
    }
}

fn swap_remove_neighbour(neighbours: &mut Vec<Neighbour>, id: u32) {
    if let Some(position) = neighbours.iter().position(|n| n.id() == id) {
        neighbours.swap_remove(position);
    }
}

/// A graph edge as seen from one of its end vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Neighbour {
    id: u32,
    weight: f64,
}

impl Neighbour {
    fn new(id: u32, weight: f64) -> Self {
        Self { id, weight }
    }

    /// ID of the neighbouring vertex.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Length of the edge.
    pub(crate) fn weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph() {
        let mut graph = VisibilityGraph::new();

        let (a, _) = graph.insert_vertex(DVec2::new(0., 0.));
        let (b, _) = graph.insert_vertex(DVec2::new(3., 4.));
        let (c, _) = graph.insert_vertex(DVec2::new(3., 0.));
        assert_eq!(graph.insert_vertex(DVec2::new(3., 4.)), (b, false));

        assert!(graph.add_edge(a, b));
        assert!(graph.add_edge(c, b));
        assert!(!graph.add_edge(c, c));

        assert_eq!(graph.neighbours(a), &[Neighbour::new(b, 5.)]);
        assert_eq!(
            graph.neighbours(b),
            &[Neighbour::new(a, 5.), Neighbour::new(c, 4.)]
        );
        assert_eq!(graph.neighbours(c), &[Neighbour::new(b, 4.)]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.vertex_count(), 3);

        let segments: Vec<Segment> = graph.segments().collect();
        assert_eq!(
            segments,
            vec![
                Segment::new(DVec2::new(0., 0.), DVec2::new(3., 4.)),
                Segment::new(DVec2::new(3., 4.), DVec2::new(3., 0.)),
            ]
        );
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = VisibilityGraph::new();
        let (a, _) = graph.insert_vertex(DVec2::new(0., 0.));
        let (b, _) = graph.insert_vertex(DVec2::new(1., 0.));
        let (c, _) = graph.insert_vertex(DVec2::new(0., 1.));
        graph.add_edge(a, b);
        graph.add_edge(a, c);
        graph.add_edge(a, b);

        graph.remove_edge(b, a);
        assert_eq!(graph.neighbours(b), &[Neighbour::new(a, 1.)]);
        assert_eq!(graph.neighbours(a).len(), 2);
        graph.remove_edge(a, b);
        assert_eq!(graph.neighbours(a), &[Neighbour::new(c, 1.)]);
        assert!(graph.neighbours(b).is_empty());
    }

    #[test]
    fn test_remove_vertex() {
        let mut graph = VisibilityGraph::new();
        let (a, _) = graph.insert_vertex(DVec2::new(0., 0.));
        let (b, _) = graph.insert_vertex(DVec2::new(1., 0.));
        let (c, _) = graph.insert_vertex(DVec2::new(0., 1.));
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.add_edge(c, a);

        assert_eq!(graph.remove_vertex(DVec2::new(1., 0.)), Some(b));
        assert_eq!(graph.remove_vertex(DVec2::new(1., 0.)), None);
        assert!(graph.neighbours(b).is_empty());
        assert_eq!(graph.neighbours(a), &[Neighbour::new(c, 1.)]);
        assert_eq!(graph.neighbours(c), &[Neighbour::new(a, 1.)]);
        assert_eq!(graph.id(DVec2::new(1., 0.)), None);
        assert_eq!(graph.vertex_count(), 2);

        let (d, created) = graph.insert_vertex(DVec2::new(5., 5.));
        assert!(created);
        assert_eq!(d, b);
        assert_eq!(graph.len(), 3);
    }
}

//! This module contains the global shortest path finder.

use glam::DVec2;
use nav_geometry::{ConvexPolygon, Segment};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    astar::find_path, builder::build, external::ExternalPoints, graph::VisibilityGraph,
    obstacles::Obstacles, path::Path,
};

/// Shortest path finder among convex obstacles.
///
/// The finder keeps a visibility graph built from (inflated) obstacles and a
/// batch of external points, typically current agent and goal positions,
/// which are connected to it. Paths are searched between registered points
/// only.
///
/// The finder is not internally synchronized. All mutating operations take
/// `&mut self`.
pub struct PathFinder {
    obstacles: Obstacles,
    graph: VisibilityGraph,
    external: ExternalPoints,
}

impl PathFinder {
    /// Creates a new path finder with no obstacles and no external points.
    pub fn new() -> Self {
        Self {
            obstacles: Obstacles::empty(),
            graph: VisibilityGraph::new(),
            external: ExternalPoints::new(),
        }
    }

    /// Creates a new path finder with obstacles `polygons` inflated by
    /// `inflate_margin`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Self::rebuild`].
    pub fn from_polygons(polygons: &[ConvexPolygon], inflate_margin: f64) -> Self {
        let mut finder = Self::new();
        finder.rebuild(polygons, inflate_margin);
        finder
    }

    /// Discards the whole graph, including external points, and builds a new
    /// one from `polygons` inflated by `inflate_margin`.
    ///
    /// Polygons which collapse during the inflation are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the obstacles have more than `u32::MAX` vertices.
    pub fn rebuild(&mut self, polygons: &[ConvexPolygon], inflate_margin: f64) {
        self.external.clear();
        self.obstacles = Obstacles::new(polygons, inflate_margin);
        self.graph = build(&self.obstacles);

        info!(
            "Path finder rebuilt from {} polygons ({} kept): {} vertices, {} edges",
            polygons.len(),
            self.obstacles.polygons().len(),
            self.graph.vertex_count(),
            self.graph.edge_count()
        );
    }

    /// Replaces the current set of external points with `points`.
    ///
    /// Vertices and edges of the previous set are removed from the graph.
    /// Points inside obstacles are moved to the nearest point on the
    /// obstacle boundary before they are connected.
    ///
    /// # Panics
    ///
    /// Panics if the graph would exceed `u32::MAX` vertices.
    pub fn set_external_points(&mut self, points: &[DVec2]) {
        self.external
            .replace(&mut self.graph, &self.obstacles, points);
    }

    /// Returns current external points. Points which were moved out of
    /// obstacles are returned at their new position.
    pub fn external_points(&self) -> &[DVec2] {
        self.external.points()
    }

    /// Returns the shortest path from `start` to `dest`.
    ///
    /// Both points should be registered: either vertices of the (inflated)
    /// obstacles or external points. External points moved out of obstacles
    /// are registered at their new position, see
    /// [`Self::external_points`].
    ///
    /// An empty path is returned if there is no path or if any of the points
    /// is not registered. See [`Self::try_find_path`].
    pub fn find_path(&self, start: DVec2, dest: DVec2) -> Path {
        self.try_find_path(start, dest).unwrap_or_else(|error| {
            debug!("No path from {:?} to {:?}: {}", start, dest, error);
            Path::empty()
        })
    }

    /// Returns the shortest path from `start` to `dest` or an error
    /// explaining why there is none.
    pub fn try_find_path(&self, start: DVec2, dest: DVec2) -> Result<Path, PathError> {
        let source = self.resolve(start)?;
        let target = self.resolve(dest)?;

        match find_path(&self.graph, source, target) {
            Some(path) => {
                debug!(
                    "Path of length {} from {:?} to {:?} found",
                    path.length(),
                    start,
                    dest
                );
                Ok(path)
            }
            None => Err(PathError::Unreachable {
                from: start,
                to: dest,
            }),
        }
    }

    /// Returns line segments of graph edges for visualization.
    ///
    /// # Arguments
    ///
    /// * `external_only` - if true, only edges incident to external points
    ///   are returned, each oriented from the external point. Otherwise
    ///   every edge of the graph is returned once.
    pub fn edges_for_debug(&self, external_only: bool) -> Vec<Segment> {
        if !external_only {
            return self.graph.segments().collect();
        }

        let mut ids: Vec<u32> = self
            .external
            .points()
            .iter()
            .filter_map(|&point| self.graph.id(point))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids.iter()
            .flat_map(|&id| {
                let point = self.graph.point(id);
                self.graph
                    .neighbours(id)
                    .iter()
                    .map(move |neighbour| Segment::new(point, self.graph.point(neighbour.id())))
            })
            .collect()
    }

    /// Returns number of graph vertices, including external points.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Returns number of undirected graph edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the inflated obstacles.
    pub fn polygons(&self) -> &[ConvexPolygon] {
        self.obstacles.polygons()
    }

    fn resolve(&self, point: DVec2) -> Result<u32, PathError> {
        self.graph.id(point).ok_or(PathError::UnknownPoint(point))
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PathError {
    #[error("point {0:?} is neither an obstacle vertex nor an external point")]
    UnknownPoint(DVec2),
    #[error("{to:?} is not reachable from {from:?}")]
    Unreachable { from: DVec2, to: DVec2 },
}

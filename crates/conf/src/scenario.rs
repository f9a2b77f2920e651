//! This module implements final (i.e. parsed and validated) scenario objects
//! and their building from the persisted scenario.

use glam::DVec2;
use nav_geometry::ConvexPolygon;
use thiserror::Error;

use crate::persisted;

/// A validated navigation scenario: obstacles, agent positions and path
/// queries among them.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    navigation: NavigationConf,
    obstacles: Vec<ConvexPolygon>,
    agents: Vec<DVec2>,
    queries: Vec<Query>,
}

impl Scenario {
    pub fn navigation(&self) -> &NavigationConf {
        &self.navigation
    }

    /// Obstacles as convex hulls of their configured points.
    pub fn obstacles(&self) -> &[ConvexPolygon] {
        self.obstacles.as_slice()
    }

    pub fn agents(&self) -> &[DVec2] {
        self.agents.as_slice()
    }

    pub fn queries(&self) -> &[Query] {
        self.queries.as_slice()
    }

    /// Returns agent positions followed by endpoints of all queries. Each
    /// point is included only once.
    pub fn external_points(&self) -> Vec<DVec2> {
        let mut points = Vec::with_capacity(self.agents.len() + 2 * self.queries.len());
        let candidates = self
            .agents
            .iter()
            .copied()
            .chain(self.queries.iter().flat_map(|q| [q.from(), q.to()]));

        for point in candidates {
            if !points.contains(&point) {
                points.push(point);
            }
        }
        points
    }
}

impl TryFrom<persisted::Scenario> for Scenario {
    type Error = ScenarioValidationError;

    fn try_from(persisted: persisted::Scenario) -> Result<Self, Self::Error> {
        let navigation = match persisted.navigation {
            Some(navigation) => NavigationConf::try_from(navigation)?,
            None => NavigationConf::default(),
        };

        let mut obstacles = Vec::new();
        for (index, points) in persisted.obstacles.unwrap_or_default().iter().enumerate() {
            let polygon = obstacle(points)
                .map_err(|source| ScenarioValidationError::Obstacle { index, source })?;
            obstacles.push(polygon);
        }

        let mut agents = Vec::new();
        for (index, &coords) in persisted.agents.unwrap_or_default().iter().enumerate() {
            let point =
                point(coords).map_err(|source| ScenarioValidationError::Agent { index, source })?;
            agents.push(point);
        }

        let mut queries = Vec::new();
        for (index, query) in persisted.queries.unwrap_or_default().iter().enumerate() {
            let from = point(query.from)
                .map_err(|source| ScenarioValidationError::Query { index, source })?;
            let to =
                point(query.to).map_err(|source| ScenarioValidationError::Query { index, source })?;
            queries.push(Query::new(from, to));
        }

        Ok(Self {
            navigation,
            obstacles,
            agents,
            queries,
        })
    }
}

fn obstacle(points: &[[f64; 2]]) -> Result<ConvexPolygon, ObstacleValidationError> {
    if points.len() < 3 {
        return Err(ObstacleValidationError::TooFewPoints {
            number: points.len(),
        });
    }

    let mut vertices = Vec::with_capacity(points.len());
    for (index, &coords) in points.iter().enumerate() {
        let vertex =
            point(coords).map_err(|source| ObstacleValidationError::Point { index, source })?;
        vertices.push(vertex);
    }

    ConvexPolygon::from_convex_hull(&vertices).ok_or(ObstacleValidationError::Degenerate)
}

fn point(coords: [f64; 2]) -> Result<DVec2, PointValidationError> {
    let point = DVec2::from_array(coords);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(PointValidationError::NotFinite {
            x: coords[0],
            y: coords[1],
        })
    }
}

#[derive(Error, Debug)]
pub enum ScenarioValidationError {
    #[error("inflate margin must be finite and non-negative, got {0}")]
    InflateMargin(f64),
    #[error("invalid obstacles[{index}]")]
    Obstacle {
        index: usize,
        source: ObstacleValidationError,
    },
    #[error("invalid agents[{index}]")]
    Agent {
        index: usize,
        source: PointValidationError,
    },
    #[error("invalid queries[{index}]")]
    Query {
        index: usize,
        source: PointValidationError,
    },
}

#[derive(Error, Debug)]
pub enum ObstacleValidationError {
    #[error("obstacle needs at least 3 points, got {number}")]
    TooFewPoints { number: usize },
    #[error("invalid points[{index}]")]
    Point {
        index: usize,
        source: PointValidationError,
    },
    #[error("obstacle points do not span a non-zero area")]
    Degenerate,
}

#[derive(Error, Debug)]
pub enum PointValidationError {
    #[error("point coordinates must be finite, got ({x}, {y})")]
    NotFinite { x: f64, y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConf {
    inflate_margin: f64,
}

impl NavigationConf {
    /// Clearance kept between paths and obstacles.
    pub fn inflate_margin(&self) -> f64 {
        self.inflate_margin
    }
}

impl Default for NavigationConf {
    fn default() -> Self {
        Self { inflate_margin: 0. }
    }
}

impl TryFrom<persisted::Navigation> for NavigationConf {
    type Error = ScenarioValidationError;

    fn try_from(persisted: persisted::Navigation) -> Result<Self, Self::Error> {
        let default = Self::default();
        let inflate_margin = persisted.inflate_margin.unwrap_or(default.inflate_margin);
        if !inflate_margin.is_finite() || inflate_margin < 0. {
            return Err(ScenarioValidationError::InflateMargin(inflate_margin));
        }
        Ok(Self { inflate_margin })
    }
}

/// A request for the shortest path between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Query {
    from: DVec2,
    to: DVec2,
}

impl Query {
    pub fn new(from: DVec2, to: DVec2) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> DVec2 {
        self.from
    }

    pub fn to(&self) -> DVec2 {
        self.to
    }
}

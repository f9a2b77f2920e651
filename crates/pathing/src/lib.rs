#![allow(rustdoc::private_intra_doc_links)]
//! This library implements any angle shortest path finding among convex
//! polygonal obstacles.
//!
//! Obstacles are inflated by a clearance margin and a visibility graph is
//! built from their vertices. Query points (agents and their goals) are
//! layered on top of the static graph as a batch of external points which
//! is cheap to replace every simulation tick. Paths are searched with A*.
//!
//! ```
//! use nav_pathing::{ConvexPolygon, PathFinder, Point};
//!
//! let square = ConvexPolygon::from_convex_hull(&[
//!     Point::new(-1., -1.),
//!     Point::new(1., -1.),
//!     Point::new(1., 1.),
//!     Point::new(-1., 1.),
//! ])
//! .unwrap();
//!
//! let mut finder = PathFinder::from_polygons(&[square], 0.);
//! let start = Point::new(-5., 0.);
//! let dest = Point::new(5., 0.);
//! finder.set_external_points(&[start, dest]);
//!
//! let path = finder.find_path(start, dest);
//! assert_eq!(path.waypoints().len(), 4);
//! ```

mod astar;
mod builder;
mod external;
mod finder;
mod graph;
mod obstacles;
mod path;
mod store;
mod utils;

pub use finder::{PathError, PathFinder};
pub use nav_geometry::{ConvexPolygon, Point, Segment};
pub use path::Path;

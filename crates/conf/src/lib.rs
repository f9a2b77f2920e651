//! This crate implements functionality around navigation scenarios:
//!
//! * Loading of the scenario from a YAML file.
//!
//! * Parsing, validation and provisioning of obstacles, agent positions and
//!   path queries.

mod io;
mod persisted;
mod scenario;

pub use io::load_scenario;
pub use scenario::{
    NavigationConf, ObstacleValidationError, PointValidationError, Query, Scenario,
    ScenarioValidationError,
};

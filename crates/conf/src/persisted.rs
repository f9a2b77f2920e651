//! This module contains scenario objects which can be deserialized from a
//! scenario file. It does not contain final scenario objects which must be
//! build and validated from the objects here.

use serde::Deserialize;

#[derive(Deserialize, Default)]
pub(super) struct Scenario {
    pub(super) navigation: Option<Navigation>,
    pub(super) obstacles: Option<Vec<Vec<[f64; 2]>>>,
    pub(super) agents: Option<Vec<[f64; 2]>>,
    pub(super) queries: Option<Vec<Query>>,
}

#[derive(Deserialize, Default)]
pub(super) struct Navigation {
    pub(super) inflate_margin: Option<f64>,
}

#[derive(Deserialize)]
pub(super) struct Query {
    pub(super) from: [f64; 2],
    pub(super) to: [f64; 2],
}

mod setup;

pub use setup::{init, LogGuard};

use anyhow::{Context, Result};
use async_std::{fs, path::Path};
use tracing::info;

use crate::{persisted, scenario::Scenario};

/// Loads and validates a scenario from a YAML file. A default (empty)
/// scenario is returned if the file does not exist.
pub async fn load_scenario(path: &Path) -> Result<Scenario> {
    match load_scenario_text(path).await? {
        Some(text) => {
            let persistent: persisted::Scenario =
                serde_yaml::from_str(text.as_str()).context("Failed to parse scenario")?;
            Scenario::try_from(persistent).with_context(|| {
                format!("Invalid scenario file: {}", path.to_string_lossy())
            })
        }
        None => Ok(Scenario::default()),
    }
}

/// Loads scenario file to a string. Returns Ok(None) if the scenario file
/// does not exist.
async fn load_scenario_text(path: &Path) -> Result<Option<String>> {
    if path.is_file().await {
        info!("Loading scenario from {}", path.to_string_lossy());
        fs::read_to_string(path).await.map(Some).with_context(|| {
            format!(
                "Could not load scenario file: {}",
                path.to_string_lossy(),
            )
        })
    } else {
        info!(
            "Scenario does not exist or is not a file, using an empty one: {}",
            path.to_string_lossy()
        );
        Ok(None)
    }
}

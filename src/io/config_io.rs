use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::PlannerConfig;

/// Error type for planner discovery and configuration
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("not a cadence planner: no cadence/ directory found")]
    NotAPlanner,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse cadence.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the planner by walking up from the given directory, looking
/// for a `cadence/` subdirectory with a config file.
pub fn discover_planner(start: &Path) -> Result<PathBuf, PlannerError> {
    let mut current = start.to_path_buf();
    loop {
        let planner_dir = current.join("cadence");
        if planner_dir.is_dir() && planner_dir.join("cadence.toml").exists() {
            return Ok(planner_dir);
        }
        if !current.pop() {
            return Err(PlannerError::NotAPlanner);
        }
    }
}

/// Read and parse cadence.toml from the planner directory
pub fn read_config(planner_dir: &Path) -> Result<PlannerConfig, PlannerError> {
    let config_path = planner_dir.join("cadence.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| PlannerError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: PlannerConfig = toml::from_str(&config_text)?;
    Ok(config)
}

//! Configuration for the layout pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DescriptionError;

/// Main flow direction of the base grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Layers grow along x, ranks inside a layer along y.
    #[default]
    Lr,
    /// Layers grow along y, ranks inside a layer along x.
    Tb,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LR" => Ok(Direction::Lr),
            "TB" | "TD" => Ok(Direction::Tb),
            other => Err(format!("Unknown direction '{other}'; use LR or TB")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    /// Upper bound on barycenter sweeps during crossing minimisation.
    pub crossing_passes: usize,
    /// Lay out sibling groups on the rayon thread pool.
    pub parallel: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Lr,
            crossing_passes: 24,
            parallel: false,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Read a config file, or return the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> std::io::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;

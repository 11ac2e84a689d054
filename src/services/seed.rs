use crate::models::{Donation, Resource, Shelter, Task, Victim, Volunteer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a seed fixture
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Initial registry contents, usually loaded from `config/seed.toml`
///
/// Collections keep file order, which is the order the matchers see.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub shelters: Vec<Shelter>,
    #[serde(default)]
    pub victims: Vec<Victim>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub donations: Vec<Donation>,
}

impl SeedData {
    /// Load a seed fixture from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(raw)?)
    }
}

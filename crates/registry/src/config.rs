use engine::ChampionshipPolicy;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime configuration for the registry. Loading the document (file, env,
/// request body) is the caller's concern; this layer only parses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub championship: ChampionshipPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            championship: ChampionshipPolicy::default(),
        }
    }
}

impl RegistryConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::EngineConfig;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default snapshot file, used when `--data` is not given
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    #[serde(default)]
    pub engine: Option<EngineConfig>,
}

impl Config {
    /// Engine settings with defaults filled in when the section is absent
    pub fn effective_engine(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_SCORE: f64 = 100.0;
pub const DEFAULT_TOP_N: usize = 5;

/// Engine configuration.
///
/// Both fields are optional; unset fields fall back to the reference
/// behavior (every class starts at 100, the trend charts the top five).
///
/// Example YAML:
/// ```yaml
/// engine:
///   base_score: 100
///   top_n: 5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Starting total for every class before any entries are applied
    #[serde(default)]
    pub base_score: Option<f64>,

    /// Number of top-ranked classes charted in the trend series
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_score: Some(DEFAULT_BASE_SCORE),
            top_n: Some(DEFAULT_TOP_N),
        }
    }
}

impl EngineConfig {
    pub fn base_score(&self) -> f64 {
        self.base_score.unwrap_or(DEFAULT_BASE_SCORE)
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }
}

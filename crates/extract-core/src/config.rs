//! Run configuration loaded from a YAML manifest

use crate::error::ProducerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Runtime configuration for a batch run.
///
/// The palette size and timeout budgets are deliberately configuration,
/// not constants; the defaults below are the documented ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Maximum number of assets extracted concurrently
    #[serde(default = "default_max_concurrent_assets")]
    pub max_concurrent_assets: usize,

    /// Per-asset extraction budget in seconds; an asset exceeding it is
    /// recorded as a gap-confidence extract, never a batch failure
    #[serde(default = "default_asset_timeout_secs")]
    pub asset_timeout_secs: u64,
}

fn default_max_concurrent_assets() -> usize {
    4
}

fn default_asset_timeout_secs() -> u64 {
    30
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_concurrent_assets: default_max_concurrent_assets(),
            asset_timeout_secs: default_asset_timeout_secs(),
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a YAML manifest
    pub fn from_yaml(yaml_path: impl AsRef<Path>) -> Result<Self, ProducerError> {
        let contents = std::fs::read_to_string(yaml_path.as_ref())?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ProducerError::ExecutionFailed(format!("Failed to parse YAML: {e}")))
    }

    /// Per-asset timeout as a [`Duration`]
    #[must_use]
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_concurrent_assets, 4);
        assert_eq!(config.asset_timeout_secs, 30);
        assert_eq!(config.asset_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ExtractConfig {
            max_concurrent_assets: 8,
            asset_timeout_secs: 5,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: ExtractConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.max_concurrent_assets, 8);
        assert_eq!(back.asset_timeout_secs, 5);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let back: ExtractConfig = serde_yaml::from_str("max_concurrent_assets: 2\n").unwrap();
        assert_eq!(back.max_concurrent_assets, 2);
        assert_eq!(back.asset_timeout_secs, 30);
    }
}

use anyhow::{Context, Result};
use minepredict_core::{CellCount, EngineSettings, TOTAL_CELLS, check_mine_count};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values used when a flag is not given on the command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Defaults {
    pub mines: CellCount,
    /// Seed to use when none is given; empty means generate one.
    pub seed: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            mines: 1,
            seed: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub engine: EngineSettings,
    pub defaults: Defaults,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::debug!("no config file, using defaults");
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("in config {}", path.display()))?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.engine.validate()?;
        check_mine_count(config.defaults.mines, TOTAL_CELLS)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = CliConfig::parse(
            r#"
            [engine]
            auto_interval_ms = 50

            [defaults]
            mines = 7
            seed = "house"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.auto_interval_ms, 50);
        assert_eq!(config.defaults.mines, 7);
        assert_eq!(config.defaults.seed, "house");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(CliConfig::parse("[defaults]\nmines = 25\n").is_err());
        assert!(CliConfig::parse("[engine]\nauto_interval_ms = 0\n").is_err());
    }
}

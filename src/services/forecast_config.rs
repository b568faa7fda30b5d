use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::histogram::ChartDimensions;
use crate::services::simulation_types::DEFAULT_PERCENTILES;

pub const DEFAULT_CHART_PATH: &str = "MonteCarloResults.png";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("percentile {0} is outside (0, 100]")]
    InvalidPercentile(f64),
    #[error("at least one percentile must be configured")]
    NoPercentiles,
    #[error("chart dimensions must be positive, got {width}x{height}")]
    InvalidChartDimensions { width: u32, height: u32 },
    #[error("threads must be greater than zero")]
    InvalidThreads,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub path: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Optional YAML file with run settings.
///
/// ```yaml
/// chart:
///   path: forecast.png
///   width: 1600
///   height: 900
/// percentiles: [50, 70, 85, 95]
/// seed: 42
/// threads: 4
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    pub chart: ChartSection,
    pub percentiles: Option<Vec<f64>>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl ForecastConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line; each one overrides the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub chart_path: Option<String>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    pub chart_path: String,
    pub chart_dimensions: ChartDimensions,
    pub percentiles: Vec<f64>,
    pub seed: Option<u64>,
    pub threads: usize,
}

impl ForecastSettings {
    pub fn resolve(
        config: ForecastConfig,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let defaults = ChartDimensions::default();
        let chart_dimensions = ChartDimensions {
            width: config.chart.width.unwrap_or(defaults.width),
            height: config.chart.height.unwrap_or(defaults.height),
        };
        if chart_dimensions.width == 0 || chart_dimensions.height == 0 {
            return Err(ConfigError::InvalidChartDimensions {
                width: chart_dimensions.width,
                height: chart_dimensions.height,
            });
        }

        let percentiles = config
            .percentiles
            .unwrap_or_else(|| DEFAULT_PERCENTILES.to_vec());
        if percentiles.is_empty() {
            return Err(ConfigError::NoPercentiles);
        }
        if let Some(invalid) = percentiles
            .iter()
            .find(|p| !(**p > 0.0 && **p <= 100.0))
        {
            return Err(ConfigError::InvalidPercentile(*invalid));
        }

        let threads = overrides.threads.or(config.threads).unwrap_or(1);
        if threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }

        Ok(Self {
            chart_path: overrides
                .chart_path
                .or(config.chart.path)
                .unwrap_or_else(|| DEFAULT_CHART_PATH.to_string()),
            chart_dimensions,
            percentiles,
            seed: overrides.seed.or(config.seed),
            threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn resolve_without_config_uses_defaults() {
        let settings =
            ForecastSettings::resolve(ForecastConfig::default(), ConfigOverrides::default())
                .unwrap();

        assert_eq!(settings.chart_path, DEFAULT_CHART_PATH);
        assert_eq!(settings.chart_dimensions, ChartDimensions::default());
        assert_eq!(settings.percentiles, DEFAULT_PERCENTILES.to_vec());
        assert_eq!(settings.seed, None);
        assert_eq!(settings.threads, 1);
    }

    #[test]
    fn command_line_overrides_config_file() {
        let config = ForecastConfig {
            chart: ChartSection {
                path: Some("from-config.png".to_string()),
                width: Some(800),
                height: None,
            },
            percentiles: None,
            seed: Some(1),
            threads: Some(2),
        };
        let overrides = ConfigOverrides {
            chart_path: Some("from-cli.png".to_string()),
            seed: Some(9),
            threads: None,
        };

        let settings = ForecastSettings::resolve(config, overrides).unwrap();
        assert_eq!(settings.chart_path, "from-cli.png");
        assert_eq!(settings.chart_dimensions.width, 800);
        assert_eq!(settings.chart_dimensions.height, 2000);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.threads, 2);
    }

    #[test]
    fn resolve_rejects_out_of_range_percentiles() {
        for invalid in [0.0, -5.0, 100.5] {
            let config = ForecastConfig {
                percentiles: Some(vec![50.0, invalid]),
                ..ForecastConfig::default()
            };
            let error = ForecastSettings::resolve(config, ConfigOverrides::default())
                .expect_err("expected invalid percentile");
            assert!(matches!(error, ConfigError::InvalidPercentile(p) if p == invalid));
        }
    }

    #[test]
    fn resolve_rejects_empty_percentiles_and_zero_threads() {
        let config = ForecastConfig {
            percentiles: Some(vec![]),
            ..ForecastConfig::default()
        };
        assert!(matches!(
            ForecastSettings::resolve(config, ConfigOverrides::default()),
            Err(ConfigError::NoPercentiles)
        ));

        let overrides = ConfigOverrides {
            threads: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            ForecastSettings::resolve(ForecastConfig::default(), overrides),
            Err(ConfigError::InvalidThreads)
        ));
    }

    #[test]
    fn from_yaml_file_reads_all_sections() {
        let file = assert_fs::NamedTempFile::new("forecast.yaml").unwrap();
        file.write_str(
            "chart:\n  path: out.png\n  width: 1200\n  height: 800\npercentiles: [50, 95]\nseed: 42\nthreads: 3\n",
        )
        .unwrap();

        let config = ForecastConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.chart.path.as_deref(), Some("out.png"));
        assert_eq!(config.chart.width, Some(1200));
        assert_eq!(config.chart.height, Some(800));
        assert_eq!(config.percentiles, Some(vec![50.0, 95.0]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.threads, Some(3));
    }

    #[test]
    fn from_yaml_file_rejects_unknown_keys() {
        let file = assert_fs::NamedTempFile::new("forecast.yaml").unwrap();
        file.write_str("percentile: [50]\n").unwrap();

        let error = ForecastConfig::from_yaml_file(file.path()).expect_err("expected parse error");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }
}

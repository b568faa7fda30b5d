use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::simulation_types::SimulationReport;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Yaml,
    Json,
}

impl ReportFormat {
    /// `.json` selects JSON; everything else is written as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Yaml,
        }
    }
}

pub fn serialize_report(
    report: &SimulationReport,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    report: &SimulationReport,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let contents = serialize_report(report, ReportFormat::from_path(path))?;
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

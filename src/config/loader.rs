use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// Which declarations count as observable roots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Whole program rooted at entry points
    #[default]
    Command,
    /// Exported API surface is the root set
    Library,
}

/// Configuration for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root-set mode
    pub mode: AnalysisMode,

    /// Treat test and benchmark functions as roots
    pub include_tests: bool,

    /// Report dead declarations in generated files
    pub report_generated: bool,

    /// Explicit extra roots (qualified names)
    pub roots: Vec<String>,

    /// Patterns to retain - never report as dead code
    pub retain: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::default(),
            include_tests: false,
            report_generated: false,
            roots: vec![],
            retain: vec![],
        }
    }
}

impl Config {
    pub fn command() -> Self {
        Self::default()
    }

    pub fn library() -> Self {
        Self {
            mode: AnalysisMode::Library,
            ..Self::default()
        }
    }

    pub fn with_tests(mut self) -> Self {
        self.include_tests = true;
        self
    }

    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            other => Err(Error::UnsupportedConfigFormat(other.to_string()).into()),
        }
    }
}

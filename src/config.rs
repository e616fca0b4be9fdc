use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level drought configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DroughtConfig {
    /// Distribution fitting settings.
    #[serde(default)]
    pub distribution: DistributionToml,

    /// SPI/SPEI settings.
    #[serde(default)]
    pub standardize: StandardizeToml,

    /// PDSI calibration settings.
    #[serde(default)]
    pub calibrate: CalibrateToml,
}

impl DroughtConfig {
    /// Reads the configuration at `path`, or returns defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionToml {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default)]
    pub location: LocationToml,
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

impl Default for DistributionToml {
    fn default() -> Self {
        Self {
            family: default_family(),
            location: LocationToml::default(),
            min_samples: default_min_samples(),
        }
    }
}

fn default_family() -> String {
    "gamma".to_string()
}
fn default_min_samples() -> usize {
    3
}

/// `location = "free"` or `location = 0.0`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LocationToml {
    Fixed(f64),
    Keyword(String),
}

impl Default for LocationToml {
    fn default() -> Self {
        Self::Keyword("free".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardizeToml {
    #[serde(default = "default_scales")]
    pub scales: Vec<usize>,
    #[serde(default = "default_support_margin")]
    pub support_margin: f64,
    /// Baseline parameters; when set, fitting is skipped.
    #[serde(default)]
    pub params: Option<ParamsToml>,
}

impl Default for StandardizeToml {
    fn default() -> Self {
        Self {
            scales: default_scales(),
            support_margin: default_support_margin(),
            params: None,
        }
    }
}

fn default_scales() -> Vec<usize> {
    vec![1, 3, 6, 12]
}
fn default_support_margin() -> f64 {
    0.05
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsToml {
    pub shape: f64,
    pub loc: f64,
    pub scale: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrateToml {
    #[serde(default = "default_max_iters")]
    pub max_iters: u64,
    #[serde(default = "default_sd_tolerance")]
    pub sd_tolerance: f64,
    #[serde(default = "default_restarts")]
    pub restarts: usize,
    #[serde(default)]
    pub initial: BTreeMap<String, f64>,
}

impl Default for CalibrateToml {
    fn default() -> Self {
        Self {
            max_iters: default_max_iters(),
            sd_tolerance: default_sd_tolerance(),
            restarts: default_restarts(),
            initial: BTreeMap::new(),
        }
    }
}

fn default_max_iters() -> u64 {
    5000
}
fn default_sd_tolerance() -> f64 {
    1e-12
}
fn default_restarts() -> usize {
    1
}

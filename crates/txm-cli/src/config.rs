//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty file (or no file) is a valid configuration. Command-line flags
//! take precedence over values read here.
//!
//! ```yaml
//! encoding: utf8          # or: hex
//! parallel_threshold: 1024
//! pretty: true
//! log_filter: "txm_crypto=debug"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use txm_crypto::{LeafEncoding, TreeOptions, PARALLEL_THRESHOLD};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// How transaction ids become leaf bytes.
    #[serde(default)]
    pub encoding: LeafEncoding,
    /// Minimum level width folded on the rayon pool (builds with the
    /// `parallel` feature only).
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// `tracing` filter directive used when no `-v` flag is given.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_parallel_threshold() -> usize {
    PARALLEL_THRESHOLD
}

fn default_pretty() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            encoding: LeafEncoding::default(),
            parallel_threshold: default_parallel_threshold(),
            pretty: default_pretty(),
            log_filter: None,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Parse a YAML document. Blank documents yield the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Tree options derived from this configuration.
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// The leaf encoding, with a command-line override applied.
    pub fn encoding_with(&self, flag: Option<EncodingArg>) -> LeafEncoding {
        flag.map(LeafEncoding::from).unwrap_or(self.encoding)
    }
}

/// `--encoding` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// Hash the id text as UTF-8.
    Utf8,
    /// Decode the id as hex and hash the bytes.
    Hex,
}

impl From<EncodingArg> for LeafEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => LeafEncoding::Utf8,
            EncodingArg::Hex => LeafEncoding::Hex,
        }
    }
}

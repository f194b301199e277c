//! # Transaction Id Input
//!
//! Reads the ordered id list a subcommand works on. Two shapes are accepted:
//!
//! - a JSON array of strings (what `GET /block/<hash>/txids` returns), detected
//!   by a leading `[`;
//! - plain text, one id per line. Lines are trimmed and blank lines skipped.
//!
//! A path of `-` reads stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use txm_crypto::{encode_leaves, LeafEncoding};

use crate::config::{CliConfig, EncodingArg};

/// Where the transaction ids come from.
#[derive(Args, Debug, Clone)]
pub struct LeafSource {
    /// File with the ordered transaction ids (`-` for stdin).
    pub leaves: PathBuf,

    /// How each id becomes leaf bytes. Defaults to the config value (utf8).
    #[arg(long, value_enum)]
    pub encoding: Option<EncodingArg>,
}

/// Ids and the leaf bytes derived from them, in input order.
#[derive(Debug, Clone)]
pub struct LoadedLeaves {
    /// The ids as read.
    pub ids: Vec<String>,
    /// `ids` converted under `encoding`.
    pub leaves: Vec<Vec<u8>>,
    /// Encoding applied.
    pub encoding: LeafEncoding,
}

/// Read the whole of `path`, or stdin for `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Split input text into ids.
pub fn parse_ids(content: &str) -> Result<Vec<String>> {
    if content.trim_start().starts_with('[') {
        let ids: Vec<String> =
            serde_json::from_str(content).context("expected a JSON array of transaction ids")?;
        return Ok(ids);
    }
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Read, split, and encode the ids named by `source`.
pub fn load_leaves(source: &LeafSource, config: &CliConfig) -> Result<LoadedLeaves> {
    let content = read_source(&source.leaves)?;
    let ids = parse_ids(&content)
        .with_context(|| format!("failed to parse ids: {}", source.leaves.display()))?;
    let encoding = config.encoding_with(source.encoding);
    let leaves = encode_leaves(&ids, encoding)
        .with_context(|| format!("failed to encode ids as {}", encoding.as_str()))?;
    tracing::info!(
        source = %source.leaves.display(),
        count = ids.len(),
        encoding = encoding.as_str(),
        "loaded transaction ids"
    );
    Ok(LoadedLeaves {
        ids,
        leaves,
        encoding,
    })
}

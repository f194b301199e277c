//! # Root Subcommand
//!
//! Prints the Merkle root of a transaction id list.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use txm_crypto::{build_root_with, Digest, MerkleTree};

use crate::config::CliConfig;
use crate::input::{load_leaves, LeafSource};

/// Arguments for `txm root`.
#[derive(Args, Debug)]
pub struct RootArgs {
    #[command(flatten)]
    pub source: LeafSource,

    /// Print a JSON report instead of the bare root.
    #[arg(long)]
    pub json: bool,

    /// Include every tree level in the JSON report (implies `--json`).
    #[arg(long)]
    pub levels: bool,
}

/// What `txm root --json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct RootReport {
    pub root: Digest,
    pub leaf_count: usize,
    /// Only present with `--levels`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Vec<Digest>>>,
}

/// Compute the report for `args`.
pub fn root_report(args: &RootArgs, config: &CliConfig) -> Result<RootReport> {
    let loaded = load_leaves(&args.source, config)?;
    let opts = config.tree_options();
    if args.levels {
        let tree = MerkleTree::from_leaves_with(&loaded.leaves, &opts)
            .context("cannot build Merkle tree")?;
        return Ok(RootReport {
            root: tree.root(),
            leaf_count: tree.leaf_count(),
            levels: Some(tree.levels().to_vec()),
        });
    }
    let root = build_root_with(&loaded.leaves, &opts).context("cannot compute Merkle root")?;
    Ok(RootReport {
        root,
        leaf_count: loaded.leaves.len(),
        levels: None,
    })
}

/// Entry point for `txm root`.
pub fn run_root(args: &RootArgs, config: &CliConfig) -> Result<u8> {
    let report = root_report(args, config)?;
    if args.json || args.levels {
        println!("{}", crate::render_json(&report, config.pretty)?);
    } else {
        println!("{}", report.root);
    }
    Ok(0)
}

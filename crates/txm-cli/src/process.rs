//! # Process Subcommand
//!
//! The end-to-end block step: compute the root of a transaction list, build
//! the proof for one transaction, verify that proof against the root, and
//! print all of it as one JSON report.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use txm_crypto::{verify, Digest, MerkleTree, Proof};

use crate::config::CliConfig;
use crate::input::{load_leaves, LeafSource};
use crate::prove::locate_target;

/// Arguments for `txm process`.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub source: LeafSource,

    /// Transaction id to prove.
    #[arg(long)]
    pub tx: String,
}

/// What `txm process` prints.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub root: Digest,
    pub leaf_count: usize,
    pub tx: String,
    /// Position of the first matching transaction.
    pub index: usize,
    /// Number of times the id appears; above 1 the proof covers `index` only.
    pub occurrences: usize,
    pub proof: Proof,
    pub valid: bool,
}

/// Build the report for `args`.
pub fn process(args: &ProcessArgs, config: &CliConfig) -> Result<ProcessReport> {
    let loaded = load_leaves(&args.source, config)?;
    let tree = MerkleTree::from_leaves_with(&loaded.leaves, &config.tree_options())
        .context("cannot build Merkle tree")?;
    let location = locate_target(&loaded.leaves, &args.tx, loaded.encoding)?;
    let proof = tree
        .proof(location.index)
        .with_context(|| format!("cannot build proof for index {}", location.index))?;
    let valid = verify(&tree.root(), &loaded.leaves[location.index], &proof);

    tracing::info!(
        root = %tree.root(),
        index = location.index,
        steps = proof.len(),
        valid,
        "processed transaction list"
    );

    Ok(ProcessReport {
        root: tree.root(),
        leaf_count: tree.leaf_count(),
        tx: args.tx.clone(),
        index: location.index,
        occurrences: location.occurrences,
        proof,
        valid,
    })
}

/// Entry point for `txm process`.
pub fn run_process(args: &ProcessArgs, config: &CliConfig) -> Result<u8> {
    let report = process(args, config)?;
    println!("{}", crate::render_json(&report, config.pretty)?);
    Ok(if report.valid {
        0
    } else {
        crate::EXIT_INVALID_PROOF
    })
}

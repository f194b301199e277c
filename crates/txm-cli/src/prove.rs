//! # Prove Subcommand
//!
//! Emits the inclusion proof for one transaction as JSON:
//! `[{"sibling": "<hex>", "side": "left"|"right"}, ...]`.
//!
//! The target is chosen by position (`--index`) or by id (`--tx`). Lookup
//! by id proves the first occurrence; when the id appears more than once a
//! warning names the count so the ambiguity is never silent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use txm_crypto::{build_proof_with, encode_leaf, locate_leaf, LeafEncoding, LeafLocation, Proof};

use crate::config::CliConfig;
use crate::input::{load_leaves, LeafSource};

/// Arguments for `txm prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    #[command(flatten)]
    pub source: LeafSource,

    /// Zero-based position of the transaction to prove.
    #[arg(long, conflicts_with = "tx", required_unless_present = "tx")]
    pub index: Option<usize>,

    /// Transaction id to prove (first occurrence).
    #[arg(long)]
    pub tx: Option<String>,

    /// Write the proof here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Resolve `--tx` to a position, warning on duplicates.
pub(crate) fn locate_target(
    leaves: &[Vec<u8>],
    tx: &str,
    encoding: LeafEncoding,
) -> Result<LeafLocation> {
    let target = encode_leaf(tx, encoding)
        .with_context(|| format!("cannot encode target transaction {tx}"))?;
    let location = locate_leaf(leaves, &target)
        .with_context(|| format!("transaction {tx} is not in the list"))?;
    if location.is_ambiguous() {
        tracing::warn!(
            tx,
            index = location.index,
            occurrences = location.occurrences,
            "transaction id appears more than once; proving the first occurrence"
        );
    }
    Ok(location)
}

/// Build the proof selected by `args`.
pub fn prove(args: &ProveArgs, config: &CliConfig) -> Result<(usize, Proof)> {
    let loaded = load_leaves(&args.source, config)?;
    let index = match (&args.tx, args.index) {
        (Some(tx), _) => locate_target(&loaded.leaves, tx, loaded.encoding)?.index,
        (None, Some(index)) => index,
        (None, None) => anyhow::bail!("either --index or --tx is required"),
    };
    let proof = build_proof_with(&loaded.leaves, index, &config.tree_options())
        .with_context(|| format!("cannot build proof for index {index}"))?;
    Ok((index, proof))
}

/// Entry point for `txm prove`.
pub fn run_prove(args: &ProveArgs, config: &CliConfig) -> Result<u8> {
    let (index, proof) = prove(args, config)?;
    let rendered = crate::render_json(&proof, config.pretty)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write proof: {}", path.display()))?;
            tracing::info!(index, steps = proof.len(), out = %path.display(), "wrote proof");
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}

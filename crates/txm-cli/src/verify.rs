//! # Verify Subcommand
//!
//! Checks an inclusion proof against a root without the transaction list.
//! Prints `valid` and exits 0, or prints `invalid` and exits
//! [`EXIT_INVALID_PROOF`](crate::EXIT_INVALID_PROOF). A root or proof file
//! that cannot be parsed is an error (exit 1), not an invalid proof.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use txm_core::Digest;
use txm_crypto::{compute_root, encode_leaf, proof_from_json};

use crate::config::{CliConfig, EncodingArg};
use crate::input::read_source;

/// Arguments for `txm verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Claimed Merkle root (64 hex chars).
    #[arg(long)]
    pub root: String,

    /// Transaction id whose inclusion is claimed.
    #[arg(long)]
    pub tx: String,

    /// Proof JSON file (`-` for stdin).
    #[arg(long)]
    pub proof: PathBuf,

    /// How the id becomes leaf bytes. Defaults to the config value (utf8).
    #[arg(long, value_enum)]
    pub encoding: Option<EncodingArg>,
}

/// Outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    /// Root the proof actually folds to.
    pub computed_root: Digest,
}

/// Parse inputs and check the proof.
pub fn check(args: &VerifyArgs, config: &CliConfig) -> Result<Verdict> {
    let root: Digest = args
        .root
        .parse()
        .with_context(|| format!("invalid root: {}", args.root))?;
    let content = read_source(&args.proof)?;
    let proof = proof_from_json(&content)
        .with_context(|| format!("invalid proof JSON: {}", args.proof.display()))?;
    let target = encode_leaf(&args.tx, config.encoding_with(args.encoding))
        .with_context(|| format!("cannot encode transaction {}", args.tx))?;

    let computed_root = compute_root(&target, &proof);
    Ok(Verdict {
        valid: computed_root == root,
        computed_root,
    })
}

/// Entry point for `txm verify`.
pub fn run_verify(args: &VerifyArgs, config: &CliConfig) -> Result<u8> {
    let verdict = check(args, config)?;
    if verdict.valid {
        println!("valid");
        Ok(0)
    } else {
        tracing::info!(computed_root = %verdict.computed_root, claimed_root = %args.root, "proof does not reach the claimed root");
        println!("invalid");
        Ok(crate::EXIT_INVALID_PROOF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txm_crypto::{build_proof, build_root, proof_to_json};

    struct Fixture {
        _dir: tempfile::TempDir,
        proof_path: PathBuf,
        root: String,
    }

    fn fixture(leaves: &[&str], index: usize) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let proof_path = dir.path().join("proof.json");
        let proof = build_proof(leaves, index).unwrap();
        std::fs::write(&proof_path, proof_to_json(&proof).unwrap()).unwrap();
        Fixture {
            _dir: dir,
            proof_path,
            root: build_root(leaves).unwrap().to_hex(),
        }
    }

    fn args(f: &Fixture, tx: &str) -> VerifyArgs {
        VerifyArgs {
            root: f.root.clone(),
            tx: tx.to_string(),
            proof: f.proof_path.clone(),
            encoding: None,
        }
    }

    #[test]
    fn valid_proof() {
        let f = fixture(&["a", "b", "c"], 2);
        let verdict = check(&args(&f, "c"), &CliConfig::default()).unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.computed_root.to_hex(), f.root);
        assert_eq!(run_verify(&args(&f, "c"), &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn wrong_tx_is_invalid_not_error() {
        let f = fixture(&["a", "b", "c"], 2);
        let verdict = check(&args(&f, "b"), &CliConfig::default()).unwrap();
        assert!(!verdict.valid);
        assert_eq!(
            run_verify(&args(&f, "b"), &CliConfig::default()).unwrap(),
            crate::EXIT_INVALID_PROOF
        );
    }

    #[test]
    fn malformed_root_is_error() {
        let f = fixture(&["a", "b"], 0);
        let mut a = args(&f, "a");
        a.root = "not-hex".to_string();
        let err = check(&a, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid root"));
    }

    #[test]
    fn malformed_proof_is_error() {
        let f = fixture(&["a", "b"], 0);
        std::fs::write(&f.proof_path, r#"[{"sibling":"00","side":"left"}]"#).unwrap();
        let err = check(&args(&f, "a"), &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid proof JSON"));
    }

    #[test]
    fn uppercase_root_accepted() {
        let f = fixture(&["a", "b"], 1);
        let mut a = args(&f, "b");
        a.root = f.root.to_uppercase();
        assert!(check(&a, &CliConfig::default()).unwrap().valid);
    }
}

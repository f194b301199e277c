//! # Inclusion Proof Verification
//!
//! Replays a proof against a claimed root. Needs only the target leaf, the
//! proof, and the root; never the rest of the leaf set.
//!
//! Verification never errors. A proof for the wrong leaf, the wrong tree,
//! or with any tampered step simply yields `false`.

use tracing::trace;
use txm_core::Digest;

use crate::hasher::{leaf_digest, node_digest};
use crate::proof::{ProofStep, Side};

/// Fold `proof` upward starting from `leaf_digest(target)`.
///
/// Returns the root the proof commits to.
pub fn compute_root(target: impl AsRef<[u8]>, proof: &[ProofStep]) -> Digest {
    proof
        .iter()
        .fold(leaf_digest(target), |acc, step| match step.side {
            Side::Left => node_digest(&step.sibling, &acc),
            Side::Right => node_digest(&acc, &step.sibling),
        })
}

/// Check that `target` is included under `root` according to `proof`.
pub fn verify(root: &Digest, target: impl AsRef<[u8]>, proof: &[ProofStep]) -> bool {
    let computed = compute_root(target, proof);
    let valid = computed == *root;
    trace!(proof_len = proof.len(), valid, "verified inclusion proof");
    valid
}

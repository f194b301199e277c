//! # Inclusion Proof Generation
//!
//! Walks the same level-folding loop as [`crate::tree`] while recording, for
//! one tracked leaf, the sibling digest and its side at every level.
//!
//! At a level where the tracked node sits at position `pos`:
//!
//! - `pos` even: the sibling is `level[pos + 1]`, or the node itself when it
//!   is the unpaired last digest. Recorded side is [`Side::Right`].
//! - `pos` odd: the sibling is `level[pos - 1]`. Recorded side is
//!   [`Side::Left`].
//!
//! The tracked position then becomes `pos / 2` for the next level.
//!
//! ## Wire Format
//!
//! A proof serializes as
//! `[{"sibling": "<64 hex>", "side": "left" | "right"}, ...]`,
//! ordered from the leaf level up.

use serde::{Deserialize, Serialize};
use tracing::debug;
use txm_core::{Digest, MerkleError};

use crate::tree::{fold_level_with, hash_leaves, TreeOptions};

/// Which side of the accumulated hash a sibling is applied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// `parent = node_digest(sibling, acc)`.
    Left,
    /// `parent = node_digest(acc, sibling)`.
    Right,
}

impl Side {
    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// The opposite side.
    pub fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofStep {
    /// The digest to fold with at this level.
    pub sibling: Digest,
    /// Where the sibling sits relative to the accumulated hash.
    pub side: Side,
}

/// An inclusion proof: one step per level, leaf level first.
pub type Proof = Vec<ProofStep>;

/// Result of locating a leaf by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafLocation {
    /// Position of the first leaf equal to the target.
    pub index: usize,
    /// How many leaves carry the same content. Anything above 1 means the
    /// proof only covers the first occurrence.
    pub occurrences: usize,
}

impl LeafLocation {
    /// Whether the target content appears more than once.
    pub fn is_ambiguous(&self) -> bool {
        self.occurrences > 1
    }
}

/// The step for the node at `pos` in `level`.
fn step_at(level: &[Digest], pos: usize) -> ProofStep {
    if pos % 2 == 0 {
        let sibling = level.get(pos + 1).unwrap_or(&level[pos]);
        ProofStep {
            sibling: *sibling,
            side: Side::Right,
        }
    } else {
        ProofStep {
            sibling: level[pos - 1],
            side: Side::Left,
        }
    }
}

fn check_index(len: usize, index: usize) -> Result<(), MerkleError> {
    if len == 0 {
        return Err(MerkleError::EmptyInput);
    }
    if index >= len {
        return Err(MerkleError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Build the inclusion proof for the leaf at `target_index`.
///
/// Fails with [`MerkleError::EmptyInput`] for an empty sequence and
/// [`MerkleError::IndexOutOfRange`] when the index is past the end.
pub fn build_proof<T>(leaves: &[T], target_index: usize) -> Result<Proof, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    build_proof_with(leaves, target_index, &TreeOptions::default())
}

/// [`build_proof`] with explicit options.
pub fn build_proof_with<T>(
    leaves: &[T],
    target_index: usize,
    opts: &TreeOptions,
) -> Result<Proof, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    check_index(leaves.len(), target_index)?;

    let mut level = hash_leaves(leaves, opts)?;
    let mut pos = target_index;
    let mut proof = Proof::new();

    while level.len() > 1 {
        proof.push(step_at(&level, pos));
        level = fold_level_with(&level, opts);
        pos /= 2;
    }

    debug!(
        leaf_count = leaves.len(),
        target_index,
        proof_len = proof.len(),
        "built inclusion proof"
    );
    Ok(proof)
}

/// Read the proof for `index` out of precomputed levels.
pub(crate) fn path_from_levels(levels: &[Vec<Digest>], index: usize) -> Result<Proof, MerkleError> {
    let len = levels.first().map_or(0, Vec::len);
    check_index(len, index)?;

    let mut pos = index;
    let mut proof = Proof::with_capacity(levels.len().saturating_sub(1));
    for level in levels.iter().take_while(|level| level.len() > 1) {
        proof.push(step_at(level, pos));
        pos /= 2;
    }
    Ok(proof)
}

/// Find the first leaf whose content equals `target`.
///
/// Duplicated content is reported through [`LeafLocation::occurrences`]
/// rather than resolved silently.
pub fn locate_leaf<T>(leaves: &[T], target: impl AsRef<[u8]>) -> Result<LeafLocation, MerkleError>
where
    T: AsRef<[u8]>,
{
    if leaves.is_empty() {
        return Err(MerkleError::EmptyInput);
    }
    let target = target.as_ref();
    let mut found: Option<LeafLocation> = None;
    for (i, leaf) in leaves.iter().enumerate() {
        if <T as AsRef<[u8]>>::as_ref(leaf) != target {
            continue;
        }
        match found.as_mut() {
            Some(location) => location.occurrences += 1,
            None => {
                found = Some(LeafLocation {
                    index: i,
                    occurrences: 1,
                })
            }
        }
    }
    found.ok_or(MerkleError::TargetNotFound)
}

/// Locate `target` by content and build its proof.
pub fn build_proof_for_leaf<T>(
    leaves: &[T],
    target: impl AsRef<[u8]>,
) -> Result<(LeafLocation, Proof), MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    let location = locate_leaf(leaves, target)?;
    if location.is_ambiguous() {
        debug!(
            index = location.index,
            occurrences = location.occurrences,
            "target content is duplicated; proving first occurrence"
        );
    }
    let proof = build_proof(leaves, location.index)?;
    Ok((location, proof))
}

/// Serialize a proof to its JSON wire form.
pub fn proof_to_json(proof: &[ProofStep]) -> Result<String, serde_json::Error> {
    serde_json::to_string(proof)
}

/// Parse a proof from its JSON wire form.
///
/// Malformed siblings or unknown side tags are parse errors, not a failed
/// verification.
pub fn proof_from_json(json: &str) -> Result<Proof, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{leaf_digest, node_digest};
    use crate::tree::MerkleTree;

    fn h(s: &str) -> Digest {
        leaf_digest(s)
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        assert!(build_proof(&["tx0"], 0).unwrap().is_empty());
    }

    #[test]
    fn test_two_leaf_proofs() {
        let leaves = ["a", "b"];
        assert_eq!(
            build_proof(&leaves, 0).unwrap(),
            vec![ProofStep {
                sibling: h("b"),
                side: Side::Right
            }]
        );
        assert_eq!(
            build_proof(&leaves, 1).unwrap(),
            vec![ProofStep {
                sibling: h("a"),
                side: Side::Left
            }]
        );
    }

    #[test]
    fn test_odd_leaf_pairs_with_itself() {
        let leaves = ["a", "b", "c"];
        let proof = build_proof(&leaves, 2).unwrap();
        assert_eq!(proof.len(), 2);
        assert_eq!(
            proof[0],
            ProofStep {
                sibling: h("c"),
                side: Side::Right
            }
        );
        assert_eq!(
            proof[1],
            ProofStep {
                sibling: node_digest(&h("a"), &h("b")),
                side: Side::Left
            }
        );
    }

    #[test]
    fn test_proof_length_is_ceil_log2() {
        for n in 1..=33usize {
            let leaves: Vec<String> = (0..n).map(|i| format!("tx{i}")).collect();
            let expected = n.next_power_of_two().trailing_zeros() as usize;
            for idx in [0, n / 2, n - 1] {
                assert_eq!(build_proof(&leaves, idx).unwrap().len(), expected, "n={n}");
            }
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let empty: Vec<&str> = vec![];
        assert_eq!(build_proof(&empty, 0), Err(MerkleError::EmptyInput));
    }

    #[test]
    fn test_index_out_of_range() {
        let leaves = ["a", "b", "c"];
        assert_eq!(
            build_proof(&leaves, 3),
            Err(MerkleError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(build_proof(&leaves, 100).is_err());
    }

    #[test]
    fn test_tree_proof_matches_direct_proof() {
        let leaves: Vec<String> = (0..19).map(|i| format!("tx{i}")).collect();
        let tree = MerkleTree::from_leaves(&leaves).unwrap();
        for idx in 0..leaves.len() {
            assert_eq!(tree.proof(idx).unwrap(), build_proof(&leaves, idx).unwrap());
        }
        assert!(tree.proof(19).is_err());
    }

    #[test]
    fn test_locate_leaf_first_occurrence() {
        let leaves = ["a", "b", "a", "c", "a"];
        let loc = locate_leaf(&leaves, "a").unwrap();
        assert_eq!(loc.index, 0);
        assert_eq!(loc.occurrences, 3);
        assert!(loc.is_ambiguous());

        let loc = locate_leaf(&leaves, "c").unwrap();
        assert_eq!(loc, LeafLocation { index: 3, occurrences: 1 });
        assert!(!loc.is_ambiguous());
    }

    #[test]
    fn test_locate_leaf_missing() {
        assert_eq!(locate_leaf(&["a", "b"], "z"), Err(MerkleError::TargetNotFound));
        let empty: Vec<&str> = vec![];
        assert_eq!(locate_leaf(&empty, "a"), Err(MerkleError::EmptyInput));
    }

    #[test]
    fn test_build_proof_for_leaf() {
        let leaves = ["a", "b", "c", "d"];
        let (loc, proof) = build_proof_for_leaf(&leaves, "c").unwrap();
        assert_eq!(loc.index, 2);
        assert_eq!(proof, build_proof(&leaves, 2).unwrap());
    }

    #[test]
    fn test_json_wire_format() {
        let proof = build_proof(&["a", "b"], 0).unwrap();
        let json = proof_to_json(&proof).unwrap();
        assert_eq!(json, format!(r#"[{{"sibling":"{}","side":"right"}}]"#, h("b").to_hex()));
        assert_eq!(proof_from_json(&json).unwrap(), proof);
    }

    #[test]
    fn test_json_rejects_bad_side_and_sibling() {
        let sib = h("b").to_hex();
        assert!(proof_from_json(&format!(r#"[{{"sibling":"{sib}","side":"up"}}]"#)).is_err());
        assert!(proof_from_json(r#"[{"sibling":"abc","side":"left"}]"#).is_err());
        assert!(proof_from_json(&format!(r#"[{{"sibling":"{sib}"}}]"#)).is_err());
        assert_eq!(proof_from_json("[]").unwrap(), Proof::new());
    }

    #[test]
    fn test_side_flip_and_display() {
        assert_eq!(Side::Left.flip(), Side::Right);
        assert_eq!(Side::Right.flip(), Side::Left);
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.as_str(), "right");
    }
}

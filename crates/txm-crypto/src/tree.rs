//! # Merkle Tree Construction
//!
//! Builds the level-by-level hash pyramid from an ordered leaf sequence.
//!
//! ## Algorithm
//!
//! - Level 0 is `leaf_digest(leaf)` for every leaf, in input order.
//! - Each next level pairs `(level[i], level[i + 1])` left to right. When a
//!   level has odd length, its last digest is paired with itself.
//! - Folding stops when one digest remains: the root.
//!
//! A single leaf is its own root; nothing is folded.
//!
//! The self-duplication rule is part of the commitment. Promoting the odd
//! node unchanged would produce different roots for every odd-sized level.
//!
//! ## Parallelism
//!
//! With the `parallel` feature, leaf hashing and any level of at least
//! [`TreeOptions::parallel_threshold`] digests are computed on the rayon
//! pool. Each level is fully collected before the next one starts.

use tracing::{debug, trace};
use txm_core::{Digest, MerkleError};

use crate::hasher::{leaf_digest, node_digest};
use crate::proof::{path_from_levels, Proof};

/// Level length at which folding switches to the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 1024;

/// Per-call tuning knobs. These never change the resulting digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Minimum level length folded in parallel. Ignored without the
    /// `parallel` feature.
    pub parallel_threshold: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

fn fold_pair(pair: &[Digest]) -> Digest {
    let left = &pair[0];
    let right = pair.get(1).unwrap_or(left);
    node_digest(left, right)
}

/// Fold one level into the next, duplicating a trailing odd digest.
pub fn fold_level(level: &[Digest]) -> Vec<Digest> {
    level.chunks(2).map(fold_pair).collect()
}

pub(crate) fn fold_level_with(level: &[Digest], opts: &TreeOptions) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    if level.len() >= opts.parallel_threshold {
        use rayon::prelude::*;
        return level.par_chunks(2).map(fold_pair).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = opts;
    fold_level(level)
}

/// Hash every leaf into level 0.
pub(crate) fn hash_leaves<T>(leaves: &[T], opts: &TreeOptions) -> Result<Vec<Digest>, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    if leaves.is_empty() {
        return Err(MerkleError::EmptyInput);
    }
    #[cfg(feature = "parallel")]
    if leaves.len() >= opts.parallel_threshold {
        use rayon::prelude::*;
        return Ok(leaves.par_iter().map(leaf_digest).collect());
    }
    #[cfg(not(feature = "parallel"))]
    let _ = opts;
    Ok(leaves.iter().map(leaf_digest).collect())
}

/// Compute the Merkle root of an ordered leaf sequence.
///
/// Fails with [`MerkleError::EmptyInput`] when `leaves` is empty.
pub fn build_root<T>(leaves: &[T]) -> Result<Digest, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    build_root_with(leaves, &TreeOptions::default())
}

/// [`build_root`] with explicit options.
pub fn build_root_with<T>(leaves: &[T], opts: &TreeOptions) -> Result<Digest, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    let mut level = hash_leaves(leaves, opts)?;
    let mut depth = 0usize;
    while level.len() > 1 {
        level = fold_level_with(&level, opts);
        depth += 1;
        trace!(depth, width = level.len(), "folded level");
    }
    match level.as_slice() {
        [root] => {
            debug!(leaf_count = leaves.len(), depth, root = %root, "computed merkle root");
            Ok(*root)
        }
        _ => Err(MerkleError::EmptyInput),
    }
}

/// Compute every level of the tree, leaves first and root last.
pub fn build_levels<T>(leaves: &[T]) -> Result<Vec<Vec<Digest>>, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    build_levels_with(leaves, &TreeOptions::default())
}

/// [`build_levels`] with explicit options.
pub fn build_levels_with<T>(leaves: &[T], opts: &TreeOptions) -> Result<Vec<Vec<Digest>>, MerkleError>
where
    T: AsRef<[u8]> + Sync,
{
    let mut levels = vec![hash_leaves(leaves, opts)?];
    while let Some(top) = levels.last() {
        if top.len() <= 1 {
            break;
        }
        let next = fold_level_with(top, opts);
        levels.push(next);
    }
    Ok(levels)
}

/// A fully materialised Merkle tree.
///
/// Holds every level so that the root and any number of proofs can be read
/// without rehashing. Built once from a leaf sequence; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` are the leaf digests; the last level holds the root.
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build the tree for `leaves`.
    pub fn from_leaves<T>(leaves: &[T]) -> Result<Self, MerkleError>
    where
        T: AsRef<[u8]> + Sync,
    {
        Self::from_leaves_with(leaves, &TreeOptions::default())
    }

    /// Build the tree for `leaves` with explicit options.
    pub fn from_leaves_with<T>(leaves: &[T], opts: &TreeOptions) -> Result<Self, MerkleError>
    where
        T: AsRef<[u8]> + Sync,
    {
        let levels = build_levels_with(leaves, opts)?;
        debug!(
            leaf_count = leaves.len(),
            depth = levels.len() - 1,
            "built merkle tree"
        );
        Ok(Self { levels })
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        // Construction guarantees a final level of exactly one digest.
        self.levels[self.levels.len() - 1][0]
    }

    /// All levels, leaf digests first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of fold steps between the leaves and the root. This is also
    /// the length of every proof.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<Proof, MerkleError> {
        path_from_levels(&self.levels, index)
    }
}

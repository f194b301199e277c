//! # txm-crypto: Transaction Merkle Engine
//!
//! Commits to an ordered list of transaction ids with a binary Merkle tree
//! and proves membership of individual ids against that commitment:
//!
//! - **Hasher** ([`hasher`]): SHA-256 over leaf bytes, and over the
//!   concatenated lowercase-hex text of two child digests.
//! - **TreeBuilder** ([`tree`]): level-by-level folding to the root, with
//!   odd levels closed by pairing the last digest with itself.
//! - **ProofGenerator** ([`proof`]): sibling/side path for one leaf.
//! - **ProofVerifier** ([`verify`]): replays a path against a root.
//!
//! ```
//! use txm_crypto::{build_proof, build_root, verify};
//!
//! let txids = ["tx0", "tx1", "tx2"];
//! let root = build_root(&txids).unwrap();
//! let proof = build_proof(&txids, 2).unwrap();
//! assert!(verify(&root, "tx2", &proof));
//! ```
//!
//! Every call rebuilds what it needs from its arguments; nothing is cached
//! or shared between calls.
//!
//! ## Crate Policy
//!
//! - Depends only on `txm-core` internally.
//! - No mocking of hashing in tests; all tests use real SHA-256.
//! - No `unsafe`.

pub mod hasher;
pub mod leaf;
pub mod proof;
pub mod tree;
pub mod verify;

pub use hasher::{leaf_digest, node_digest};
pub use leaf::{decode_hex_leaf, encode_leaf, encode_leaves, LeafEncoding};
pub use proof::{
    build_proof, build_proof_for_leaf, build_proof_with, locate_leaf, proof_from_json,
    proof_to_json, LeafLocation, Proof, ProofStep, Side,
};
pub use tree::{
    build_levels, build_root, build_root_with, fold_level, MerkleTree, TreeOptions,
    PARALLEL_THRESHOLD,
};
pub use txm_core::{Digest, MerkleError};
pub use verify::{compute_root, verify};

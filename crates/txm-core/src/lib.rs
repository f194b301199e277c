//! # txm-core: Foundational Types for the Transaction Merkle Engine
//!
//! This crate defines the value types shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`Digest` newtype.** Every hash in the system is a 32-byte [`Digest`],
//!    never a bare `String`. The lowercase-hex text form is produced by
//!    [`Digest::to_hex()`] and parsed by [`Digest::from_hex()`], so a
//!    malformed hash is rejected at the boundary rather than deep inside a
//!    fold.
//!
//! 2. **Structured errors.** [`MerkleError`] names every way a tree or proof
//!    computation can refuse to run. A proof that does not verify is not an
//!    error; it is a `false` verdict.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `txm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use digest::{Digest, DIGEST_HEX_LEN, DIGEST_LEN};
pub use error::{DigestError, MerkleError};

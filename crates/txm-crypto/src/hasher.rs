//! # Leaf and Node Hashing
//!
//! The two hash functions the tree is built from:
//!
//! - Leaf: `SHA256(leaf_bytes)`. Text leaves are hashed over their UTF-8 bytes.
//! - Node: `SHA256(hex(left) || hex(right))`.
//!
//! ## Interoperability Invariant
//!
//! Node hashing concatenates the two 64-char lowercase hex *strings* (128
//! ASCII bytes), not the 64 raw digest bytes. Roots already published by
//! the transaction-ordering tools were computed this way; hashing raw bytes
//! instead would produce a different, incompatible root for every tree with
//! more than one leaf.

use sha2::{Digest as _, Sha256};
use txm_core::{Digest, DIGEST_HEX_LEN, DIGEST_LEN};

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Compute SHA-256 of raw bytes.
fn sha256_raw(b: &[u8]) -> Digest {
    let hash = Sha256::digest(b);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hash);
    Digest::from_bytes(out)
}

/// Write the lowercase hex form of `d` into `buf`.
fn write_hex(d: &Digest, buf: &mut [u8]) {
    for (i, byte) in d.as_bytes().iter().enumerate() {
        buf[2 * i] = HEX_CHARS[usize::from(byte >> 4)];
        buf[2 * i + 1] = HEX_CHARS[usize::from(byte & 0x0f)];
    }
}

/// Hash a leaf item.
pub fn leaf_digest(item: impl AsRef<[u8]>) -> Digest {
    sha256_raw(item.as_ref())
}

/// Hash two child digests into their parent.
///
/// The preimage is `left.to_hex()` followed by `right.to_hex()`.
pub fn node_digest(left: &Digest, right: &Digest) -> Digest {
    let mut preimage = [0u8; 2 * DIGEST_HEX_LEN];
    write_hex(left, &mut preimage[..DIGEST_HEX_LEN]);
    write_hex(right, &mut preimage[DIGEST_HEX_LEN..]);
    sha256_raw(&preimage)
}

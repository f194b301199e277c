//! # Leaf Encoding
//!
//! Turns transaction-id strings into the bytes that get hashed. The default
//! is the id's UTF-8 text, which is what existing roots were computed over.
//! Hex decoding is available for callers that commit to raw id bytes.

use serde::{Deserialize, Serialize};
use txm_core::MerkleError;

/// How a textual leaf becomes bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafEncoding {
    /// Hash the UTF-8 bytes of the text as-is.
    #[default]
    Utf8,
    /// Decode the text as hex (optional `0x` prefix) and hash the bytes.
    Hex,
}

impl LeafEncoding {
    /// Returns the config/CLI tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Hex => "hex",
        }
    }
}

/// Decode a hex leaf into bytes.
///
/// Whitespace around the value and a leading `0x` are ignored. Fails with
/// [`MerkleError::InvalidInput`] on odd length or a non-hex character.
pub fn decode_hex_leaf(text: &str) -> Result<Vec<u8>, MerkleError> {
    let text = text.trim();
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.len() % 2 != 0 {
        return Err(MerkleError::InvalidInput(format!(
            "odd-length hex leaf ({} chars)",
            digits.len()
        )));
    }
    digits
        .as_bytes()
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            // from_str_radix would accept a leading '+'.
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return Err(MerkleError::InvalidInput(format!(
                    "invalid hex at offset {}",
                    2 * i
                )));
            }
            let s = std::str::from_utf8(pair)
                .map_err(|e| MerkleError::InvalidInput(format!("invalid hex: {e}")))?;
            u8::from_str_radix(s, 16)
                .map_err(|e| MerkleError::InvalidInput(format!("invalid hex at {}: {e}", 2 * i)))
        })
        .collect()
}

/// Convert every id into leaf bytes under `encoding`.
pub fn encode_leaves<S: AsRef<str>>(
    ids: &[S],
    encoding: LeafEncoding,
) -> Result<Vec<Vec<u8>>, MerkleError> {
    ids.iter()
        .map(|id| encode_leaf(id.as_ref(), encoding))
        .collect()
}

/// Convert one id into leaf bytes under `encoding`.
pub fn encode_leaf(id: &str, encoding: LeafEncoding) -> Result<Vec<u8>, MerkleError> {
    match encoding {
        LeafEncoding::Utf8 => Ok(id.as_bytes().to_vec()),
        LeafEncoding::Hex => decode_hex_leaf(id),
    }
}

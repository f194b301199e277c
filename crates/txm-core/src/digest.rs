//! # Digest: Fixed-Size Hash Values
//!
//! Defines [`Digest`], the 32-byte SHA-256 output that every leaf, internal
//! node, root, and proof sibling is expressed in.
//!
//! ## Text Form
//!
//! The canonical text form is exactly 64 lowercase hex characters. This is
//! also the form that gets hashed when two digests are folded into a parent
//! node, so [`Digest::to_hex()`] is part of the commitment scheme, not just
//! a display helper.
//!
//! Parsing is lenient about case and surrounding whitespace and strict about
//! everything else: the result is always normalised to lowercase on output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DigestError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a digest's hex text form.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A 32-byte hash value.
///
/// Serializes as its 64-character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-char hex string.
    ///
    /// Leading and trailing whitespace is ignored; upper-case hex digits are
    /// accepted.
    pub fn from_hex(hex: &str) -> Result<Self, DigestError> {
        let hex = hex.trim();
        if hex.len() != DIGEST_HEX_LEN {
            return Err(DigestError::InvalidLength(hex.len()));
        }
        let mut out = [0u8; DIGEST_LEN];
        for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
            let hi = nibble(pair[0]).ok_or(DigestError::InvalidHex {
                position: 2 * i,
                character: pair[0] as char,
            })?;
            let lo = nibble(pair[1]).ok_or(DigestError::InvalidHex {
                position: 2 * i + 1,
                character: pair[1] as char,
            })?;
            out[i] = (hi << 4) | lo;
        }
        Ok(Self(out))
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_hex_roundtrip_known_value() {
        let d = Digest::from_hex(ABC_SHA256).unwrap();
        assert_eq!(d.as_bytes()[0], 0xba);
        assert_eq!(d.as_bytes()[31], 0xad);
        assert_eq!(d.to_hex(), ABC_SHA256);
    }

    #[test]
    fn test_display_matches_to_hex() {
        let d = Digest::from_hex(ABC_SHA256).unwrap();
        assert_eq!(d.to_string(), d.to_hex());
        assert_eq!(d.to_string().len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_uppercase_and_whitespace_normalised() {
        let upper = format!("  {}\n", ABC_SHA256.to_uppercase());
        let d: Digest = upper.parse().unwrap();
        assert_eq!(d.to_hex(), ABC_SHA256);
    }

    #[test]
    fn test_wrong_length_rejected() {
        match Digest::from_hex("aabb") {
            Err(DigestError::InvalidLength(4)) => {}
            other => panic!("expected InvalidLength(4), got {other:?}"),
        }
        assert!(Digest::from_hex(&"0".repeat(65)).is_err());
        assert!(Digest::from_hex("").is_err());
    }

    #[test]
    fn test_non_hex_character_reports_position() {
        let mut bad = ABC_SHA256.to_string();
        bad.replace_range(5..6, "g");
        match Digest::from_hex(&bad) {
            Err(DigestError::InvalidHex { position, character }) => {
                assert_eq!(position, 5);
                assert_eq!(character, 'g');
            }
            other => panic!("expected InvalidHex, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_as_hex_string() {
        let d = Digest::from_hex(ABC_SHA256).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{ABC_SHA256}\""));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_serde_rejects_malformed_hex() {
        assert!(serde_json::from_str::<Digest>("\"zz\"").is_err());
        assert!(serde_json::from_str::<Digest>("42").is_err());
    }

    #[test]
    fn test_ordering_follows_bytes() {
        let lo = Digest::from_bytes([0u8; DIGEST_LEN]);
        let hi = Digest::from_bytes([0xffu8; DIGEST_LEN]);
        assert!(lo < hi);
    }
}

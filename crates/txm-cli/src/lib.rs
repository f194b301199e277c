//! # txm-cli: Transaction Merkle Command-Line Interface
//!
//! Feeds ordered transaction id lists to `txm-crypto` and prints what it
//! returns. Ids come from a local file or stdin, either as the JSON array a
//! block explorer's `/block/<hash>/txids` endpoint returns or as one id per
//! line.
//!
//! ## Subcommands
//!
//! - `txm root`: Merkle root of a transaction list.
//! - `txm prove`: Inclusion proof for one transaction, by index or id.
//! - `txm verify`: Check a proof against a root.
//! - `txm process`: Root, proof, and self-verification in one report.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers return a
//!   serializable report and the `run_*` wrappers print it.
//! - No hashing logic here; everything delegates to `txm-crypto`.

pub mod config;
pub mod input;
pub mod process;
pub mod prove;
pub mod root;
pub mod verify;

use anyhow::Result;
use serde::Serialize;

/// Exit code for a proof that ran but did not verify.
pub const EXIT_INVALID_PROOF: u8 = 2;

/// Render `value` as JSON, pretty-printed or compact.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_json_compact_and_pretty() {
        let value = serde_json::json!({"a": [1, 2]});
        assert_eq!(render_json(&value, false).unwrap(), r#"{"a":[1,2]}"#);
        assert!(render_json(&value, true).unwrap().contains('\n'));
    }

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<root::RootArgs>();
        let _ = std::any::type_name::<prove::ProveArgs>();
        let _ = std::any::type_name::<verify::VerifyArgs>();
        let _ = std::any::type_name::<process::ProcessArgs>();
    }
}

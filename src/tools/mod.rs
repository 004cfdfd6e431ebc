//! Helpers shared with the ingestion tooling: hex conversion and one-shot
//! block / transaction downloads.
//!
//! The download helpers talk to the daemon directly without the allow-list.
//! They are for trusted callers only and are not wired into the gateway.

pub mod fetch;
pub mod hex;

pub use self::fetch::{download_block, download_raw_transaction_verbose};
pub use self::hex::{bytes_to_hex, hex_to_bytes};

use crate::utils::Result;

/// Lower-case hex, two digits per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string (either case). Odd length or non-hex digits are rejected.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

//! FaceLock - Byte / Hex Helpers
//!
//! Conversions shared by the container metadata and the perceptual hash.

use crate::error::{FaceLockError, FaceLockResult};

/// Lowercase hex encoding of a byte slice
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex text into bytes
pub fn hex_to_bytes(text: &str) -> FaceLockResult<Vec<u8>> {
    hex::decode(text).map_err(|e| FaceLockError::MalformedMetadata(e.to_string()))
}

/// Decode hex text into a fixed-size array, rejecting any other length
pub fn hex_to_array<const N: usize>(text: &str) -> FaceLockResult<[u8; N]> {
    let bytes = hex_to_bytes(text)?;
    bytes.as_slice().try_into().map_err(|_| {
        FaceLockError::MalformedMetadata(format!(
            "expected {} bytes, got {}",
            N,
            bytes.len()
        ))
    })
}

/// Concatenate buffers into one
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Pack a bit vector into hex, 4 bits per digit, most significant bit first.
///
/// A trailing group shorter than 4 bits is padded with zeros.
pub fn bits_to_hex(bits: &[bool]) -> String {
    bits.chunks(4)
        .map(|nibble| {
            let n = nibble
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &bit)| acc | (u32::from(bit) << (3 - i)));
            char::from_digit(n, 16).unwrap_or('0')
        })
        .collect()
}

/// Unpack hex text into a bit vector of `4 * text.len()` bits
pub fn hex_to_bits(text: &str) -> FaceLockResult<Vec<bool>> {
    let mut bits = Vec::with_capacity(text.len() * 4);
    for c in text.chars() {
        let n = c
            .to_digit(16)
            .ok_or_else(|| FaceLockError::InvalidHash(format!("not a hex digit: {:?}", c)))?;
        for shift in (0..4).rev() {
            bits.push((n >> shift) & 1 == 1);
        }
    }
    Ok(bits)
}

/// Human-readable byte count (`512 B`, `1.5 KB`, `3.0 MB`, ...)
pub fn pretty_bytes(num: u64) -> String {
    if num < 1024 {
        return format!("{} B", num);
    }
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    let mut value = num as f64;
    let mut unit = 0;
    value /= 1024.0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

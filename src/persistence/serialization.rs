//! Serialization utilities: bincode for snapshots, JSON for datasets and manifests.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Encode data to bincode bytes.
pub fn to_bincode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| SearchError::SerializationError(e.to_string()))
}

/// Decode data from bincode bytes.
pub fn from_bincode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| SearchError::SerializationError(e.to_string()))
}

/// Encode data to JSON bytes.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SearchError::SerializationError(e.to_string()))
}

/// Decode data from JSON bytes.
pub fn from_json<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SearchError::SerializationError(e.to_string()))
}

/// Prefix `payload` with its CRC32 (little endian).
pub fn frame_with_checksum(payload: Vec<u8>) -> Vec<u8> {
    let crc = crc32fast::hash(&payload);
    let mut framed = Vec::with_capacity(payload.len() + 4);
    framed.extend_from_slice(&crc.to_le_bytes());
    framed.extend_from_slice(&payload);
    framed
}

/// Strip and verify the CRC32 prefix written by [`frame_with_checksum`].
pub fn unframe_checked(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < 4 {
        return Err(SearchError::SerializationError(format!(
            "frame of {} bytes is too short",
            bytes.len()
        )));
    }
    let (header, payload) = bytes.split_at(4);
    let expected = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let actual = crc32fast::hash(payload);
    if expected != actual {
        return Err(SearchError::ChecksumMismatch { expected, actual });
    }
    Ok(payload)
}

//! `manifest.json`'s optional `key` override, used to pin an extension id
//! to a public key other than the one that actually signs the CRX.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::ziputil;

const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, Deserialize)]
struct Manifest {
    key: Option<String>,
}

/// Reads `manifest.json`'s `key` field from an unpacked extension
/// directory. Returns `Ok(None)` if the manifest has no `key` field.
pub fn key_from_dir(dir: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(dir.join(MANIFEST_FILENAME))?;
    let manifest: Manifest = serde_json::from_slice(&bytes)?;
    Ok(manifest.key)
}

/// Reads `manifest.json`'s `key` field out of an in-memory ZIP payload.
/// Returns `Ok(None)` if the ZIP has no manifest or the manifest has no
/// `key` field.
pub fn key_from_zip(zip_bytes: &[u8]) -> Result<Option<String>> {
    match ziputil::read_entry(zip_bytes, MANIFEST_FILENAME)? {
        Some(bytes) => {
            let manifest: Manifest = serde_json::from_slice(&bytes)?;
            Ok(manifest.key)
        }
        None => Ok(None),
    }
}

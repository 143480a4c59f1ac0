//! Id derivation across all three source shapes (directory, ZIP, CRX3).
//! Grounded on `original_source/id.go`, generalized per spec.md §4.E and
//! the explicit manifest-vs-header precedence decision in §10.

use std::fs;
use std::path::Path;

use crate::classify;
use crate::crxfile;
use crate::error::{CrxError, Result};
use crate::header;
use crate::id;
use crate::manifest;

/// Derives the 32-character textual extension id for a directory, ZIP, or
/// CRX3 source.
///
/// A directory or ZIP source has only the manifest `key` to go on
/// (**KeyNotInManifest** if absent). A CRX3 source prefers the manifest
/// `key` when present; otherwise its `crx_id` is read directly out of the
/// envelope's `SignedData`, with no re-hashing.
pub fn derive_id(path: &Path) -> Result<String> {
    if classify::is_dir(path) {
        let key = manifest::key_from_dir(path)?.ok_or(CrxError::KeyNotInManifest)?;
        let spki = id::id_from_public_key_bytes(key.as_bytes())?;
        return Ok(id::encode_id_textual(&id::derive_crx_id(&spki)));
    }

    if classify::is_crx3(path) {
        let (header_bytes, zip_bytes) = crxfile::read_parts(path)?;
        if let Some(key) = manifest::key_from_zip(&zip_bytes)? {
            let spki = id::id_from_public_key_bytes(key.as_bytes())?;
            return Ok(id::encode_id_textual(&id::derive_crx_id(&spki)));
        }
        let decoded = header::decode_header(&header_bytes)?;
        let signed_data = header::decode_signed_data(
            decoded
                .signed_header_data
                .as_deref()
                .ok_or_else(|| CrxError::MalformedHeader("missing signed_header_data".into()))?,
        )?;
        let crx_id = signed_data
            .crx_id
            .ok_or_else(|| CrxError::MalformedHeader("missing crx_id".into()))?;
        return Ok(id::encode_id_textual(&crx_id));
    }

    if classify::is_zip(path) {
        let zip_bytes = fs::read(path)?;
        let key = manifest::key_from_zip(&zip_bytes)?.ok_or(CrxError::KeyNotInManifest)?;
        let spki = id::id_from_public_key_bytes(key.as_bytes())?;
        return Ok(id::encode_id_textual(&id::derive_crx_id(&spki)));
    }

    Err(CrxError::UnknownFileExtension(path.to_path_buf()))
}

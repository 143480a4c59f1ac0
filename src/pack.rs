//! Pack: directory or ZIP → signed CRX3. Mirrors the state machine in
//! spec.md §4.E and `original_source/pack.go::Pack`.

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use rsa::RsaPrivateKey;

use crate::classify;
use crate::envelope;
use crate::error::{CrxError, Result};
use crate::header;
use crate::id;
use crate::keys;
use crate::signer;
use crate::ziputil;

const CRX_EXT: &str = "crx";
const ZIP_EXT: &str = "zip";

/// Packs `src` (a directory or a `.zip` file) into a CRX3 at `dst`.
///
/// `dst` of `None` (or an empty path) derives the destination from `src`
/// by replacing a trailing `.zip` with `.crx`, or appending `.crx`. A
/// `None` `private_key` generates a fresh key at the configured default
/// size and, on success, writes it beside the output as `<dst>.pem`.
///
/// Returns the path the CRX3 was written to.
pub fn pack(src: &Path, dst: Option<&Path>, private_key: Option<RsaPrivateKey>) -> Result<PathBuf> {
    if src.as_os_str().is_empty() {
        return Err(CrxError::PathNotFound(src.to_path_buf()));
    }

    let explicit_dst = dst.filter(|p| !p.as_os_str().is_empty());
    if let Some(d) = explicit_dst {
        if d.extension().map_or(true, |e| !e.eq_ignore_ascii_case(CRX_EXT)) {
            return Err(CrxError::UnknownFileExtension(d.to_path_buf()));
        }
    }
    let dst_path = match explicit_dst {
        Some(d) => d.to_path_buf(),
        None => derive_destination(src),
    };

    log::debug!("pack: reading source {}", src.display());
    let zip_bytes = read_source_zip_bytes(src)?;

    let (key, generated) = match private_key {
        Some(k) => (k, false),
        None => (keys::generate_key(None)?, true),
    };

    log::debug!("pack: deriving public key and crx_id");
    let public_key_der = keys::public_key_spki_der(&key)?;
    let crx_id = id::derive_crx_id(&public_key_der);
    let signed_data = header::build_signed_data(&crx_id);

    log::debug!("pack: signing payload");
    let signature = signer::sign(&key, &signed_data, &zip_bytes)?;
    let header_bytes = header::build_header(public_key_der, signature, signed_data);

    log::debug!("pack: writing envelope to {}", dst_path.display());
    if let Some(parent) = dst_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let out_file = File::create(&dst_path)?;
    envelope::assemble_envelope(&header_bytes, Cursor::new(&zip_bytes), out_file)?;

    if generated {
        let pem_path = with_suffix(&dst_path, ".pem");
        log::debug!("pack: persisting generated key to {}", pem_path.display());
        std::fs::write(&pem_path, keys::save_key(&key)?)?;
    }

    Ok(dst_path)
}

fn read_source_zip_bytes(src: &Path) -> Result<Vec<u8>> {
    if classify::is_dir(src) {
        ziputil::zip_dir(src)
    } else if classify::is_zip(src) {
        let bytes = std::fs::read(src)?;
        // Validate it opens cleanly before we sign and embed it.
        zip::ZipArchive::new(Cursor::new(&bytes))?;
        Ok(bytes)
    } else {
        Err(CrxError::UnknownFileExtension(src.to_path_buf()))
    }
}

fn derive_destination(src: &Path) -> PathBuf {
    if src.extension().map_or(false, |e| e.eq_ignore_ascii_case(ZIP_EXT)) {
        src.with_extension(CRX_EXT)
    } else {
        let mut s = src.as_os_str().to_os_string();
        s.push(".");
        s.push(CRX_EXT);
        PathBuf::from(s)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

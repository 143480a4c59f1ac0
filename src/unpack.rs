//! Unpack: CRX3 → plain ZIP or exploded directory. Grounded on
//! `original_source/unpack.go`.

use std::path::{Path, PathBuf};

use crate::crxfile;
use crate::error::Result;
use crate::ziputil;

/// Validates `src` as a CRX3 file and extracts its ZIP payload to `dest`
/// as a directory tree.
pub fn unpack(src: &Path, dest: &Path) -> Result<()> {
    let (_header_bytes, zip_bytes) = crxfile::read_parts(src)?;
    log::debug!("unpack: extracting {} into {}", src.display(), dest.display());
    ziputil::unzip_to(&zip_bytes, dest)
}

/// Validates `src` as a CRX3 file and writes its ZIP payload out verbatim,
/// without exploding it into a directory.
pub fn to_zip(src: &Path, dest: &Path) -> Result<PathBuf> {
    let (_header_bytes, zip_bytes) = crxfile::read_parts(src)?;
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(dest, &zip_bytes)?;
    Ok(dest.to_path_buf())
}

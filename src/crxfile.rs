//! Shared "open a CRX3, split envelope, read payload" helper used by
//! `unpack` and `pubkey`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::classify;
use crate::envelope;
use crate::error::{CrxError, Result};

/// Validates the envelope and returns `(header_bytes, zip_bytes)`.
pub fn read_parts(path: &Path) -> Result<(Vec<u8>, Vec<u8>)> {
    if !classify::is_crx3(path) {
        return Err(CrxError::UnsupportedFormat(format!(
            "{} is not a CRX3 file",
            path.display()
        )));
    }
    let file = File::open(path)?;
    let total_len = file.metadata()?.len();
    let (header_bytes, mut payload) = envelope::split_envelope(BufReader::new(file), Some(total_len))?;
    let mut zip_bytes = Vec::new();
    payload.read_to_end(&mut zip_bytes)?;
    Ok((header_bytes, zip_bytes))
}

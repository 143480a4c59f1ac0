//! Cheap, read-a-few-bytes classification of a source path: directory,
//! ZIP, or CRX3. Grounded on `original_source/os.go`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::envelope;

const ZIP_SIGNATURES: [[u8; 4]; 3] = [*b"PK\x03\x04", *b"PK\x05\x06", *b"PK\x07\x08"];

pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

pub fn is_zip(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut buf = [0u8; 4];
    if file.read_exact(&mut buf).is_err() {
        return false;
    }
    ZIP_SIGNATURES.contains(&buf)
}

pub fn is_crx3(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut buf = [0u8; 12];
    if file.read_exact(&mut buf).is_err() {
        return false;
    }
    &buf[0..4] == envelope::MAGIC
        && u32::from_le_bytes(buf[4..8].try_into().unwrap()) == envelope::FORMAT_VERSION
}

use std::path::PathBuf;

use thiserror::Error;

/// Every way a CRX3 codec operation can fail.
#[derive(Debug, Error)]
pub enum CrxError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("unknown file extension: {0}")]
    UnknownFileExtension(PathBuf),

    #[error("unsupported format: expected CRX3 magic/version, got {0}")]
    UnsupportedFormat(String),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("malformed zip payload: {0}")]
    MalformedZip(#[from] zip::result::ZipError),

    #[error("illegal path in archive: {0}")]
    IllegalPath(PathBuf),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid key size: {0} (must be 2048, 3072, or 4096)")]
    InvalidKeySize(usize),

    #[error("private key not found")]
    PrivateKeyNotFound,

    #[error("key not in manifest.json")]
    KeyNotInManifest,

    #[error("bad status from web store: {0}")]
    BadStatus(String),

    #[error("extension id not specified")]
    ExtensionIdNotSpecified,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protobuf decode error: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CrxError>;

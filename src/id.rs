//! The 16-byte `crx_id` and its 32-character `a`–`p` textual rendering.
//!
//! Grounded on `original_source/id.go`: the alphabet is the first 16
//! letters of the English alphabet standing in for hex digits 0–f, a
//! Chromium convention that must be preserved unchanged.

use rsa::pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};

use crate::error::{CrxError, Result};

const CRX_ID_LEN: usize = 16;
const MIN_SPKI_LEN: usize = 64;

/// `crx_id = SHA256(SPKI(pub))[0..16]`.
pub fn derive_crx_id(spki_der: &[u8]) -> [u8; CRX_ID_LEN] {
    let digest = Sha256::digest(spki_der);
    let mut id = [0u8; CRX_ID_LEN];
    id.copy_from_slice(&digest[..CRX_ID_LEN]);
    id
}

/// Renders 16 raw bytes as 32 lowercase `a`–`p` characters: hex-encode,
/// then map each hex digit `d` to the letter `'a' + d`.
pub fn encode_id_textual(id: &[u8]) -> String {
    let mut out = String::with_capacity(id.len() * 2);
    for byte in id {
        out.push((b'a' + (byte >> 4)) as char);
        out.push((b'a' + (byte & 0x0f)) as char);
    }
    out
}

/// Accepts SPKI in raw base64, PEM (`PUBLIC KEY` or `RSA PUBLIC KEY`), or
/// DER form, and returns normalized SPKI DER. Fails with `InvalidKey` if
/// the decoded SPKI is implausibly short.
pub fn id_from_public_key_bytes(buf: &[u8]) -> Result<Vec<u8>> {
    let der = normalize_public_key(buf)?;
    if der.len() < MIN_SPKI_LEN {
        return Err(CrxError::InvalidKey(format!(
            "public key too short: {} bytes",
            der.len()
        )));
    }
    Ok(der)
}

fn normalize_public_key(buf: &[u8]) -> Result<Vec<u8>> {
    if let Ok(block) = pem::parse(buf) {
        return match block.tag() {
            "PUBLIC KEY" => renormalize_spki(block.contents()),
            "RSA PUBLIC KEY" => pkcs1_to_spki(block.contents()),
            other => Err(CrxError::InvalidKey(format!("unsupported PEM label {other}"))),
        };
    }

    if let Ok(text) = std::str::from_utf8(buf) {
        let trimmed = text.trim();
        let looks_like_base64 = !trimmed.is_empty()
            && trimmed
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='));
        if looks_like_base64 {
            use base64::{engine::general_purpose::STANDARD, Engine as _};
            if let Ok(decoded) = STANDARD.decode(trimmed) {
                return renormalize_spki(&decoded);
            }
        }
    }

    renormalize_spki(buf)
}

fn renormalize_spki(der: &[u8]) -> Result<Vec<u8>> {
    let public =
        RsaPublicKey::from_public_key_der(der).map_err(|e| CrxError::InvalidKey(e.to_string()))?;
    public
        .to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CrxError::InvalidKey(e.to_string()))
}

fn pkcs1_to_spki(pkcs1_der: &[u8]) -> Result<Vec<u8>> {
    let public = RsaPublicKey::from_pkcs1_der(pkcs1_der)
        .map_err(|e| CrxError::InvalidKey(e.to_string()))?;
    public
        .to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CrxError::InvalidKey(e.to_string()))
}

/// PEM-wraps an SPKI DER public key as a PKCS#1 `RSA PUBLIC KEY` block,
/// the format the CRX header proof is exported in.
pub fn spki_to_pkcs1_pem(spki_der: &[u8]) -> Result<Vec<u8>> {
    let public =
        RsaPublicKey::from_public_key_der(spki_der).map_err(|e| CrxError::InvalidKey(e.to_string()))?;
    let pkcs1_der = public
        .to_pkcs1_der()
        .map_err(|e| CrxError::InvalidKey(e.to_string()))?;
    let block = pem::Pem::new("RSA PUBLIC KEY", pkcs1_der.as_bytes().to_vec());
    Ok(pem::encode(&block).into_bytes())
}

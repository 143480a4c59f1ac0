//! Public-key extraction, covering CRX3, ZIP, and directory sources.
//! Grounded on `original_source/id.go` and `original_source/extension.go`
//! for the envelope-reading path, and on the manifest-first behavior
//! documented in `original_source/crx3/commands/id.go` and
//! `original_source/crx3/commands/pubkey.go` ("the public key is searched
//! for first in the manifest file, and if not found, the search continues
//! in the extension header"). The output format follows the source: a
//! `manifest.json` `key` override is returned verbatim (it's already a
//! base64 string the extension author chose to pin), while a CRX3 header
//! proof is re-wrapped as a PKCS#1 `RSA PUBLIC KEY` PEM block, matching
//! `original_source/pubkey.go::publicKeyToPEM`. Directory or ZIP sources
//! only have the manifest path available at all.

use std::fs;
use std::path::Path;

use crate::classify;
use crate::crxfile;
use crate::error::{CrxError, Result};
use crate::header;
use crate::id;
use crate::manifest;

/// Resolves the public key for `path` (a CRX3 file, a ZIP, or an unpacked
/// extension directory).
///
/// A `manifest.json` `key` override, when present, always takes
/// precedence over a CRX3's header proof and is returned as its raw
/// base64 string, verbatim. A CRX3 header proof, when no override
/// applies, is returned PEM-wrapped as a PKCS#1 `RSA PUBLIC KEY` block.
pub fn public_key_for_source(path: &Path) -> Result<Vec<u8>> {
    if classify::is_dir(path) {
        return match manifest::key_from_dir(path)? {
            Some(key) => Ok(key.into_bytes()),
            None => Err(CrxError::KeyNotInManifest),
        };
    }

    if classify::is_crx3(path) {
        let (header_bytes, zip_bytes) = crxfile::read_parts(path)?;
        if let Some(key) = manifest::key_from_zip(&zip_bytes)? {
            return Ok(key.into_bytes());
        }
        let decoded = header::decode_header(&header_bytes)?;
        let proof = header::first_proof(&decoded)?;
        let spki_der = proof
            .public_key
            .clone()
            .ok_or_else(|| CrxError::MalformedHeader("proof has no public_key".into()))?;
        return id::spki_to_pkcs1_pem(&spki_der);
    }

    if classify::is_zip(path) {
        let zip_bytes = fs::read(path)?;
        return match manifest::key_from_zip(&zip_bytes)? {
            Some(key) => Ok(key.into_bytes()),
            None => Err(CrxError::KeyNotInManifest),
        };
    }

    Err(CrxError::UnknownFileExtension(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{envelope, header as hdr, id, keys, signer, ziputil};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn sample_crx(manifest_body: &[u8]) -> (tempfile::TempDir, PathBuf, Vec<u8>) {
        let work = tempdir().unwrap();
        let ext_dir = work.path().join("ext");
        fs::create_dir(&ext_dir).unwrap();
        fs::write(ext_dir.join("manifest.json"), manifest_body).unwrap();

        let zip_bytes = ziputil::zip_dir(&ext_dir).unwrap();
        let key = keys::generate_key(Some(2048)).unwrap();
        let spki = keys::public_key_spki_der(&key).unwrap();
        let crx_id = id::derive_crx_id(&spki);
        let signed_data = hdr::build_signed_data(&crx_id);
        let signature = signer::sign(&key, &signed_data, &zip_bytes).unwrap();
        let header_bytes = hdr::build_header(spki.clone(), signature, signed_data);

        let crx_path = work.path().join("sample.crx");
        let out_file = fs::File::create(&crx_path).unwrap();
        envelope::assemble_envelope(&header_bytes, std::io::Cursor::new(&zip_bytes), out_file).unwrap();
        (work, crx_path, spki)
    }

    #[test]
    fn falls_back_to_header_proof_as_pkcs1_pem_without_manifest_override() {
        let (_work, crx_path, spki) = sample_crx(br#"{"name":"sample"}"#);
        let pem_bytes = public_key_for_source(&crx_path).unwrap();
        let text = String::from_utf8(pem_bytes).unwrap();
        assert!(text.starts_with("-----BEGIN RSA PUBLIC KEY-----"));

        let normalized = id::id_from_public_key_bytes(text.as_bytes()).unwrap();
        assert_eq!(normalized, spki);
    }

    #[test]
    fn manifest_key_overrides_the_header_proof_and_is_returned_verbatim() {
        let other_key = keys::generate_key(Some(2048)).unwrap();
        let other_spki = keys::public_key_spki_der(&other_key).unwrap();
        let manifest_key_b64 = STANDARD.encode(&other_spki);
        let manifest = format!(r#"{{"key":"{manifest_key_b64}"}}"#);
        let (_work, crx_path, header_spki) = sample_crx(manifest.as_bytes());

        let bytes = public_key_for_source(&crx_path).unwrap();
        assert_eq!(bytes, manifest_key_b64.as_bytes());
        assert_ne!(bytes, header_spki);
    }

    #[test]
    fn directory_source_requires_manifest_key() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("manifest.json"), br#"{"name":"no key here"}"#).unwrap();
        let err = public_key_for_source(dir.path()).unwrap_err();
        assert!(matches!(err, CrxError::KeyNotInManifest));
    }

    #[test]
    fn directory_manifest_key_is_returned_verbatim() {
        let dir = tempdir().unwrap();
        let key = keys::generate_key(Some(2048)).unwrap();
        let spki = keys::public_key_spki_der(&key).unwrap();
        let manifest_key_b64 = STANDARD.encode(&spki);
        fs::write(
            dir.path().join("manifest.json"),
            format!(r#"{{"key":"{manifest_key_b64}"}}"#),
        )
        .unwrap();

        let bytes = public_key_for_source(dir.path()).unwrap();
        assert_eq!(bytes, manifest_key_b64.as_bytes());
    }
}

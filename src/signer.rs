//! RSA-SHA256 signing over the canonical CRX3 pre-image.
//!
//! Grounded on `original_source/pack.go::makeSign`: the domain separator
//! and length prefix are mandatory parts of the signed pre-image, not
//! implementation details — get them wrong and browsers reject the file.

use rsa::pkcs1v15::Pkcs1v15Sign;
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};

use crate::error::{CrxError, Result};

const SIGNED_DATA_MAGIC: &[u8; 16] = b"CRX3 SignedData\0";

/// Builds `"CRX3 SignedData\0" ++ len(signed_data) as LE u32 ++ signed_data ++ zip_bytes`.
pub fn canonical_preimage(signed_data: &[u8], zip_bytes: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIGNED_DATA_MAGIC.len() + 4 + signed_data.len() + zip_bytes.len());
    buf.extend_from_slice(SIGNED_DATA_MAGIC);
    buf.extend_from_slice(&(signed_data.len() as u32).to_le_bytes());
    buf.extend_from_slice(signed_data);
    buf.extend_from_slice(zip_bytes);
    buf
}

/// Signs the canonical pre-image with PKCS#1 v1.5 over SHA-256.
pub fn sign(key: &RsaPrivateKey, signed_data: &[u8], zip_bytes: &[u8]) -> Result<Vec<u8>> {
    let preimage = canonical_preimage(signed_data, zip_bytes);
    let digest = Sha256::digest(&preimage);
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CrxError::InvalidKey(e.to_string()))
}

/// Verifies a signature produced by [`sign`]. Used by tests; the codec
/// itself never verifies third-party signatures (see spec.md §1 non-goals).
#[cfg(test)]
pub fn verify(public: &rsa::RsaPublicKey, signed_data: &[u8], zip_bytes: &[u8], signature: &[u8]) -> bool {
    let preimage = canonical_preimage(signed_data, zip_bytes);
    let digest = Sha256::digest(&preimage);
    public
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_key;

    #[test]
    fn preimage_layout_matches_spec() {
        let signed_data = b"abc";
        let zip_bytes = b"zipzip";
        let preimage = canonical_preimage(signed_data, zip_bytes);
        assert_eq!(&preimage[0..16], SIGNED_DATA_MAGIC);
        assert_eq!(u32::from_le_bytes(preimage[16..20].try_into().unwrap()), 3);
        assert_eq!(&preimage[20..23], signed_data);
        assert_eq!(&preimage[23..], zip_bytes);
    }

    #[test]
    fn signature_verifies_against_own_public_key() {
        let key = generate_key(Some(2048)).unwrap();
        let public = key.to_public_key();
        let signed_data = b"signed-data-bytes";
        let zip_bytes = b"pretend-zip-payload";
        let signature = sign(&key, signed_data, zip_bytes).unwrap();
        assert!(verify(&public, signed_data, zip_bytes, &signature));
    }

    #[test]
    fn signature_does_not_verify_against_tampered_payload() {
        let key = generate_key(Some(2048)).unwrap();
        let public = key.to_public_key();
        let signed_data = b"signed-data-bytes";
        let signature = sign(&key, signed_data, b"original").unwrap();
        assert!(!verify(&public, signed_data, b"tampered!", &signature));
    }
}

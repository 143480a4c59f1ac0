//! Encode/decode of `CrxFileHeader` and its nested messages. The wire
//! format comes from `proto/crx3.proto`; see `src/pb.rs` for the
//! `prost`-generated types.

use prost::Message;

use crate::error::{CrxError, Result};
use crate::pb;

/// Serializes a `SignedData` carrying the given `crx_id`.
pub fn build_signed_data(crx_id: &[u8]) -> Vec<u8> {
    pb::SignedData {
        crx_id: Some(crx_id.to_vec()),
    }
    .encode_to_vec()
}

/// Serializes a `CrxFileHeader` with exactly one `sha256_with_rsa` proof.
pub fn build_header(public_key: Vec<u8>, signature: Vec<u8>, signed_header_data: Vec<u8>) -> Vec<u8> {
    pb::CrxFileHeader {
        sha256_with_rsa: vec![pb::AsymmetricKeyProof {
            public_key: Some(public_key),
            signature: Some(signature),
        }],
        signed_header_data: Some(signed_header_data),
    }
    .encode_to_vec()
}

/// Decodes a `CrxFileHeader`. Unknown fields are ignored by `prost` as
/// required by spec.md §4.B.
pub fn decode_header(bytes: &[u8]) -> Result<pb::CrxFileHeader> {
    Ok(pb::CrxFileHeader::decode(bytes)?)
}

/// Decodes a `SignedData` and validates that `crx_id` is exactly 16 bytes.
pub fn decode_signed_data(bytes: &[u8]) -> Result<pb::SignedData> {
    let signed_data = pb::SignedData::decode(bytes)?;
    match &signed_data.crx_id {
        Some(id) if id.len() == 16 => Ok(signed_data),
        Some(id) => Err(CrxError::MalformedHeader(format!(
            "crx_id is {} bytes, expected 16",
            id.len()
        ))),
        None => Err(CrxError::MalformedHeader("missing crx_id".into())),
    }
}

/// Returns the first `sha256_with_rsa` proof, ignoring any further proofs
/// per spec.md §4.B.
pub fn first_proof(header: &pb::CrxFileHeader) -> Result<&pb::AsymmetricKeyProof> {
    header
        .sha256_with_rsa
        .first()
        .ok_or_else(|| CrxError::MalformedHeader("no sha256_with_rsa proof present".into()))
}

//! The fixed CRX3 binary envelope: magic, version, header length, header,
//! payload. See `original_source/pack.go::writeToCRX` and
//! `original_source/unpack.go` for the reference layout.

use std::io::{Read, Write};

use crate::error::{CrxError, Result};

pub const MAGIC: &[u8; 4] = b"Cr24";
pub const FORMAT_VERSION: u32 = 3;

/// Header lengths beyond this are treated as corrupt rather than trusted,
/// so a truncated/garbage file can't trigger an unbounded allocation.
const MAX_HEADER_LEN: u32 = 16 * 1024 * 1024;

/// Writes magic + version + header length + header + the full ZIP payload,
/// in that order, with no padding.
pub fn assemble_envelope<W: Write, R: Read>(
    header_bytes: &[u8],
    mut zip_reader: R,
    mut out: W,
) -> Result<()> {
    out.write_all(MAGIC)?;
    out.write_all(&FORMAT_VERSION.to_le_bytes())?;
    out.write_all(&(header_bytes.len() as u32).to_le_bytes())?;
    out.write_all(header_bytes)?;
    std::io::copy(&mut zip_reader, &mut out)?;
    Ok(())
}

/// Reads the 12-byte envelope metadata plus the header, leaving `reader`
/// positioned at the start of the ZIP payload.
///
/// `total_len`, when known (e.g. from a file's size on disk), lets us
/// reject a header length that would run past end of file without reading
/// that far.
pub fn split_envelope<R: Read>(mut reader: R, total_len: Option<u64>) -> Result<(Vec<u8>, R)> {
    let mut meta = [0u8; 12];
    reader
        .read_exact(&mut meta)
        .map_err(|_| CrxError::MalformedEnvelope("file shorter than the 12-byte envelope header".into()))?;

    if &meta[0..4] != MAGIC {
        return Err(CrxError::UnsupportedFormat(format!(
            "bad magic: {:?}",
            &meta[0..4]
        )));
    }

    let version = u32::from_le_bytes(meta[4..8].try_into().unwrap());
    if version != FORMAT_VERSION {
        return Err(CrxError::UnsupportedFormat(format!(
            "unsupported CRX format version {version}"
        )));
    }

    let header_len = u32::from_le_bytes(meta[8..12].try_into().unwrap());
    if header_len > MAX_HEADER_LEN {
        return Err(CrxError::MalformedEnvelope(format!(
            "implausible header length {header_len}"
        )));
    }
    if let Some(total) = total_len {
        if 12u64 + header_len as u64 > total {
            return Err(CrxError::MalformedEnvelope(format!(
                "header length {header_len} exceeds file size {total}"
            )));
        }
    }

    let mut header_bytes = vec![0u8; header_len as usize];
    reader
        .read_exact(&mut header_bytes)
        .map_err(|_| CrxError::MalformedEnvelope("envelope truncated before end of header".into()))?;

    Ok((header_bytes, reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_header_and_payload() {
        let header = b"fake-header-bytes".to_vec();
        let payload = b"PK\x03\x04fake-zip-bytes".to_vec();

        let mut out = Vec::new();
        assemble_envelope(&header, Cursor::new(&payload), &mut out).unwrap();

        assert_eq!(&out[0..4], MAGIC);
        assert_eq!(u32::from_le_bytes(out[4..8].try_into().unwrap()), 3);

        let total = out.len() as u64;
        let (got_header, mut rest) = split_envelope(Cursor::new(out), Some(total)).unwrap();
        assert_eq!(got_header, header);
        let mut got_payload = Vec::new();
        rest.read_to_end(&mut got_payload).unwrap();
        assert_eq!(got_payload, payload);
    }

    #[test]
    fn rejects_bad_magic() {
        let buf = [0u8; 12];
        let err = split_envelope(Cursor::new(buf), None).unwrap_err();
        assert!(matches!(err, CrxError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_crx2() {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        let err = split_envelope(Cursor::new(buf), None).unwrap_err();
        assert!(matches!(err, CrxError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_truncated_header() {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&3u32.to_le_bytes());
        buf.extend_from_slice(&100u32.to_le_bytes());
        buf.extend_from_slice(b"short");
        let err = split_envelope(Cursor::new(buf), None).unwrap_err();
        assert!(matches!(err, CrxError::MalformedEnvelope(_)));
    }
}

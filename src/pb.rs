//! Generated protobuf types for the CRX3 header.
//!
//! Field numbers (2 for `sha256_with_rsa`, 10000 for `signed_header_data`)
//! come straight from `proto/crx3.proto` and are part of the CRX3 wire
//! format; do not let `prost` renumber them.

include!(concat!(env!("OUT_DIR"), "/crx3.rs"));

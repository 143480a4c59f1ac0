//! Read, write, and inspect CRX3 Chrome/Chromium extension containers.
//!
//! The binary envelope, protobuf header, and RSA/SHA-256 signing protocol
//! are implemented from the ground up; ZIP handling is delegated to the
//! `zip` crate. See [`pack::pack`] and [`unpack::unpack`] for the two
//! pipeline entry points, and [`extension::derive_id`] /
//! [`pubkey::public_key_for_source`] for inspecting an existing CRX3,
//! ZIP, or unpacked directory.

pub mod classify;
pub mod config;
mod crxfile;
pub mod download;
pub mod envelope;
pub mod error;
pub mod extension;
pub mod header;
pub mod id;
pub mod keys;
pub mod manifest;
pub mod pack;
mod pb;
pub mod pubkey;
pub mod signer;
pub mod unpack;
pub mod ziputil;

pub use error::{CrxError, Result};
pub use extension::derive_id;
pub use pack::pack;
pub use pubkey::public_key_for_source;
pub use unpack::unpack;

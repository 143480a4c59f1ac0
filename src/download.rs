//! Web-store download. Grounded on the teacher's `ChromeCRXQuery::download_blocking`
//! for the `reqwest::blocking` usage, generalized to the configurable URL
//! template from spec.md §6 instead of a fixed query-param struct.

use crate::config;
use crate::error::{CrxError, Result};

/// Downloads a CRX3 for `extension_id` from the configured web-store URL
/// template, substituting `{id}`. See [`config::set_webstore_url`].
pub fn download_from_web_store(extension_id: &str) -> Result<Vec<u8>> {
    if extension_id.is_empty() {
        return Err(CrxError::ExtensionIdNotSpecified);
    }
    let url = config::webstore_url().replace("{id}", extension_id);
    log::debug!("downloading extension {extension_id} from {url}");

    let response = reqwest::blocking::Client::new().get(&url).send()?;
    if !response.status().is_success() {
        return Err(CrxError::BadStatus(response.status().to_string()));
    }
    Ok(response.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_extension_id() {
        assert!(matches!(
            download_from_web_store(""),
            Err(CrxError::ExtensionIdNotSpecified)
        ));
    }
}

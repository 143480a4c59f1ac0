//! The only process-wide state in the codec: the default RSA key size and
//! the web-store URL template. Both are settable, validated, and
//! last-writer-wins under concurrent use, per spec.md §5.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, RwLock};

use crate::error::{CrxError, Result};

const DEFAULT_KEY_SIZE: usize = 2048;
const DEFAULT_WEBSTORE_URL: &str = "https://clients2.google.com/service/update2/crx?response=redirect&prodversion=80.0&acceptformat=crx3&x=id%3D{id}%26installsource%3Dondemand%26uc";

static KEY_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_KEY_SIZE);
static WEBSTORE_URL: OnceLock<RwLock<String>> = OnceLock::new();

fn is_valid_key_size(bits: usize) -> bool {
    matches!(bits, 2048 | 3072 | 4096)
}

/// The default key size used by `generate_key` when no size is passed.
pub fn default_key_size() -> usize {
    KEY_SIZE.load(Ordering::SeqCst)
}

/// Sets the process-wide default RSA key size. Rejects anything outside
/// {2048, 3072, 4096}; prefer passing a size explicitly through the API
/// instead of relying on this.
pub fn set_default_key_size(bits: usize) -> Result<()> {
    if !is_valid_key_size(bits) {
        return Err(CrxError::InvalidKeySize(bits));
    }
    KEY_SIZE.store(bits, Ordering::SeqCst);
    Ok(())
}

fn webstore_url_lock() -> &'static RwLock<String> {
    WEBSTORE_URL.get_or_init(|| RwLock::new(DEFAULT_WEBSTORE_URL.to_string()))
}

/// Returns the current web-store URL template, with `{id}` still
/// unsubstituted.
pub fn webstore_url() -> String {
    webstore_url_lock()
        .read()
        .expect("webstore url lock poisoned")
        .clone()
}

/// Sets the web-store URL template. An empty string is a no-op. A value
/// without an `http` prefix is treated as a bare host and gets `https://`
/// prepended.
pub fn set_webstore_url(url: &str) {
    if url.is_empty() {
        return;
    }
    let url = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    *webstore_url_lock().write().expect("webstore url lock poisoned") = url;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_key_size() {
        assert!(matches!(
            set_default_key_size(1024),
            Err(CrxError::InvalidKeySize(1024))
        ));
    }

    #[test]
    fn accepts_valid_key_sizes_and_restores_default() {
        set_default_key_size(4096).unwrap();
        assert_eq!(default_key_size(), 4096);
        set_default_key_size(2048).unwrap();
        assert_eq!(default_key_size(), 2048);
    }

    #[test]
    fn webstore_url_prepends_https() {
        set_webstore_url("example.com/crx");
        assert_eq!(webstore_url(), "https://example.com/crx");
        set_webstore_url(DEFAULT_WEBSTORE_URL);
    }

    #[test]
    fn webstore_url_ignores_empty() {
        set_webstore_url(DEFAULT_WEBSTORE_URL);
        let before = webstore_url();
        set_webstore_url("");
        assert_eq!(webstore_url(), before);
    }
}

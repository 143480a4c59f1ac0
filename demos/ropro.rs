// Dependencies
use std::fs::File;
use std::io::Write;

use crx3::download::download_from_web_store;
use crx3::unpack;

/// The id of the extension we want to download.
const EXT_ID: &str = "adbacgifemdbhdkfppmeilbgppmhaobf";

/// Entrypoint.
fn main() -> anyhow::Result<()> {
    // Download the extension
    let extension_crx = download_from_web_store(EXT_ID)?;

    // Write it to disk
    let crx_path = format!("{EXT_ID}.crx");
    File::create(&crx_path)?.write_all(&extension_crx)?;

    // Unpack it
    unpack(std::path::Path::new(&crx_path), std::path::Path::new(EXT_ID))?;

    Ok(())
}

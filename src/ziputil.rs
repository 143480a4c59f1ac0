//! ZIP materialization and extraction. The `zip` crate handles the wire
//! format; this module supplies the directory-walk and path-safety policy
//! from `original_source/zip.go` and `original_source/unzip.go`.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CrxError, Result};

/// Zips every file under `root` (relative paths, no directory entries),
/// matching `original_source/zip.go::Zip`.
pub fn zip_dir(root: &Path) -> Result<Vec<u8>> {
    if !root.is_dir() {
        return Err(CrxError::PathNotFound(root.to_path_buf()));
    }

    let mut buf = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buf));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in walkdir::WalkDir::new(root).into_iter() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_dir() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("walkdir entries are rooted at `root`");
            let name = rel.to_string_lossy().replace('\\', "/");
            writer.start_file(name, options)?;
            let mut file = fs::File::open(entry.path())?;
            std::io::copy(&mut file, &mut writer)?;
        }
        writer.finish()?;
    }
    Ok(buf)
}

/// Extracts a ZIP byte stream into `dest`, creating it (and any missing
/// parents) if needed. Every resolved entry path must land inside `dest`;
/// `zip::read::ZipFile::enclosed_name` is what gives us that guarantee —
/// an entry like `../evil` has no enclosed name and is rejected outright.
pub fn unzip_to(zip_bytes: &[u8], dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let enclosed = entry
            .enclosed_name()
            .ok_or_else(|| CrxError::IllegalPath(entry.name().into()))?;
        let out_path = dest.join(enclosed);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = fs::File::create(&out_path)?;
        std::io::copy(&mut entry, &mut out_file)?;
    }
    Ok(())
}

/// Reads a single named entry out of a ZIP byte stream without extracting
/// the rest, used to peek at `manifest.json`.
pub fn read_entry(zip_bytes: &[u8], name: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;
    let result = match archive.by_name(name) {
        Ok(mut entry) => {
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            Ok(Some(contents))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    };
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn zips_and_unzips_a_directory_tree() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("manifest.json"), b"{}").unwrap();
        fs::create_dir(src.path().join("images")).unwrap();
        fs::write(src.path().join("images").join("icon.png"), b"pngdata").unwrap();

        let zip_bytes = zip_dir(src.path()).unwrap();

        let dest = tempdir().unwrap();
        unzip_to(&zip_bytes, dest.path()).unwrap();

        assert_eq!(fs::read(dest.path().join("manifest.json")).unwrap(), b"{}");
        assert_eq!(
            fs::read(dest.path().join("images").join("icon.png")).unwrap(),
            b"pngdata"
        );
    }

    #[test]
    fn read_entry_returns_none_for_missing_file() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("a.txt"), b"hi").unwrap();
        let zip_bytes = zip_dir(src.path()).unwrap();
        assert_eq!(read_entry(&zip_bytes, "manifest.json").unwrap(), None);
        assert_eq!(read_entry(&zip_bytes, "a.txt").unwrap(), Some(b"hi".to_vec()));
    }

    #[test]
    fn rejects_directory_traversal_entries() {
        use std::io::Write;

        let mut buf = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut buf));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            writer.start_file("../evil", options).unwrap();
            writer.write_all(b"pwned").unwrap();
            writer.finish().unwrap();
        }
        let dest = tempdir().unwrap();
        let err = unzip_to(&buf, dest.path()).unwrap_err();
        assert!(matches!(err, CrxError::IllegalPath(_)));
    }
}

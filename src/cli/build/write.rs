//! Filesystem output of a build.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::OutputConfig;
use crate::meta::{RawDocument, Writeup};

/// Write `<writeups>/<category>/<slug>/index.md` and copy the writeup's
/// images next to it. Returns the page directory.
pub fn write_page(
    writeups_dir: &Path,
    writeup: &Writeup,
    doc: &RawDocument,
    source_dir: &Path,
    output: &OutputConfig,
) -> Result<PathBuf> {
    let record = &writeup.record;
    let dest = writeups_dir.join(&record.category).join(&record.slug);
    fs::create_dir_all(&dest).with_context(|| format!("failed to create {}", dest.display()))?;

    let page = dest.join("index.md");
    fs::write(&page, writeup.render_page(&doc.text))
        .with_context(|| format!("failed to write {}", page.display()))?;

    copy_images(source_dir, &dest, output)?;
    Ok(dest)
}

/// Copy every image file directly inside `from` into `to`.
pub fn copy_images(from: &Path, to: &Path, output: &OutputConfig) -> Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(from)?.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if !path.is_file() || !output.is_image(&path) {
            continue;
        }
        let target = to.join(entry.file_name());
        fs::copy(&path, &target)
            .with_context(|| format!("failed to copy {}", path.display()))?;
        copied += 1;
    }
    Ok(copied)
}

/// Write the card data file, creating its parent directory.
pub fn write_data_file(path: &Path, js: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, js).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_images_only() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("a.PNG"), "img").unwrap();
        fs::write(src.path().join("b.svg"), "img").unwrap();
        fs::write(src.path().join("README.md"), "# x").unwrap();
        fs::create_dir(src.path().join("sub.png")).unwrap();

        let copied = copy_images(src.path(), dst.path(), &OutputConfig::default()).unwrap();
        assert_eq!(copied, 2);
        assert!(dst.path().join("a.PNG").is_file());
        assert!(!dst.path().join("README.md").exists());
    }

    #[test]
    fn test_write_data_file_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site/boxes-data.js");
        write_data_file(&path, "const X = [];\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "const X = [];\n");
    }

    #[test]
    fn test_write_data_file_names_blocked_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site"), "not a dir").unwrap();
        let err = write_data_file(&dir.path().join("site/boxes-data.js"), "").unwrap_err();
        assert!(err.to_string().starts_with("failed to create"));
    }
}

//! Writeup discovery: one sub-directory per writeup, `README.md` inside.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};

use crate::meta::RawDocument;

/// Primary document of a writeup directory.
pub const README: &str = "README.md";

/// Sub-directories of `dir`, sorted by name.
pub fn list_writeup_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Display name of a writeup: its directory name.
pub fn writeup_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load a markdown file as a [`RawDocument`] named `name`.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_document(path: &Path, name: String) -> Result<RawDocument> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .unwrap_or_else(|_| SystemTime::now());
    Ok(RawDocument::new(name, text, modified))
}

/// `README.md` of a writeup directory, or `None` when there is none.
pub fn read_writeup(dir: &Path) -> Result<Option<RawDocument>> {
    let readme = dir.join(README);
    if !readme.is_file() {
        return Ok(None);
    }
    read_document(&readme, writeup_name(dir)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_sorted_dirs_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Sauna")).unwrap();
        fs::create_dir(dir.path().join("Blue")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let names: Vec<_> = list_writeup_dirs(dir.path())
            .unwrap()
            .iter()
            .map(|p| writeup_name(p))
            .collect();
        assert_eq!(names, vec!["Blue", "Sauna"]);
    }

    #[test]
    fn test_missing_dir_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_writeup_dirs(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_read_writeup() {
        let dir = TempDir::new().unwrap();
        let box_dir = dir.path().join("Lock 2");
        fs::create_dir(&box_dir).unwrap();
        assert!(read_writeup(&box_dir).unwrap().is_none());

        fs::write(box_dir.join(README), b"# Lock\n\xff").unwrap();
        let doc = read_writeup(&box_dir).unwrap().unwrap();
        assert_eq!(doc.name, "Lock 2");
        assert!(doc.text.starts_with("# Lock\n"));
        assert!(doc.text.ends_with('\u{FFFD}'));
    }
}

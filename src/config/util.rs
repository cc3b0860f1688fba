//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

/// Expand `~` and make `path` absolute against `base`.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve_path(Path::new("/site"), Path::new("_data")),
            PathBuf::from("/site/_data")
        );
    }

    #[test]
    fn test_resolve_absolute_kept() {
        assert_eq!(
            resolve_path(Path::new("/site"), Path::new("/srv/ctf")),
            PathBuf::from("/srv/ctf")
        );
    }

    #[test]
    fn test_resolve_tilde() {
        let resolved = resolve_path(Path::new("/site"), Path::new("~/ctf"));
        assert!(resolved.is_absolute() || resolved.starts_with("/site"));
        assert!(resolved.ends_with("ctf"));
    }
}

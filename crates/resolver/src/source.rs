//! Locating and reading the source file of a call site
//!
//! `Location::file()` is relative to the directory rustc ran in, which is
//! usually the workspace root, while tests run from the package directory.
//! Relative paths are therefore tried against configured roots, the package
//! manifest directory and the current directory, plus each of their
//! ancestors.

use std::path::{Path, PathBuf};
use verdict_core::error::{Error, Result, ResultExt};

/// Find the on-disk file for a compiler-reported source path
pub fn locate(reported: &Path, source_roots: &[PathBuf]) -> Result<PathBuf> {
    if reported.is_absolute() {
        return if reported.is_file() {
            Ok(reported.to_path_buf())
        } else {
            Err(Error::source_not_found(reported.display().to_string()))
        };
    }

    for root in source_roots {
        let candidate = root.join(reported);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    for base in search_bases() {
        for dir in base.ancestors() {
            let candidate = dir.join(reported);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(Error::source_not_found(reported.display().to_string()))
}

/// Read a located file in full; the handle is released before returning
pub fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
}

fn search_bases() -> Vec<PathBuf> {
    let mut bases = Vec::with_capacity(2);
    // Cargo sets this for test binaries it runs
    if let Some(manifest_dir) = std::env::var_os("CARGO_MANIFEST_DIR") {
        bases.push(PathBuf::from(manifest_dir));
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !bases.contains(&cwd) {
            bases.push(cwd);
        }
    }
    bases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        std::fs::write(&file, "fn main() {}").unwrap();

        assert_eq!(locate(&file, &[]).unwrap(), file);
    }

    #[test]
    fn test_missing_absolute_path() {
        let result = locate(Path::new("/nonexistent/dir/a.rs"), &[]);
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }

    #[test]
    fn test_relative_path_against_source_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("crates/app/tests")).unwrap();
        let file = dir.path().join("crates/app/tests/orders.rs");
        std::fs::write(&file, "fn main() {}").unwrap();

        let found = locate(
            Path::new("crates/app/tests/orders.rs"),
            &[PathBuf::from("/nonexistent"), dir.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn test_relative_path_found_from_manifest_ancestors() {
        // Compiled from the workspace root, so the path starts with `crates/`
        let found = locate(Path::new(file!()), &[]).unwrap();
        assert!(found.ends_with("src/source.rs"));
    }

    #[test]
    fn test_read_missing_file_is_error() {
        assert!(read(Path::new("/nonexistent/a.rs")).is_err());
    }
}

//! Filesystem utilities for atomic store copies.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Copy `source` to `destination` through a temp file in the destination directory.
///
/// The destination is only replaced once the full copy has landed, so a reader
/// never observes a half-written store. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, the copy
/// fails, or the final rename fails even after the fallback attempt.
pub fn copy_atomic(source: &Path, destination: &Path) -> io::Result<u64> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    fs::create_dir_all(&parent)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".nutrilens-copy-{}.tmp", nanos));

    let bytes = fs::copy(source, &temp_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        e
    })?;
    rename_with_fallback(&temp_path, destination)?;
    Ok(bytes)
}

/// Rename a file, with fallback for platforms where rename fails if the target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_copy_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.db");
        let dest = dir.path().join("nested").join("backup.db");
        File::create(&source).unwrap().write_all(b"store").unwrap();

        let bytes = copy_atomic(&source, &dest).unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "store");
        assert!(source.exists());
    }

    #[test]
    fn test_copy_overwrites_existing_backup() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.db");
        let dest = dir.path().join("backup.db");
        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&source).unwrap().write_all(b"new").unwrap();

        copy_atomic(&source, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = copy_atomic(&dir.path().join("nope.db"), &dir.path().join("out.db"));
        assert!(result.is_err());
        assert!(!dir.path().join("out.db").exists());
    }
}

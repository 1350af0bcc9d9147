use std::fs;
use std::io;
use std::path::Path;

pub mod constants;

/// Writes `contents` to `path` only when it differs from what is already
/// there. Returns whether the file was written, so callers can report
/// "unchanged" instead of touching timestamps on every run.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == contents => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::write(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_file_and_skips_identical_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.rs");
        assert!(write_if_changed(&path, "one").unwrap());
        assert!(!write_if_changed(&path, "one").unwrap());
        assert!(write_if_changed(&path, "two").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}

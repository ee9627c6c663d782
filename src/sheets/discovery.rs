use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::core::error::{Error, ErrorKind, Result};

/// The user's Documents directory. The path must exist.
pub fn documents_dir() -> Result<PathBuf> {
    let docs = dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "could not resolve home directory"))?;

    if !docs.is_dir() {
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("expected path to Documents does not exist {:?}", docs),
        ));
    }
    Ok(docs)
}

/// Every file below `dir` whose extension is `ext` (case-insensitive, no
/// leading dot), sorted by path.
pub fn files_by_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let ext = ext.trim_start_matches('.');
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_nested_files_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("a.csv"), "k\n1\n").unwrap();
        fs::write(tmp.path().join("sub/b.CSV"), "k\n2\n").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let files = files_by_extension(tmp.path(), ".csv").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.CSV"]);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let err = files_by_extension(Path::new("/definitely/not/here"), "csv").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}

//! Discovery of HTML documents from file and directory arguments.

use std::{
    ffi::OsStr,
    fs::metadata,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use log::debug;

use crate::{Error, Result, config::DOCUMENT_EXTENSION};

/// Resolves file and directory arguments into an ordered document list.
///
/// Each input expands in place: a file contributes itself when it is a
/// document, a directory contributes every document below it. Overlapping
/// inputs produce duplicate entries.
pub fn collect(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for input in inputs {
        documents.extend(collect_one(input.as_ref())?);
    }
    Ok(documents)
}

/// Resolves a single file or directory argument.
pub fn collect_one(input: &Path) -> Result<Vec<PathBuf>> {
    let metadata = metadata(input).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::NotFound { what: "Input path", path: input.to_path_buf() },
        _ => Error::Collect { path: input.to_path_buf(), source },
    })?;

    if metadata.is_dir() {
        find_documents(input)
    } else if is_document(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        debug!("Skipping {} (not an HTML document)", input.display());
        Ok(Vec::new())
    }
}

/// Finds every document below `dir`, at any depth, in path order.
///
/// The walk goes through a glob pattern, so `dir` itself must be valid
/// UTF-8; other directories fail with [`Error::InvalidPath`] instead of being
/// walked.
pub fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().ok_or_else(|| Error::InvalidPath { path: dir.to_path_buf() })?;
    let pattern = format!("{}/**/*{DOCUMENT_EXTENSION}", Pattern::escape(dir_str));

    let entries = glob(&pattern).map_err(|err| Error::Usage(format!("Invalid search pattern {pattern}: {err}")))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| Error::Collect { path: err.path().to_path_buf(), source: err.into_error() })?;
        if path.is_file() {
            documents.push(path);
        }
    }

    debug!("Found {} documents in {}", documents.len(), dir.display());
    Ok(documents)
}

/// Returns `true` if the file name ends with the document extension.
pub fn is_document(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.ends_with(DOCUMENT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::tempdir;

    use super::*;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        create_dir_all(path.parent().unwrap()).unwrap();
        write(&path, "<p>x</p>").unwrap();
        path
    }

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("site/index.html")));
        assert!(is_document(Path::new("a.b.html")));
        assert!(!is_document(Path::new("index.htm")));
        assert!(!is_document(Path::new("index.HTML")));
        assert!(!is_document(Path::new("index.html.bak")));
        assert!(!is_document(Path::new("/")));
    }

    #[test]
    fn test_nested_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "a/page.html");
        touch(dir.path(), "a/b/c/d/deep.html");
        touch(dir.path(), "a/b/notes.txt");
        touch(dir.path(), "style.css");

        let documents = collect_one(dir.path()).unwrap();

        assert_eq!(documents.len(), 3);
        assert!(documents.iter().all(|path| is_document(path)));
        assert!(documents.contains(&dir.path().join("a/b/c/d/deep.html")));
    }

    #[test]
    fn test_directory_order_is_sorted() {
        let dir = tempdir().unwrap();
        let c = touch(dir.path(), "c.html");
        let a = touch(dir.path(), "a.html");
        let b = touch(dir.path(), "b.html");

        assert_eq!(collect_one(dir.path()).unwrap(), [a, b, c]);
    }

    #[test]
    fn test_directory_named_like_document_is_walked() {
        let dir = tempdir().unwrap();
        let page = touch(dir.path(), "archive.html/page.html");

        assert_eq!(collect_one(dir.path()).unwrap(), [page]);
    }

    #[test]
    fn test_non_matching_file_is_skipped() {
        let dir = tempdir().unwrap();
        let css = touch(dir.path(), "style.css");

        assert!(collect_one(&css).unwrap().is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(collect_one(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.html");

        let err = collect(&[&missing]).unwrap_err();
        assert!(matches!(err, Error::NotFound { ref path, .. } if *path == missing));
    }

    #[test]
    fn test_inputs_expand_in_place_and_keep_duplicates() {
        let dir = tempdir().unwrap();
        let first = touch(dir.path(), "first.html");
        let nested = touch(dir.path(), "sub/nested.html");
        let last = touch(dir.path(), "last.html");

        let documents = collect(&[first.clone(), dir.path().join("sub"), last.clone(), first.clone()]).unwrap();

        assert_eq!(documents, [first.clone(), nested, last, first]);
    }

    #[test]
    fn test_special_characters_in_directory_name() {
        let dir = tempdir().unwrap();
        let page = touch(dir.path(), "[draft]/page.html");

        assert_eq!(collect_one(&dir.path().join("[draft]")).unwrap(), [page]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory_is_invalid_path() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempdir().unwrap();
        let invalid = dir.path().join(OsStr::from_bytes(b"site-\xFF"));
        if create_dir_all(&invalid).is_err() {
            // Some filesystems reject non-UTF-8 names outright.
            return;
        }

        let err = collect_one(&invalid).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { ref path } if *path == invalid));
    }
}

//! Filesystem ingestion adapter.
//!
//! Feeds the corpus with `(base name, text)` pairs from a file or a
//! directory tree. Everything here is plain I/O: the corpus itself never
//! touches the filesystem.

use std::ffi::OsStr;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CorpusError, CorpusResult};

/// Extensions accepted without a caller-supplied allow-list.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "doc", "docx"];

/// One candidate document source: the file's base name and its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

/// Read a single file as a document source.
///
/// Hidden files (name starting with `.`) and files whose extension is
/// outside `DEFAULT_EXTENSIONS` plus `extra_extensions` are
/// `UnsupportedFileType`.
pub fn read_source(path: &Path, extra_extensions: &[&str]) -> CorpusResult<SourceFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if name.starts_with('.') || !extension_allowed(path, extra_extensions) {
        return Err(CorpusError::UnsupportedFileType(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(SourceFile { name, text })
}

/// Collect document sources under `root`.
///
/// A file yields at most one source; a directory is walked at depth 1, or
/// fully when `recurse` is set. Hidden entries are always excluded,
/// including whole hidden directories when recursing. Unsupported and
/// unreadable files are logged at warning level and skipped; only
/// traversal failures are fatal.
pub fn collect(root: &Path, recurse: bool, extra_extensions: &[&str]) -> CorpusResult<Vec<SourceFile>> {
    let max_depth = if recurse { usize::MAX } else { 1 };
    let mut sources = Vec::new();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        match read_source(entry.path(), extra_extensions) {
            Ok(source) => sources.push(source),
            Err(CorpusError::UnsupportedFileType(path)) => {
                tracing::warn!(path = %path.display(), "skipping unsupported file type");
            }
            Err(CorpusError::Io(err)) if err.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(path = %entry.path().display(), error = %err, "skipping non-text file");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(sources)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn extension_allowed(path: &Path, extra_extensions: &[&str]) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
        return false;
    };
    DEFAULT_EXTENSIONS
        .iter()
        .chain(extra_extensions)
        .any(|allowed| ext.eq_ignore_ascii_case(allowed.trim_start_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn collects_allowed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lorem.txt", "lorem ipsum");
        write(dir.path(), "notes.doc", "some notes");
        write(dir.path(), "image.png", "binaryish");
        write(dir.path(), "README", "no extension");

        let mut sources = collect(dir.path(), false, &[]).unwrap();
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["lorem.txt", "notes.doc"]);
        assert_eq!(sources[0].text, "lorem ipsum");
    }

    #[test]
    fn hidden_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".hidden.txt", "secret");
        write(dir.path(), "visible.txt", "plain");

        let sources = collect(dir.path(), false, &[]).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "visible.txt");
    }

    #[test]
    fn recursion_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write(dir.path(), "top.txt", "top");
        write(&dir.path().join("sub"), "nested.txt", "nested");

        let flat = collect(dir.path(), false, &[]).unwrap();
        assert_eq!(flat.len(), 1);

        let mut deep = collect(dir.path(), true, &[]).unwrap();
        deep.sort_by(|a, b| a.name.cmp(&b.name));
        let names: Vec<&str> = deep.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["nested.txt", "top.txt"]);
    }

    #[test]
    fn hidden_directories_are_not_entered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        write(&dir.path().join(".cache"), "stale.txt", "stale");
        write(dir.path(), "fresh.txt", "fresh");

        let sources = collect(dir.path(), true, &[]).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "fresh.txt");
    }

    #[test]
    fn extra_extensions_extend_the_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.md", "# markdown");

        assert!(collect(dir.path(), false, &[]).unwrap().is_empty());
        let sources = collect(dir.path(), false, &["md"]).unwrap();
        assert_eq!(sources.len(), 1);
        // leading dot tolerated
        let sources = collect(dir.path(), false, &[".md"]).unwrap();
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "only.txt", "just this");

        let sources = collect(&dir.path().join("only.txt"), false, &[]).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "only.txt");
    }

    #[test]
    fn single_unsupported_file_is_a_warned_noop() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "data.bin", "junk");

        let sources = collect(&dir.path().join("data.bin"), false, &[]).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn read_source_rejects_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "data.bin", "junk");

        assert!(matches!(
            read_source(&dir.path().join("data.bin"), &[]),
            Err(CorpusError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn missing_root_is_fatal() {
        assert!(collect(Path::new("/definitely/not/here"), false, &[]).is_err());
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, TranslationError};

/// A regular file discovered under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the input root; mirrored under the run directory
    pub relative: PathBuf,
    /// Path to read the content from
    pub absolute: PathBuf,
}

/// An entry that could not be inspected during the walk.
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct WalkError {
    /// Relative to the input root when known
    pub path: PathBuf,
    #[source]
    pub source: TranslationError,
}

/// Recursive, lexicographically ordered enumeration of regular files.
///
/// Symlinks to files are yielded; symlinks to directories are never entered,
/// which keeps the walk free of cycles.
pub struct DirectoryWalker {
    root: PathBuf,
    excluded: Vec<PathBuf>,
}

impl DirectoryWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TranslationError::PathNotFound(root.display().to_string()),
            _ => TranslationError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(TranslationError::NotADirectory(root.display().to_string()));
        }

        Ok(Self {
            root: fs::canonicalize(root)?,
            excluded: Vec::new(),
        })
    }

    /// Never descend into `path`. Used for the run directory when the output
    /// root lives inside the input root.
    pub fn exclude<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.excluded.push(path);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk the tree. Each call starts a fresh traversal.
    pub fn files(&self) -> impl Iterator<Item = std::result::Result<SourceFile, WalkError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry.path()))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.classify(entry),
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| self.relative(p))
                        .unwrap_or_default();
                    Some(Err(WalkError {
                        path,
                        source: TranslationError::Io(e.into()),
                    }))
                }
            })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|excluded| path.starts_with(excluded))
    }

    fn classify(&self, entry: DirEntry) -> Option<std::result::Result<SourceFile, WalkError>> {
        let file_type = entry.file_type();

        if file_type.is_file() {
            return Some(Ok(self.source_file(entry.path())));
        }

        if file_type.is_symlink() {
            return match fs::metadata(entry.path()) {
                Ok(target) if target.is_file() => Some(Ok(self.source_file(entry.path()))),
                Ok(target) if target.is_dir() => {
                    debug!("Skipping directory symlink {}", entry.path().display());
                    None
                }
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping dangling symlink {}: {}", entry.path().display(), e);
                    None
                }
            };
        }

        None
    }

    fn source_file(&self, path: &Path) -> SourceFile {
        SourceFile {
            relative: self.relative(path),
            absolute: path.to_path_buf(),
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        pathdiff::diff_paths(path, &self.root).unwrap_or_else(|| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn relatives(walker: &DirectoryWalker) -> Vec<PathBuf> {
        walker.files().map(|f| f.unwrap().relative).collect()
    }

    #[test]
    fn test_walk_is_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/c.rs"), "c").unwrap();
        fs::write(dir.path().join("sub/deeper/d.json"), "{}").unwrap();

        let walker = DirectoryWalker::new(dir.path()).unwrap();
        assert_eq!(
            relatives(&walker),
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("sub/c.rs"),
                PathBuf::from("sub/deeper/d.json"),
            ]
        );
    }

    #[test]
    fn test_absolute_path_points_at_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();

        let walker = DirectoryWalker::new(dir.path()).unwrap();
        let file = walker.files().next().unwrap().unwrap();
        assert_eq!(fs::read_to_string(&file.absolute).unwrap(), "hello");
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let err = DirectoryWalker::new(dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, TranslationError::PathNotFound(_)));
    }

    #[test]
    fn test_root_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let err = DirectoryWalker::new(&file).err().unwrap();
        assert!(matches!(err, TranslationError::NotADirectory(_)));
    }

    #[test]
    fn test_excluded_subtree_is_not_walked() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("out/run_1")).unwrap();
        fs::write(dir.path().join("out/run_1/a.txt"), "old").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let walker = DirectoryWalker::new(dir.path())
            .unwrap()
            .exclude(dir.path().join("out/run_1"));
        assert_eq!(relatives(&walker), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_walk_is_restartable_per_call() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let walker = DirectoryWalker::new(dir.path()).unwrap();
        assert_eq!(walker.files().count(), 1);
        assert_eq!(walker.files().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_policy() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/real.txt"), "real").unwrap();
        symlink(root.join("sub/real.txt"), root.join("link.txt")).unwrap();
        // A directory link back to the root would loop forever if followed.
        symlink(&root, root.join("sub/loop")).unwrap();
        symlink(root.join("missing.txt"), root.join("dangling.txt")).unwrap();

        let walker = DirectoryWalker::new(&root).unwrap();
        assert_eq!(
            relatives(&walker),
            vec![PathBuf::from("link.txt"), PathBuf::from("sub/real.txt")]
        );
    }
}

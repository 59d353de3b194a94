//! The file system boundary.
//!
//! These are the only [`GenericPath`] operations that touch the host file
//! system. Each first checks that the path's flavor matches the host flavor
//! and fails with [`PathError::FlavorMismatch`] otherwise.

use std::fs::Metadata;
use std::io::ErrorKind;
use std::time::SystemTime;

use camino::Utf8PathBuf;

use crate::error::PathError;
use crate::flavor::{is_sep, Flavor, FlavorKind};
use crate::path::GenericPath;

/// What a path names on the host file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else: sockets, device nodes, fifos.
    Other,
}

/// A metadata snapshot of one file system entry.
///
/// Owner ids are `None` on platforms that do not expose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    /// What the entry is.
    pub kind: EntryKind,
    /// Last modification time.
    pub modified: SystemTime,
    /// Owning user id.
    pub uid: Option<u32>,
    /// Owning group id.
    pub gid: Option<u32>,
    /// Permission bits.
    pub mode: u32,
    /// Size in bytes.
    pub size: u64,
}

impl Stat {
    fn from_metadata(metadata: &Metadata) -> Self {
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let (uid, gid, mode) = owner_and_mode(metadata);
        Self {
            kind,
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            uid,
            gid,
            mode,
            size: metadata.len(),
        }
    }
}

#[cfg(unix)]
fn owner_and_mode(metadata: &Metadata) -> (Option<u32>, Option<u32>, u32) {
    use std::os::unix::fs::MetadataExt;
    (Some(metadata.uid()), Some(metadata.gid()), metadata.mode())
}

#[cfg(not(unix))]
fn owner_and_mode(metadata: &Metadata) -> (Option<u32>, Option<u32>, u32) {
    let mode = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    (None, None, mode)
}

impl<F: Flavor> GenericPath<F> {
    fn local_std_path(&self) -> Result<&std::path::Path, PathError> {
        if F::KIND != FlavorKind::local() {
            return Err(PathError::FlavorMismatch {
                path: self.as_str().to_owned(),
                flavor: F::KIND,
                local: FlavorKind::local(),
            });
        }
        Ok(std::path::Path::new(self.as_str()))
    }

    fn io_error(&self, source: std::io::Error) -> PathError {
        PathError::io(self.as_str(), source)
    }

    fn metadata(&self) -> Result<Option<Metadata>, PathError> {
        match std::fs::metadata(self.local_std_path()?) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Returns `true` if the path names an existing entry.
    ///
    /// A missing entry is `Ok(false)`, never an error.
    pub fn exists(&self) -> Result<bool, PathError> {
        Ok(self.metadata()?.is_some())
    }

    /// Returns `true` if the path names an existing regular file.
    pub fn is_file(&self) -> Result<bool, PathError> {
        Ok(self.metadata()?.is_some_and(|m| m.is_file()))
    }

    /// Returns `true` if the path names an existing directory.
    pub fn is_directory(&self) -> Result<bool, PathError> {
        Ok(self.metadata()?.is_some_and(|m| m.is_dir()))
    }

    /// Returns the last modification time of the entry.
    pub fn modification_time(&self) -> Result<SystemTime, PathError> {
        let path = self.local_std_path()?;
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| self.io_error(e))
    }

    /// Returns a metadata snapshot, or `None` if the entry does not exist.
    pub fn stat(&self) -> Result<Option<Stat>, PathError> {
        Ok(self.metadata()?.as_ref().map(Stat::from_metadata))
    }

    /// Resolves the path against the current working directory and
    /// normalizes it.
    pub fn absolute_path(&self) -> Result<Self, PathError> {
        self.local_std_path()?;
        if self.is_absolute() {
            return Ok(self.normalize());
        }
        let cwd = std::env::current_dir().map_err(|e| self.io_error(e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| PathError::NonUtf8Path(e.into_path_buf()))?;
        Ok(Self::parse(cwd.as_str())?.join_path(self).normalize())
    }

    /// Lists the immediate children of a directory, sorted by name.
    ///
    /// Entries whose names are not valid UTF-8, or contain a `\\` that would
    /// read back as a separator, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotADirectory`] when the path names something
    /// other than a directory, and [`PathError::Io`] when listing fails.
    pub fn list(&self) -> Result<Vec<Self>, PathError> {
        self.local_std_path()?;
        let dir = self.as_utf8_path();
        let entries = match dir.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) if dir.is_file() => {
                tracing::trace!(path = %self, error = %e, "listing a non-directory");
                return Err(PathError::NotADirectory(self.as_str().to_owned()));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut children = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) if entry.file_name().contains(is_sep) => {
                    tracing::warn!(
                        dir = %self,
                        name = entry.file_name(),
                        "skipping entry whose name contains a separator"
                    );
                }
                Ok(entry) => children.push(self.join_segment(entry.file_name())),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!(dir = %self, error = %e, "skipping entry with non-UTF-8 name");
                }
                Err(e) => return Err(self.io_error(e)),
            }
        }
        children.sort_by(|a, b| a.filename().cmp(b.filename()));
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::path::LocalPath;

    #[cfg(windows)]
    type ForeignPath = crate::path::UnixPath;
    #[cfg(not(windows))]
    type ForeignPath = crate::path::WindowsPath;

    fn local(p: &std::path::Path) -> LocalPath {
        LocalPath::parse(p.to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_exists_and_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "hello").unwrap();

        let dir_path = local(dir.path());
        let file_path = local(&file);
        let missing = dir_path.join("missing").unwrap();

        assert!(dir_path.exists().unwrap());
        assert!(dir_path.is_directory().unwrap());
        assert!(!dir_path.is_file().unwrap());
        assert!(file_path.is_file().unwrap());
        assert!(!missing.exists().unwrap());
        assert!(!missing.is_file().unwrap());
        assert!(!missing.is_directory().unwrap());
    }

    #[test]
    fn test_stat() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, [0_u8; 42]).unwrap();

        let stat = local(&file).stat().unwrap().unwrap();
        assert_eq!(stat.kind, EntryKind::File);
        assert_eq!(stat.size, 42);

        let stat = local(dir.path()).stat().unwrap().unwrap();
        assert_eq!(stat.kind, EntryKind::Directory);

        assert!(local(dir.path()).join("gone").unwrap().stat().unwrap().is_none());
    }

    #[test]
    fn test_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let p = local(dir.path());
        assert!(p.modification_time().unwrap() > SystemTime::UNIX_EPOCH);

        let err = p.join("gone").unwrap().modification_time().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let children = local(dir.path()).list().unwrap();
        let names: Vec<_> = children.iter().map(LocalPath::filename).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c"]);
        assert_eq!(children[0].parent().unwrap(), local(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_names_with_backslash() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(r"a\b"), "x").unwrap();
        fs::write(dir.path().join("plain"), "x").unwrap();

        let children = local(dir.path()).list().unwrap();
        let names: Vec<_> = children.iter().map(LocalPath::filename).collect();
        assert_eq!(names, ["plain"]);
        assert!(children.iter().all(|c| LocalPath::parse(c.as_str()).unwrap() == *c));
    }

    #[test]
    fn test_list_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let err = local(&file).list().unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));

        let err = local(dir.path()).join("nope").unwrap().list().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_absolute_path() {
        let cwd = std::env::current_dir().unwrap();
        let rel = LocalPath::parse("some/./dir/..").unwrap();
        let abs = rel.absolute_path().unwrap();
        assert!(abs.is_absolute());
        assert_eq!(abs, local(&cwd).join("some").unwrap());

        let already = LocalPath::parse(cwd.to_str().unwrap()).unwrap();
        assert_eq!(already.absolute_path().unwrap(), already.normalize());
    }

    #[test]
    fn test_flavor_mismatch() {
        let err = ForeignPath::parse(r"C:\tmp").unwrap().exists().unwrap_err();

        assert!(matches!(err, PathError::FlavorMismatch { .. }));
        assert!(err.to_string().contains("local file system"));
    }
}

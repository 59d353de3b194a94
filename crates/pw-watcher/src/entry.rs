//! Point-in-time snapshots of a watched tree.

use std::collections::BTreeMap;

use pw_path::{EntryKind, LocalPath, PathError, Stat};
use tracing::warn;

use crate::error::WatchError;
use crate::events::{DirAttrs, FileAttrs};

/// The observed state of one path at one scan.
///
/// Directory children are keyed by filename and kept in name order, so
/// traversals over a snapshot are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    /// A directory and the snapshots of its children.
    Dir {
        /// The directory.
        path: LocalPath,
        /// Its attributes at scan time.
        attrs: DirAttrs,
        /// Child snapshots keyed by filename.
        children: BTreeMap<String, FsEntry>,
    },
    /// A regular file.
    File {
        /// The file.
        path: LocalPath,
        /// Its attributes at scan time.
        attrs: FileAttrs,
    },
    /// Nothing exists at the path.
    Nonexistent(LocalPath),
    /// A root registered before the first scan.
    Unscanned(LocalPath),
    /// Something that is neither a file nor a directory.
    Unknown(LocalPath),
}

impl FsEntry {
    /// Returns the path this snapshot describes.
    #[must_use]
    pub const fn path(&self) -> &LocalPath {
        match self {
            Self::Dir { path, .. }
            | Self::File { path, .. }
            | Self::Nonexistent(path)
            | Self::Unscanned(path)
            | Self::Unknown(path) => path,
        }
    }

    /// Returns `true` for a directory snapshot.
    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Dir { .. })
    }

    /// Returns `true` for a regular file snapshot.
    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the child snapshots of a directory, or `None` otherwise.
    #[must_use]
    pub const fn children(&self) -> Option<&BTreeMap<String, FsEntry>> {
        match self {
            Self::Dir { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Counts the entries in this snapshot, itself included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.values().map(Self::entry_count).sum())
    }

    /// Takes a fresh snapshot of `path`.
    ///
    /// Entries that cannot be read keep their state from `previous` and are
    /// retried on the next call. An entry with no previous state becomes
    /// [`FsEntry::Nonexistent`]. A directory that disappears while it is
    /// being listed is reported as [`FsEntry::Nonexistent`].
    #[must_use]
    pub fn scan(path: &LocalPath, previous: Option<&Self>) -> Self {
        match path.stat() {
            Ok(None) => Self::Nonexistent(path.clone()),
            Ok(Some(stat)) => match stat.kind {
                EntryKind::File => Self::File {
                    path: path.clone(),
                    attrs: FileAttrs::from(&stat),
                },
                EntryKind::Directory => Self::scan_dir(path, &stat, previous),
                EntryKind::Other => Self::Unknown(path.clone()),
            },
            Err(e) => Self::recover(path, previous, e),
        }
    }

    fn scan_dir(path: &LocalPath, stat: &Stat, previous: Option<&Self>) -> Self {
        let listed = match path.list() {
            Ok(listed) => listed,
            Err(e) if e.is_not_found() => return Self::Nonexistent(path.clone()),
            // replaced by a file between stat and list
            Err(PathError::NotADirectory(_)) => return Self::scan(path, previous),
            Err(e) => return Self::recover(path, previous, e),
        };

        let previous_children = previous.and_then(Self::children);
        let mut children = BTreeMap::new();
        for child in listed {
            let name = child.filename().to_owned();
            let before = previous_children.and_then(|c| c.get(&name));
            match Self::scan(&child, before) {
                Self::Nonexistent(_) => {}
                entry => {
                    children.insert(name, entry);
                }
            }
        }

        if matches!(path.exists(), Ok(false)) {
            return Self::Nonexistent(path.clone());
        }
        Self::Dir {
            path: path.clone(),
            attrs: DirAttrs::from(stat),
            children,
        }
    }

    fn recover(path: &LocalPath, previous: Option<&Self>, source: PathError) -> Self {
        let err = WatchError::scan(path.as_str(), source);
        warn!(error = %err, "keeping previous snapshot");
        previous
            .cloned()
            .unwrap_or_else(|| Self::Nonexistent(path.clone()))
    }
}

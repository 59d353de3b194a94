//! Event types for file change notifications.
//!
//! This module provides the attribute snapshots kept for each watched entry
//! and the events produced by diffing two snapshots of the same tree.
//!
//! # Event Flow
//!
//! ```text
//! scan tick
//!     │
//!     ▼
//! FsEntry snapshot ──► diff against previous snapshot
//!                            │
//!                            ▼
//!                      EventBatch (per root)
//!                            │
//!                            ▼
//!               dispatcher queue ──► listeners (FIFO)
//! ```

use std::fmt;
use std::time::SystemTime;

use pw_path::{LocalPath, Stat};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Observed attributes of a directory.
///
/// Two snapshots with different attributes produce
/// [`FileSystemEvent::DirModified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirAttrs {
    /// Last modification time.
    pub modified: SystemTime,
    /// Owning user id, if the platform has one.
    pub uid: Option<u32>,
    /// Owning group id, if the platform has one.
    pub gid: Option<u32>,
    /// Permission bits.
    pub mode: u32,
}

impl From<&Stat> for DirAttrs {
    fn from(stat: &Stat) -> Self {
        Self {
            modified: stat.modified,
            uid: stat.uid,
            gid: stat.gid,
            mode: stat.mode,
        }
    }
}

/// Observed attributes of a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileAttrs {
    /// Last modification time.
    pub modified: SystemTime,
    /// Owning user id, if the platform has one.
    pub uid: Option<u32>,
    /// Owning group id, if the platform has one.
    pub gid: Option<u32>,
    /// Permission bits.
    pub mode: u32,
    /// Size in bytes.
    pub size: u64,
}

impl From<&Stat> for FileAttrs {
    fn from(stat: &Stat) -> Self {
        Self {
            modified: stat.modified,
            uid: stat.uid,
            gid: stat.gid,
            mode: stat.mode,
            size: stat.size,
        }
    }
}

/// What happened to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The entry appeared.
    Created,
    /// The entry disappeared.
    Deleted,
    /// The entry's attributes changed.
    Modified,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
        })
    }
}

/// A change detected between two scans.
///
/// Modification events carry both the old and the new attributes.
///
/// # Examples
///
/// ```
/// use pw_path::LocalPath;
/// use pw_watcher::{EventKind, FileSystemEvent};
///
/// let path = LocalPath::parse("logs/app.log")?;
/// let event = FileSystemEvent::FileCreated { path };
/// assert_eq!(event.kind(), EventKind::Created);
/// assert!(!event.is_dir());
/// # Ok::<(), pw_path::PathError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FileSystemEvent {
    /// A directory appeared.
    DirCreated {
        /// The new directory.
        path: LocalPath,
    },
    /// A directory disappeared.
    DirDeleted {
        /// The removed directory.
        path: LocalPath,
    },
    /// A directory's own attributes changed.
    DirModified {
        /// The directory.
        path: LocalPath,
        /// Attributes seen on the previous scan.
        old: DirAttrs,
        /// Attributes seen on this scan.
        new: DirAttrs,
    },
    /// A file appeared.
    FileCreated {
        /// The new file.
        path: LocalPath,
    },
    /// A file disappeared.
    FileDeleted {
        /// The removed file.
        path: LocalPath,
    },
    /// A file's attributes changed.
    FileModified {
        /// The file.
        path: LocalPath,
        /// Attributes seen on the previous scan.
        old: FileAttrs,
        /// Attributes seen on this scan.
        new: FileAttrs,
    },
}

impl FileSystemEvent {
    /// Returns the path the event is about.
    #[inline]
    #[must_use]
    pub const fn path(&self) -> &LocalPath {
        match self {
            Self::DirCreated { path }
            | Self::DirDeleted { path }
            | Self::DirModified { path, .. }
            | Self::FileCreated { path }
            | Self::FileDeleted { path }
            | Self::FileModified { path, .. } => path,
        }
    }

    /// Returns `true` if the event is about a directory.
    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(
            self,
            Self::DirCreated { .. } | Self::DirDeleted { .. } | Self::DirModified { .. }
        )
    }

    /// Returns what happened to the entry.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::DirCreated { .. } | Self::FileCreated { .. } => EventKind::Created,
            Self::DirDeleted { .. } | Self::FileDeleted { .. } => EventKind::Deleted,
            Self::DirModified { .. } | Self::FileModified { .. } => EventKind::Modified,
        }
    }
}

impl fmt::Display for FileSystemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.is_dir() { "dir" } else { "file" };
        write!(f, "{noun} {}: {}", self.kind(), self.path())
    }
}

/// The events produced by one root during one scan tick.
///
/// # Memory Efficiency
///
/// Uses [`SmallVec`] with inline storage for up to 8 events, avoiding heap
/// allocation for the common tick with few or no changes.
///
/// # Examples
///
/// ```
/// use pw_path::LocalPath;
/// use pw_watcher::{EventBatch, FileSystemEvent};
///
/// let mut batch = EventBatch::new();
/// batch.push(FileSystemEvent::FileDeleted { path: LocalPath::parse("a.txt")? });
///
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch.stats().deleted, 1);
/// # Ok::<(), pw_path::PathError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBatch {
    events: SmallVec<[FileSystemEvent; 8]>,
}

impl EventBatch {
    /// Creates a new empty batch.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event to the batch.
    #[inline]
    pub fn push(&mut self, event: FileSystemEvent) {
        self.events.push(event);
    }

    /// Returns the number of events in this batch.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the batch contains no events.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over the events in emission order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &FileSystemEvent> {
        self.events.iter()
    }

    /// Computes summary statistics for this batch.
    #[must_use]
    pub fn stats(&self) -> EventBatchStats {
        let mut stats = EventBatchStats::default();
        stats.record(self);
        stats
    }
}

impl IntoIterator for EventBatch {
    type Item = FileSystemEvent;
    type IntoIter = smallvec::IntoIter<[FileSystemEvent; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = &'a FileSystemEvent;
    type IntoIter = std::slice::Iter<'a, FileSystemEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<FileSystemEvent> for EventBatch {
    fn from_iter<T: IntoIterator<Item = FileSystemEvent>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

/// Summary counts for one or more batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBatchStats {
    /// Total number of events.
    pub total: usize,
    /// Number of creation events.
    pub created: usize,
    /// Number of deletion events.
    pub deleted: usize,
    /// Number of modification events.
    pub modified: usize,
    /// Number of events about directories.
    pub directories: usize,
}

impl EventBatchStats {
    /// Adds the counts of `batch` to these statistics.
    pub fn record(&mut self, batch: &EventBatch) {
        for event in batch {
            self.total += 1;
            match event.kind() {
                EventKind::Created => self.created += 1,
                EventKind::Deleted => self.deleted += 1,
                EventKind::Modified => self.modified += 1,
            }
            if event.is_dir() {
                self.directories += 1;
            }
        }
    }
}

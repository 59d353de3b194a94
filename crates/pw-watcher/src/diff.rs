//! Turning two snapshots of the same path into change events.
//!
//! | previous \ current   | Dir                     | File                   | Nonexistent / Unknown |
//! |----------------------|-------------------------|------------------------|-----------------------|
//! | Dir                  | DirModified + children  | deleted tree, created  | deleted tree          |
//! | File                 | deleted, created tree   | FileModified           | FileDeleted           |
//! | Nonexistent/Unknown/ | created tree            | FileCreated            | -                     |
//! | Unscanned            |                         |                        |                       |
//!
//! Deleted trees are reported deepest first. Created trees are reported
//! parent first. Siblings are visited in name order.

use std::collections::BTreeSet;

use crate::entry::FsEntry;
use crate::events::{EventBatch, FileSystemEvent};

/// Appends the events that turn `previous` into `current` to `out`.
///
/// An [`FsEntry::Unscanned`] root reports everything it finds as created. A
/// `current` snapshot that is still unscanned (its first scan failed)
/// produces no events.
pub fn compare(previous: &FsEntry, current: &FsEntry, out: &mut EventBatch) {
    match (previous, current) {
        (_, FsEntry::Unscanned(_)) => {}
        (
            FsEntry::Dir {
                path,
                attrs: old,
                children: old_children,
            },
            FsEntry::Dir {
                attrs: new,
                children: new_children,
                ..
            },
        ) => {
            if old != new {
                out.push(FileSystemEvent::DirModified {
                    path: path.clone(),
                    old: *old,
                    new: *new,
                });
            }
            let names: BTreeSet<&String> = old_children.keys().chain(new_children.keys()).collect();
            for name in names {
                match (old_children.get(name), new_children.get(name)) {
                    (Some(before), Some(after)) => compare(before, after, out),
                    (Some(before), None) => report_deleted(before, out),
                    (None, Some(after)) => report_created(after, out),
                    (None, None) => {}
                }
            }
        }
        (FsEntry::File { path, attrs: old }, FsEntry::File { attrs: new, .. }) => {
            if old != new {
                out.push(FileSystemEvent::FileModified {
                    path: path.clone(),
                    old: *old,
                    new: *new,
                });
            }
        }
        (FsEntry::Dir { .. } | FsEntry::File { .. }, _) => {
            report_deleted(previous, out);
            report_created(current, out);
        }
        (FsEntry::Nonexistent(_) | FsEntry::Unknown(_) | FsEntry::Unscanned(_), _) => {
            report_created(current, out);
        }
    }
}

fn report_created(entry: &FsEntry, out: &mut EventBatch) {
    match entry {
        FsEntry::Dir { path, children, .. } => {
            out.push(FileSystemEvent::DirCreated { path: path.clone() });
            for child in children.values() {
                report_created(child, out);
            }
        }
        FsEntry::File { path, .. } => out.push(FileSystemEvent::FileCreated { path: path.clone() }),
        FsEntry::Nonexistent(_) | FsEntry::Unscanned(_) | FsEntry::Unknown(_) => {}
    }
}

fn report_deleted(entry: &FsEntry, out: &mut EventBatch) {
    match entry {
        FsEntry::Dir { path, children, .. } => {
            for child in children.values() {
                report_deleted(child, out);
            }
            out.push(FileSystemEvent::DirDeleted { path: path.clone() });
        }
        FsEntry::File { path, .. } => out.push(FileSystemEvent::FileDeleted { path: path.clone() }),
        FsEntry::Nonexistent(_) | FsEntry::Unscanned(_) | FsEntry::Unknown(_) => {}
    }
}

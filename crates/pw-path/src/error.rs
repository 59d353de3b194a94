//! Error types for the pw-path crate.
//!
//! Parsing, flavor checks and display helpers fail synchronously with a
//! [`PathError`] whose message names the offending path and what is wrong
//! with it, suitable for showing to a user as-is.

use std::path::PathBuf;

use crate::flavor::FlavorKind;

/// Errors raised by path parsing and by the I/O boundary.
///
/// # Examples
///
/// ```
/// use pw_path::{PathError, WindowsPath};
///
/// let err = WindowsPath::parse(r"\\?\UNC\").unwrap_err();
/// assert!(matches!(err, PathError::MalformedUnc { missing: "hostname", .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A UNC path lacks its hostname or drive letter.
    #[error("malformed UNC path '{path}': missing {missing}")]
    MalformedUnc {
        /// The raw input.
        path: String,
        /// The missing component.
        missing: &'static str,
    },

    /// An I/O operation was requested on a path of a foreign flavor.
    #[error("path '{path}' is a {flavor} path but the local file system uses {local} paths")]
    FlavorMismatch {
        /// The offending path.
        path: String,
        /// Flavor of the path.
        flavor: FlavorKind,
        /// Flavor of the host.
        local: FlavorKind,
    },

    /// A path cannot be shortened because the ellipsis itself does not fit.
    #[error(
        "cannot shorten '{path}' ({path_len} characters) to {max_length} characters: \
         the ellipsis '{ellipsis}' alone is {ellipsis_len} characters long"
    )]
    EllipsisTooLong {
        /// The normalized path.
        path: String,
        /// Length of the normalized path in characters.
        path_len: usize,
        /// Requested maximum length.
        max_length: usize,
        /// The ellipsis marker.
        ellipsis: String,
        /// Length of the ellipsis marker in characters.
        ellipsis_len: usize,
    },

    /// A directory was expected but the path names something else.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// The host file system reported an error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The path being accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A host path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(PathBuf),
}

impl PathError {
    /// Creates a new [`PathError::MalformedUnc`] error.
    #[inline]
    pub fn malformed_unc(path: &str, missing: &'static str) -> Self {
        Self::MalformedUnc {
            path: path.to_owned(),
            missing,
        }
    }

    /// Creates a new [`PathError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O error of kind `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

//! Path flavors.
//!
//! A flavor fixes the separator characters and the root recognition rules of
//! a path type. [`Unix`] and [`Windows`] are zero-sized markers implementing
//! [`Flavor`]; the shared algorithms live on [`GenericPath`](crate::GenericPath)
//! and only consult the flavor for constants and [`Flavor::split_root`].

use std::fmt;

use crate::error::PathError;

/// Runtime tag of a flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlavorKind {
    /// `/`-separated paths with a single `/` root.
    Unix,
    /// `\`-separated paths with drive, UNC and drive-relative roots.
    Windows,
}

impl FlavorKind {
    /// Returns the flavor of the host operating system.
    #[inline]
    #[must_use]
    pub const fn local() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for FlavorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of anchor a rooted path starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// The Unix root `/`.
    Unix,
    /// A drive root such as `C:\`.
    Drive,
    /// A network share host such as `\\server\`.
    Unc,
    /// A lone leading `\`, rooted on the current drive.
    DriveRelative,
}

/// A parsed root anchor: its canonical text and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub(crate) name: String,
    pub(crate) kind: RootKind,
}

impl Root {
    fn new(name: impl Into<String>, kind: RootKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Flavor-specific constants and root recognition.
pub trait Flavor: fmt::Debug + Copy + Default + Send + Sync + 'static {
    /// Runtime tag of this flavor.
    const KIND: FlavorKind;

    /// Canonical directory separator.
    const DIR_SEP: char;

    /// Separator of `PATH`-style path lists.
    const PATH_SEP: char;

    /// Separator between a file stem and its extension.
    const EXT_SEP: char = '.';

    /// Recognizes a root anchor at the start of `raw`.
    ///
    /// Returns the root (if any) and the byte offset where the remaining
    /// relative segments begin.
    fn split_root(raw: &str) -> Result<(Option<Root>, usize), PathError>;
}

/// Unix path flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unix;

/// Windows path flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Windows;

/// The flavor of the host operating system.
#[cfg(windows)]
pub type Local = Windows;

/// The flavor of the host operating system.
#[cfg(not(windows))]
pub type Local = Unix;

/// Both flavors split segments on either separator.
#[inline]
pub(crate) fn is_sep(c: char) -> bool {
    c == '/' || c == '\\'
}

impl Flavor for Unix {
    const KIND: FlavorKind = FlavorKind::Unix;
    const DIR_SEP: char = '/';
    const PATH_SEP: char = ':';

    fn split_root(raw: &str) -> Result<(Option<Root>, usize), PathError> {
        if raw.starts_with(is_sep) {
            Ok((Some(Root::new("/", RootKind::Unix)), 1))
        } else {
            Ok((None, 0))
        }
    }
}

impl Flavor for Windows {
    const KIND: FlavorKind = FlavorKind::Windows;
    const DIR_SEP: char = '\\';
    const PATH_SEP: char = ';';

    fn split_root(raw: &str) -> Result<(Option<Root>, usize), PathError> {
        let offset = |rest: &str| raw.len() - rest.len();

        // \\?\UNC\server\share
        if let Some(rest) = strip_sep_prefix(raw, r"\\?\UNC\") {
            let (root, rest) = unc_root(raw, rest)?;
            return Ok((Some(root), offset(rest)));
        }

        // \\?\C:\dir or \\?\server\dir
        if let Some(rest) = strip_sep_prefix(raw, r"\\?\") {
            if rest.trim().eq_ignore_ascii_case("UNC") {
                return Err(PathError::malformed_unc(raw, "hostname"));
            }
            let (root, rest) = match drive_root(rest) {
                Some(found) => found,
                None => unc_root(raw, rest)?,
            };
            return Ok((Some(root), offset(rest)));
        }

        // \\.\C:\dir
        if let Some(rest) = strip_sep_prefix(raw, r"\\.\") {
            let (root, rest) =
                drive_root(rest).ok_or_else(|| PathError::malformed_unc(raw, "drive letter"))?;
            return Ok((Some(root), offset(rest)));
        }

        // \\server\share
        if let Some(rest) = strip_sep_prefix(raw, r"\\") {
            let (root, rest) = unc_root(raw, rest)?;
            return Ok((Some(root), offset(rest)));
        }

        if let Some((root, rest)) = drive_root(raw) {
            return Ok((Some(root), offset(rest)));
        }

        if raw.starts_with(is_sep) {
            return Ok((Some(Root::new("\\", RootKind::DriveRelative)), 1));
        }

        Ok((None, 0))
    }
}

/// Strips `prefix` from `s`, where every `\` in `prefix` matches either
/// separator and letters match case-insensitively.
fn strip_sep_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    let matches = head.chars().zip(prefix.chars()).all(|(h, p)| {
        if p == '\\' {
            is_sep(h)
        } else {
            h.eq_ignore_ascii_case(&p)
        }
    });
    matches.then(|| &s[prefix.len()..])
}

/// Recognizes `X:` at the start of `s`, uppercasing the drive letter.
fn drive_root(s: &str) -> Option<(Root, &str)> {
    let mut chars = s.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    if chars.next() != Some(':') {
        return None;
    }
    let name = format!("{}:\\", letter.to_ascii_uppercase());
    Some((Root::new(name, RootKind::Drive), &s[2..]))
}

/// Takes the hostname segment of a UNC path.
fn unc_root<'a>(raw: &str, rest: &'a str) -> Result<(Root, &'a str), PathError> {
    let end = rest.find(is_sep).unwrap_or(rest.len());
    let host = rest[..end].trim();
    // a bare `\\?` or `\\.` is a truncated device prefix, not a host
    match host {
        "" | "?" => return Err(PathError::malformed_unc(raw, "hostname")),
        "." => return Err(PathError::malformed_unc(raw, "drive letter")),
        _ => {}
    }
    Ok((Root::new(format!(r"\\{host}\"), RootKind::Unc), &rest[end..]))
}

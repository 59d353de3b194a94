//! The immutable path value.
//!
//! A [`GenericPath`] is a chain of reference-counted segment nodes linked
//! from leaf to root. Every node stores its own canonical string, so
//! [`GenericPath::as_str`] is free and derived paths (`parent`, `join`,
//! `normalize`) share their prefix nodes instead of copying them.
//!
//! # Canonical form
//!
//! Parsing splits on both `/` and `\` regardless of flavor, drops empty
//! segments, optionally trims each segment, and reassembles with the
//! flavor's separator:
//!
//! ```
//! use pw_path::{UnixPath, WindowsPath};
//!
//! assert_eq!(UnixPath::parse(r"/usr\\local//bin")?.as_str(), "/usr/local/bin");
//! assert_eq!(WindowsPath::parse("c:/Users/ Public ")?.as_str(), r"C:\Users\Public");
//! # Ok::<(), pw_path::PathError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::PathError;
use crate::flavor::{is_sep, Flavor, FlavorKind, Local, Root, RootKind, Unix, Windows};

/// A path using Unix syntax.
pub type UnixPath = GenericPath<Unix>;

/// A path using Windows syntax.
pub type WindowsPath = GenericPath<Windows>;

/// A path using the syntax of the host operating system.
pub type LocalPath = GenericPath<Local>;

/// Options controlling [`GenericPath::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Trim whitespace around the input and around every segment.
    pub trim_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}

#[derive(Debug)]
struct Node {
    /// Canonical string of the path ending at this node.
    full: Box<str>,
    /// Byte offset of this node's own segment within `full`.
    name_start: usize,
    /// Set only on anchor nodes, which never have a parent.
    root: Option<RootKind>,
    parent: Option<Arc<Node>>,
}

impl Node {
    fn root(root: Root) -> Arc<Self> {
        Arc::new(Self {
            full: root.name.into_boxed_str(),
            name_start: 0,
            root: Some(root.kind),
            parent: None,
        })
    }

    fn child<F: Flavor>(parent: Option<Arc<Self>>, name: &str) -> Arc<Self> {
        let (full, name_start) = match &parent {
            None => (Box::from(name), 0),
            Some(p) => {
                let mut s = String::with_capacity(p.full.len() + 1 + name.len());
                s.push_str(&p.full);
                if !p.full.ends_with(F::DIR_SEP) {
                    s.push(F::DIR_SEP);
                }
                let start = s.len();
                s.push_str(name);
                (s.into_boxed_str(), start)
            }
        };
        Arc::new(Self {
            full,
            name_start,
            root: None,
            parent,
        })
    }

    fn name(&self) -> &str {
        &self.full[self.name_start..]
    }
}

/// An immutable, flavor-specific path.
///
/// Use the aliases [`UnixPath`], [`WindowsPath`] and [`LocalPath`] rather than
/// naming the flavor parameter directly. Equality, ordering and hashing
/// compare canonical strings.
///
/// # Examples
///
/// ```
/// use pw_path::UnixPath;
///
/// let path = UnixPath::parse("/home/user/notes.tar.gz")?;
/// assert_eq!(path.filename(), "notes.tar.gz");
/// assert_eq!(path.filename_stem(), "notes.tar");
/// assert_eq!(path.filename_ext(), Some("gz"));
/// assert_eq!(path.parent().map(|p| p.to_string()), Some("/home/user".to_owned()));
/// assert!(path.is_absolute());
/// # Ok::<(), pw_path::PathError>(())
/// ```
pub struct GenericPath<F: Flavor> {
    leaf: Option<Arc<Node>>,
    flavor: PhantomData<F>,
}

impl<F: Flavor> GenericPath<F> {
    /// The empty path. Its filename and string form are `""`.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            leaf: None,
            flavor: PhantomData,
        }
    }

    const fn from_leaf(leaf: Option<Arc<Node>>) -> Self {
        Self {
            leaf,
            flavor: PhantomData,
        }
    }

    /// Parses `raw` with default [`ParseOptions`].
    ///
    /// Empty input yields the [empty path](Self::empty).
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        Self::parse_with(raw, ParseOptions::default())
    }

    /// Parses `raw` into a canonical segment chain.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MalformedUnc`] for a Windows UNC prefix without
    /// its hostname or drive letter.
    pub fn parse_with(raw: &str, options: ParseOptions) -> Result<Self, PathError> {
        let raw = if options.trim_whitespace { raw.trim() } else { raw };
        if raw.is_empty() {
            return Ok(Self::empty());
        }

        let (root, offset) = F::split_root(raw)?;
        let leaf = root.map(Node::root);
        Ok(Self::from_leaf(Self::append_segments(leaf, &raw[offset..], options)))
    }

    fn append_segments(
        mut leaf: Option<Arc<Node>>,
        rest: &str,
        options: ParseOptions,
    ) -> Option<Arc<Node>> {
        for segment in rest.split(is_sep) {
            let segment = if options.trim_whitespace { segment.trim() } else { segment };
            if segment.is_empty() {
                continue;
            }
            leaf = Some(Node::child::<F>(leaf, segment));
        }
        leaf
    }

    /// Splits a `PATH`-style list on the flavor's path separator.
    ///
    /// Blank entries are skipped.
    ///
    /// ```
    /// use pw_path::UnixPath;
    ///
    /// let paths = UnixPath::split_path_list("/usr/bin::/bin")?;
    /// assert_eq!(paths.len(), 2);
    /// assert_eq!(paths[1].as_str(), "/bin");
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    pub fn split_path_list(list: &str) -> Result<Vec<Self>, PathError> {
        list.split(F::PATH_SEP)
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Returns the canonical string form.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.leaf.as_deref().map_or("", |n| &n.full)
    }

    /// Returns the path as a [`Utf8Path`].
    #[inline]
    #[must_use]
    pub fn as_utf8_path(&self) -> &Utf8Path {
        Utf8Path::new(self.as_str())
    }

    /// Returns the flavor of this path.
    #[inline]
    #[must_use]
    pub const fn flavor(&self) -> FlavorKind {
        F::KIND
    }

    /// Returns the directory separator of this flavor.
    #[inline]
    #[must_use]
    pub const fn dir_sep(&self) -> char {
        F::DIR_SEP
    }

    /// Returns the path-list separator of this flavor.
    #[inline]
    #[must_use]
    pub const fn path_sep(&self) -> char {
        F::PATH_SEP
    }

    /// Returns the extension separator of this flavor.
    #[inline]
    #[must_use]
    pub const fn ext_sep(&self) -> char {
        F::EXT_SEP
    }

    /// Returns `true` for the empty path.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.leaf.is_none()
    }

    /// Returns the last segment, or the root marker for a root path.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        self.leaf.as_deref().map_or("", Node::name)
    }

    fn has_extension(&self) -> bool {
        let name = self.filename();
        !self.is_root() && name != "." && name != ".." && name.chars().nth(1).is_some()
    }

    /// Returns the part of the filename after its last extension separator.
    ///
    /// `.`, `..`, single-character names and roots have no extension.
    #[must_use]
    pub fn filename_ext(&self) -> Option<&str> {
        if !self.has_extension() {
            return None;
        }
        let name = self.filename();
        name.rfind(F::EXT_SEP)
            .map(|idx| &name[idx + F::EXT_SEP.len_utf8()..])
    }

    /// Returns the filename without its extension.
    #[must_use]
    pub fn filename_stem(&self) -> &str {
        let name = self.filename();
        if !self.has_extension() {
            return name;
        }
        name.rfind(F::EXT_SEP).map_or(name, |idx| &name[..idx])
    }

    /// Returns the enclosing path, or `None` at a root or relative top.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.leaf
            .as_ref()
            .and_then(|n| n.parent.clone())
            .map(|p| Self::from_leaf(Some(p)))
    }

    fn top(&self) -> Option<&Arc<Node>> {
        let mut cur = self.leaf.as_ref()?;
        while let Some(parent) = cur.parent.as_ref() {
            cur = parent;
        }
        Some(cur)
    }

    /// Returns the anchor this path starts from, if any.
    #[must_use]
    pub fn root(&self) -> Option<Self> {
        self.top()
            .filter(|n| n.root.is_some())
            .map(|n| Self::from_leaf(Some(Arc::clone(n))))
    }

    /// Returns the kind of anchor this path starts from, if any.
    #[must_use]
    pub fn root_kind(&self) -> Option<RootKind> {
        self.top().and_then(|n| n.root)
    }

    /// Returns `true` if the path starts from a root anchor.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.root_kind().is_some()
    }

    /// Returns `true` if the path is nothing but a root anchor.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.leaf.as_deref().is_some_and(|n| n.root.is_some())
    }

    fn nodes(&self) -> SmallVec<[&Arc<Node>; 16]> {
        let mut nodes = SmallVec::new();
        let mut cur = self.leaf.as_ref();
        while let Some(node) = cur {
            nodes.push(node);
            cur = node.parent.as_ref();
        }
        nodes.reverse();
        nodes
    }

    /// Returns the segments from root to leaf. A root anchor is the first
    /// segment and keeps its trailing separator.
    ///
    /// ```
    /// use pw_path::WindowsPath;
    ///
    /// let path = WindowsPath::parse(r"\\server\share\file.txt")?;
    /// assert_eq!(path.segments(), [r"\\server\", "share", "file.txt"]);
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.nodes().into_iter().map(|n| n.name()).collect()
    }

    /// Returns the number of segments, counting a root anchor.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.leaf.as_deref();
        while let Some(node) = cur {
            depth += 1;
            cur = node.parent.as_deref();
        }
        depth
    }

    /// Appends `other` to this path.
    ///
    /// Input without separators is trimmed like a parsed segment and appended
    /// without re-parsing. Input with separators is parsed as a sub-path; an anchored
    /// sub-path replaces this path entirely.
    ///
    /// ```
    /// use pw_path::UnixPath;
    ///
    /// let base = UnixPath::parse("a/b")?;
    /// assert_eq!(base.join("../c")?.normalize().as_str(), "a/c");
    /// assert_eq!(base.join("c.txt")?.as_str(), "a/b/c.txt");
    /// assert_eq!(base.join("/etc")?.as_str(), "/etc");
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    pub fn join(&self, other: &str) -> Result<Self, PathError> {
        let trim = ParseOptions::default().trim_whitespace;
        let other = if trim { other.trim() } else { other };
        if other.contains(is_sep) {
            let sub = Self::parse(other)?;
            return Ok(self.join_path(&sub));
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Self::parse(other);
        }
        Ok(self.join_segment(other))
    }

    /// Appends one literal segment. `name` must not contain separators.
    pub(crate) fn join_segment(&self, name: &str) -> Self {
        Self::from_leaf(Some(Node::child::<F>(self.leaf.clone(), name)))
    }

    /// Appends an already parsed path.
    #[must_use]
    pub fn join_path(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() || other.is_absolute() {
            return other.clone();
        }
        let leaf = other
            .nodes()
            .into_iter()
            .fold(self.leaf.clone(), |leaf, n| Some(Node::child::<F>(leaf, n.name())));
        Self::from_leaf(leaf)
    }

    /// Appends every element of `parts`, parsing them in a single pass.
    ///
    /// ```
    /// use pw_path::WindowsPath;
    ///
    /// let base = WindowsPath::parse(r"C:\Program Files")?;
    /// let joined = base.join_all(["Vendor", "app/bin", "tool.exe"])?;
    /// assert_eq!(joined.as_str(), r"C:\Program Files\Vendor\app\bin\tool.exe");
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    pub fn join_all<I>(&self, parts: I) -> Result<Self, PathError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut buf = String::new();
        for part in parts {
            let part = part.as_ref();
            if part.is_empty() {
                continue;
            }
            if !buf.is_empty() {
                buf.push(F::DIR_SEP);
            }
            buf.push_str(part);
        }
        self.join(&buf)
    }

    /// Lexically resolves `.` and `..` segments.
    ///
    /// `.` is dropped. `..` removes the preceding segment; at an anchored
    /// root it is dropped, and on a relative path with nothing left to remove
    /// it is kept.
    ///
    /// ```
    /// use pw_path::{UnixPath, WindowsPath};
    ///
    /// assert_eq!(UnixPath::parse("a/../../b")?.normalize().as_str(), "../b");
    /// assert_eq!(WindowsPath::parse(r"C:\a\..\..\b")?.normalize().as_str(), r"C:\b");
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let nodes = self.nodes();
        if !nodes.iter().any(|n| matches!(n.name(), "." | "..")) {
            return self.clone();
        }

        let (root, rest) = match nodes.split_first() {
            Some((first, rest)) if first.root.is_some() => (Some(Arc::clone(first)), rest),
            _ => (None, &nodes[..]),
        };

        let mut kept: SmallVec<[&str; 16]> = SmallVec::new();
        for node in rest {
            match node.name() {
                "." => {}
                ".." => match kept.last() {
                    Some(&last) if last != ".." => {
                        kept.pop();
                    }
                    _ if root.is_some() => {}
                    _ => kept.push(".."),
                },
                name => kept.push(name),
            }
        }

        let leaf = kept
            .into_iter()
            .fold(root, |leaf, name| Some(Node::child::<F>(leaf, name)));
        Self::from_leaf(leaf)
    }
}

impl<F: Flavor> Clone for GenericPath<F> {
    fn clone(&self) -> Self {
        Self::from_leaf(self.leaf.clone())
    }
}

impl<F: Flavor> Default for GenericPath<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Flavor> fmt::Display for GenericPath<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<F: Flavor> fmt::Debug for GenericPath<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match F::KIND {
            FlavorKind::Unix => "UnixPath",
            FlavorKind::Windows => "WindowsPath",
        };
        f.debug_tuple(name).field(&self.as_str()).finish()
    }
}

impl<F: Flavor> PartialEq for GenericPath<F> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<F: Flavor> Eq for GenericPath<F> {}

impl<F: Flavor> PartialOrd for GenericPath<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Flavor> Ord for GenericPath<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<F: Flavor> Hash for GenericPath<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<F: Flavor> AsRef<str> for GenericPath<F> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<F: Flavor> FromStr for GenericPath<F> {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<F: Flavor> TryFrom<&Utf8Path> for GenericPath<F> {
    type Error = PathError;

    fn try_from(path: &Utf8Path) -> Result<Self, Self::Error> {
        Self::parse(path.as_str())
    }
}

impl<F: Flavor> Serialize for GenericPath<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, F: Flavor> Deserialize<'de> for GenericPath<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unix(s: &str) -> UnixPath {
        UnixPath::parse(s).unwrap()
    }

    fn win(s: &str) -> WindowsPath {
        WindowsPath::parse(s).unwrap()
    }

    #[test]
    fn test_unix_separators() {
        insta::assert_snapshot!(unix(r"a\b/c").as_str(), @"a/b/c");
        insta::assert_snapshot!(unix("//usr///lib/").as_str(), @"/usr/lib");
        assert_eq!(unix("/").as_str(), "/");
        assert!(unix("/").is_root());
    }

    #[test]
    fn test_windows_separators() {
        insta::assert_snapshot!(win("a/b\\c").as_str(), @r"a\b\c");
        insta::assert_snapshot!(win("c:/dir").as_str(), @r"C:\dir");
        assert_eq!(win(r"c:\dir").as_str(), r"C:\dir");
        assert_eq!(win("C:").as_str(), "C:\\");
        assert!(win("C:").is_root());
    }

    #[test]
    fn test_windows_unc_canonicalization() {
        for raw in [r"\\server\dir", r"\\?\UNC\server\dir", r"\\?\server\dir"] {
            assert_eq!(win(raw).as_str(), r"\\server\dir", "{raw}");
        }
        for raw in [r"\\?\C:\dir", r"\\.\C:\dir"] {
            assert_eq!(win(raw).as_str(), r"C:\dir", "{raw}");
        }
    }

    #[test]
    fn test_windows_malformed_unc_errors() {
        let err = WindowsPath::parse(r"\\\dir").unwrap_err();
        assert!(matches!(err, PathError::MalformedUnc { missing: "hostname", .. }));
        assert!(err.to_string().contains(r"\\\dir"));
    }

    #[test]
    fn test_reparse_is_stable() {
        for raw in ["a//b/ c /", r"\x\y", "/", "../..", "~/notes"] {
            let once = unix(raw);
            assert_eq!(unix(once.as_str()), once, "{raw}");
        }
        for raw in [r"c:/x\y", r"\\?\UNC\h\s\f", r"\rel", "a/b"] {
            let once = win(raw);
            assert_eq!(win(once.as_str()), once, "{raw}");
        }
    }

    #[test]
    fn test_trim_whitespace_option() {
        let trimmed = unix("  a / b  ");
        assert_eq!(trimmed.as_str(), "a/b");

        let raw = UnixPath::parse_with(" a / b ", ParseOptions { trim_whitespace: false }).unwrap();
        assert_eq!(raw.as_str(), " a / b ");
    }

    #[test]
    fn test_empty_path() {
        let empty = unix("");
        assert!(empty.is_empty());
        assert_eq!(empty.filename(), "");
        assert!(empty.parent().is_none());
        assert!(!empty.is_absolute());
        assert_eq!(unix("   "), UnixPath::empty());
    }

    #[test]
    fn test_filename_parts() {
        let p = unix("dir/archive.tar.gz");
        assert_eq!(p.filename(), "archive.tar.gz");
        assert_eq!(p.filename_stem(), "archive.tar");
        assert_eq!(p.filename_ext(), Some("gz"));

        let p = unix("dir/README");
        assert_eq!(p.filename_stem(), "README");
        assert_eq!(p.filename_ext(), None);

        for special in [".", "..", "a", "/"] {
            let p = unix(special);
            assert_eq!(p.filename_ext(), None, "{special}");
            assert_eq!(p.filename_stem(), p.filename(), "{special}");
        }
    }

    #[test]
    fn test_parent_and_root() {
        let p = unix("/a/b");
        assert_eq!(p.parent().unwrap().as_str(), "/a");
        assert_eq!(p.parent().unwrap().parent().unwrap().as_str(), "/");
        assert!(p.parent().unwrap().parent().unwrap().parent().is_none());
        assert_eq!(p.root().unwrap().as_str(), "/");

        let rel = unix("a/b");
        assert!(rel.root().is_none());
        assert!(!rel.is_absolute());
        assert_eq!(rel.parent().unwrap().as_str(), "a");
        assert!(rel.parent().unwrap().parent().is_none());
    }

    #[test]
    fn test_windows_roots() {
        let p = win(r"\\server\share\f");
        assert_eq!(p.root_kind(), Some(RootKind::Unc));
        assert_eq!(p.root().unwrap().as_str(), r"\\server\");
        assert!(p.is_absolute());

        let p = win(r"\temp");
        assert_eq!(p.root_kind(), Some(RootKind::DriveRelative));
        assert_eq!(p.root().unwrap().as_str(), "\\");
    }

    #[test]
    fn test_segments_and_depth() {
        let p = unix("/usr/local/bin");
        assert_eq!(p.segments(), ["/", "usr", "local", "bin"]);
        assert_eq!(p.depth(), 4);
        assert_eq!(UnixPath::empty().depth(), 0);
    }

    #[test]
    fn test_join() {
        let base = unix("/srv");
        assert_eq!(base.join("data").unwrap().as_str(), "/srv/data");
        assert_eq!(base.join("data/../logs").unwrap().as_str(), "/srv/data/../logs");
        assert_eq!(base.join("").unwrap(), base);
        assert_eq!(UnixPath::empty().join("x/y").unwrap().as_str(), "x/y");
        assert_eq!(UnixPath::empty().join("x").unwrap().as_str(), "x");

        let root = unix("/");
        assert_eq!(root.join("etc").unwrap().as_str(), "/etc");

        let drive = win("C:");
        assert_eq!(drive.join("Windows").unwrap().as_str(), r"C:\Windows");
    }

    #[test]
    fn test_join_trims_like_parse() {
        let base = unix("/srv");
        let joined = base.join(" data ").unwrap();
        assert_eq!(joined.as_str(), "/srv/data");
        assert_eq!(unix(joined.as_str()), joined);
        assert_eq!(base.join("   ").unwrap(), base);
    }

    #[test]
    fn test_join_then_normalize() {
        let p = unix("a/b").join("../c").unwrap().normalize();
        assert_eq!(p.as_str(), "a/c");
    }

    #[test]
    fn test_join_all() {
        let p = unix("/opt").join_all(["a", "", "b/c", "d"]).unwrap();
        assert_eq!(p.as_str(), "/opt/a/b/c/d");

        let p = unix("/opt").join_all(Vec::<String>::new()).unwrap();
        assert_eq!(p.as_str(), "/opt");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(unix("a/./b/../c").normalize().as_str(), "a/c");
        assert_eq!(unix("a/../../b").normalize().as_str(), "../b");
        assert_eq!(unix("../../a").normalize().as_str(), "../../a");
        assert_eq!(unix("/../a").normalize().as_str(), "/a");
        assert_eq!(unix("/a/b/../../..").normalize().as_str(), "/");
        assert_eq!(unix("./.").normalize().as_str(), "");
        assert_eq!(win(r"C:\a\..\..\b").normalize().as_str(), r"C:\b");
        assert_eq!(win(r"\\srv\share\..\..\x").normalize().as_str(), r"\\srv\x");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["a/../../b/./c/..", "/x/../../y", "../a/./b", "./", "a/b/c"] {
            let once = unix(raw).normalize();
            assert_eq!(once.normalize(), once, "{raw}");
        }
    }

    #[test]
    fn test_split_path_list() {
        let list = WindowsPath::split_path_list(r"C:\Windows;;c:\tools ").unwrap();
        let strs: Vec<_> = list.iter().map(WindowsPath::as_str).collect();
        assert_eq!(strs, [r"C:\Windows", r"C:\tools"]);
    }

    #[test]
    fn test_ordering_and_equality() {
        assert_eq!(unix("a//b"), unix("a/b"));
        assert!(unix("a/b") < unix("a/c"));
        let mut set = std::collections::HashSet::new();
        set.insert(unix("a/b"));
        assert!(set.contains(&unix("a\\b")));
    }

    #[test]
    fn test_serde_as_string() {
        let p = win("c:/data");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#""C:\\data""#);
        let back: WindowsPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let bad = serde_json::from_str::<WindowsPath>(r#""\\\\""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_debug_and_from_str() {
        let p: UnixPath = "x/y".parse().unwrap();
        assert_eq!(format!("{p:?}"), r#"UnixPath("x/y")"#);
        assert_eq!(p.to_string(), "x/y");
    }
}

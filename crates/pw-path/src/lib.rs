//! Immutable, dual-flavor path values.
//!
//! This crate provides [`GenericPath`], a lexically parsed path with two
//! flavors: [`UnixPath`] and [`WindowsPath`]. [`LocalPath`] selects the
//! flavor of the host operating system.
//!
//! # Overview
//!
//! - Parsing accepts both `/` and `\` as separators and always produces the
//!   flavor's canonical string form
//! - Windows drive letters are uppercased and the UNC prefixes
//!   `\\server\`, `\\?\UNC\server\`, `\\?\server\`, `\\?\C:\` and `\\.\C:\`
//!   are folded into `\\server\` or `C:\`
//! - [`GenericPath::normalize`], [`GenericPath::join`] and
//!   [`GenericPath::ellipsize`] are purely lexical
//! - Only the operations in [`io`] touch the file system, and only for paths
//!   of the local flavor
//!
//! # Examples
//!
//! ```
//! use pw_path::{UnixPath, WindowsPath};
//!
//! let unc = WindowsPath::parse(r"\\?\UNC\fileserver\public\docs")?;
//! assert_eq!(unc.as_str(), r"\\fileserver\public\docs");
//!
//! let src = UnixPath::parse("project/src")?;
//! let lib = src.join("../lib/mod.rs")?.normalize();
//! assert_eq!(lib.as_str(), "project/lib/mod.rs");
//! assert_eq!(lib.filename_stem(), "mod");
//! # Ok::<(), pw_path::PathError>(())
//! ```
//!
//! # Crate Dependencies
//!
//! ```text
//! pw-cli ──► pw-watcher ──► pw-path
//!                      └──► pw-core
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod ellipsize;
pub mod error;
pub mod flavor;
pub mod io;
pub mod path;

pub use ellipsize::EllipsizeOptions;
pub use error::PathError;
pub use flavor::{Flavor, FlavorKind, Local, RootKind, Unix, Windows};
pub use io::{EntryKind, Stat};
pub use path::{GenericPath, LocalPath, ParseOptions, UnixPath, WindowsPath};

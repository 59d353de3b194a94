//! Shortening paths for display.

use crate::error::PathError;
use crate::flavor::Flavor;
use crate::path::GenericPath;

/// Options for [`GenericPath::ellipsize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipsizeOptions<'a> {
    /// Alternate between keeping leading and trailing segments, starting on
    /// the left. When `false`, only trailing segments are kept.
    pub start_from_left: bool,
    /// Marker spliced in place of the dropped segments.
    pub ellipsis: &'a str,
}

impl Default for EllipsizeOptions<'_> {
    fn default() -> Self {
        Self {
            start_from_left: true,
            ellipsis: "...",
        }
    }
}

impl<F: Flavor> GenericPath<F> {
    /// Shortens the normalized path to at most `max_length` characters using
    /// default [`EllipsizeOptions`].
    ///
    /// ```
    /// use pw_path::UnixPath;
    ///
    /// let path = UnixPath::parse("/home/user/documents/report.txt")?;
    /// assert_eq!(path.ellipsize(20)?, "/home/.../report.txt");
    /// assert_eq!(path.ellipsize(100)?, "/home/user/documents/report.txt");
    /// # Ok::<(), pw_path::PathError>(())
    /// ```
    pub fn ellipsize(&self, max_length: usize) -> Result<String, PathError> {
        self.ellipsize_with(max_length, EllipsizeOptions::default())
    }

    /// Shortens the normalized path by keeping whole segments from its ends.
    ///
    /// Segments are taken greedily, alternating left and right (or right
    /// only), until the next one would push the result past `max_length`.
    /// A path that already fits is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EllipsisTooLong`] when the path does not fit and
    /// `max_length` is shorter than the ellipsis itself.
    pub fn ellipsize_with(
        &self,
        max_length: usize,
        options: EllipsizeOptions<'_>,
    ) -> Result<String, PathError> {
        let normalized = self.normalize();
        let full = normalized.as_str();
        let full_len = full.chars().count();
        if full_len <= max_length {
            return Ok(full.to_owned());
        }

        let ellipsis_len = options.ellipsis.chars().count();
        if max_length < ellipsis_len {
            return Err(PathError::EllipsisTooLong {
                path: full.to_owned(),
                path_len: full_len,
                max_length,
                ellipsis: options.ellipsis.to_owned(),
                ellipsis_len,
            });
        }

        let segments = normalized.segments();
        let mut left = String::new();
        let mut right: Vec<&str> = Vec::new();
        let mut used = ellipsis_len;
        let (mut lo, mut hi) = (0, segments.len());
        let mut take_left = options.start_from_left;

        while lo < hi {
            if take_left {
                let segment = segments[lo];
                let needs_sep = !segment.ends_with(F::DIR_SEP);
                let cost = segment.chars().count() + usize::from(needs_sep);
                if used + cost > max_length {
                    break;
                }
                left.push_str(segment);
                if needs_sep {
                    left.push(F::DIR_SEP);
                }
                used += cost;
                lo += 1;
            } else {
                let segment = segments[hi - 1];
                let cost = segment.chars().count() + 1;
                if used + cost > max_length {
                    break;
                }
                right.push(segment);
                used += cost;
                hi -= 1;
            }
            if options.start_from_left {
                take_left = !take_left;
            }
        }

        let mut out = left;
        out.push_str(options.ellipsis);
        for segment in right.iter().rev() {
            out.push(F::DIR_SEP);
            out.push_str(segment);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{UnixPath, WindowsPath};

    const LONG: &str = "/home/user/documents/projects/report.txt";

    #[test]
    fn test_fits_unchanged() {
        let p = UnixPath::parse(LONG).unwrap();
        assert_eq!(p.ellipsize(LONG.len()).unwrap(), LONG);
        assert_eq!(p.ellipsize(1000).unwrap(), LONG);
    }

    #[test]
    fn test_alternating_from_left() {
        let p = UnixPath::parse(LONG).unwrap();
        insta::assert_snapshot!(p.ellipsize(20).unwrap(), @"/home/.../report.txt");
        insta::assert_snapshot!(p.ellipsize(30).unwrap(), @"/home/.../projects/report.txt");
    }

    #[test]
    fn test_right_only() {
        let p = UnixPath::parse(LONG).unwrap();
        let options = EllipsizeOptions {
            start_from_left: false,
            ..EllipsizeOptions::default()
        };
        assert_eq!(p.ellipsize_with(20, options).unwrap(), ".../report.txt");
        assert_eq!(p.ellipsize_with(23, options).unwrap(), ".../projects/report.txt");
    }

    #[test]
    fn test_windows_drive_kept_on_left() {
        let p = WindowsPath::parse(r"C:\Users\someone\AppData\Local\Temp\file.log").unwrap();
        assert_eq!(p.ellipsize(20).unwrap(), r"C:\...\file.log");
        assert_eq!(p.ellipsize(21).unwrap(), r"C:\Users\...\file.log");
    }

    #[test]
    fn test_never_exceeds_bound() {
        let p = UnixPath::parse(LONG).unwrap();
        for max in 3..=LONG.len() + 2 {
            let out = p.ellipsize(max).unwrap();
            assert!(out.chars().count() <= max, "{max}: {out}");
        }
    }

    #[test]
    fn test_only_ellipsis_when_nothing_fits() {
        let p = UnixPath::parse("/averyveryverylongsegment/another").unwrap();
        assert_eq!(p.ellipsize(4).unwrap(), "/...");
        assert_eq!(p.ellipsize(3).unwrap(), "...");
    }

    #[test]
    fn test_custom_ellipsis() {
        let p = UnixPath::parse(LONG).unwrap();
        let options = EllipsizeOptions {
            start_from_left: true,
            ellipsis: "…",
        };
        assert_eq!(p.ellipsize_with(18, options).unwrap(), "/home/…/report.txt");
    }

    #[test]
    fn test_ellipsis_too_long() {
        let p = UnixPath::parse(LONG).unwrap();
        let err = p.ellipsize(2).unwrap_err();
        assert!(matches!(
            err,
            PathError::EllipsisTooLong { max_length: 2, ellipsis_len: 3, .. }
        ));
    }

    #[test]
    fn test_operates_on_normalized_form() {
        let p = UnixPath::parse("/a/./b/../c").unwrap();
        assert_eq!(p.ellipsize(10).unwrap(), "/a/c");
    }
}

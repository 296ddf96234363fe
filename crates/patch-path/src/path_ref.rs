use std::fmt::{self, Debug, Display, Formatter};

use crate::{parser::escape_token, PatchPath};

/// A borrowed view of a path, optionally rooted below a prefix path.
///
/// The prefix tokens come first when iterating, so `/c` viewed under `/a/b`
/// behaves exactly like `/a/b/c`. Displayed tokens are escaped (`~0`, `~1`).
#[derive(Copy, Clone)]
pub struct PathRef<'a> {
    pub(crate) prefix: Option<&'a [String]>,
    pub(crate) path: &'a [String],
}

impl PartialEq<PatchPath> for PathRef<'_> {
    fn eq(&self, other: &PatchPath) -> bool {
        self.iter().eq(other.0.iter())
    }
}

impl PartialEq for PathRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for PathRef<'_> {}

impl Display for PathRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for token in self.iter() {
            f.write_str("/")?;
            f.write_str(&escape_token(token))?;
        }

        Ok(())
    }
}

impl Debug for PathRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl<'a> PathRef<'a> {
    pub fn to_owned(&self) -> PatchPath {
        PatchPath(self.iter().cloned().collect())
    }

    /// Splits off the final token, returning the parent path and the token.
    pub fn split_last(&self) -> Option<(PathRef<'a>, &'a str)> {
        if let Some((token, parent)) = self.path.split_last() {
            return Some((
                PathRef {
                    prefix: self.prefix,
                    path: parent,
                },
                token,
            ));
        }

        self.prefix
            .and_then(|prefix| prefix.split_last())
            .map(|(token, parent)| {
                (
                    PathRef {
                        prefix: None,
                        path: parent,
                    },
                    token.as_str(),
                )
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a String> {
        self.prefix
            .into_iter()
            .flat_map(|prefix| prefix.iter())
            .chain(self.path.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.prefix.map(<[String]>::len).unwrap_or_default() + self.path.len()
    }

    /// Token-wise prefix test: `/a/b` starts with `/a` but not with `/a/b/c`,
    /// and `/a/bc` does not start with `/a/b`.
    pub fn starts_with(&self, needle: PathRef<'_>) -> bool {
        if needle.len() > self.len() {
            return false;
        }

        self.iter().zip(needle.iter()).all(|(a, b)| a == b)
    }

    /// True when `self` starts with `other` and is strictly longer.
    pub fn is_proper_descendant_of(&self, other: PathRef<'_>) -> bool {
        self.len() > other.len() && self.starts_with(other)
    }
}

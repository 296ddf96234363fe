use std::{
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use crate::{parser::parse_tokens, ParsePathError, PathRef};

/// An owned, tokenized patch path such as `/a/b/0`.
#[derive(Clone, Eq)]
pub struct PatchPath(pub(crate) Vec<String>);

impl PartialEq<PathRef<'_>> for PatchPath {
    fn eq(&self, other: &PathRef<'_>) -> bool {
        self.0.iter().eq(other.iter())
    }
}

impl PartialEq for PatchPath {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Hash for PatchPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for token in &self.0 {
            token.hash(state);
        }
    }
}

impl Display for PatchPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.as_ref(), f)
    }
}

impl Debug for PatchPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

// The textual form is the escaped one written by `Display`.
impl FromStr for PatchPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, true)
    }
}

impl Serialize for PatchPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PatchPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(|err: ParsePathError| D::Error::custom(err.to_string()))
    }
}

impl PatchPath {
    /// The empty path. Only useful as a prefix; operations always need at least one token.
    #[inline]
    pub fn root() -> PatchPath {
        PatchPath(Vec::new())
    }

    /// Parses `input`, optionally applying RFC 6901 `~0`/`~1` unescaping to each token.
    pub fn parse(input: &str, unescape: bool) -> Result<Self, ParsePathError> {
        parse_tokens(input, unescape).map(Self)
    }

    #[inline]
    pub fn as_ref(&self) -> PathRef<'_> {
        PathRef {
            prefix: None,
            path: &self.0,
        }
    }

    #[inline]
    pub fn with_prefix<'a>(&'a self, prefix: &'a PatchPath) -> PathRef<'a> {
        self.with_prefix_opt(Some(prefix))
    }

    #[inline]
    pub fn with_prefix_opt<'a>(&'a self, prefix: Option<&'a PatchPath>) -> PathRef<'a> {
        PathRef {
            prefix: prefix.map(|prefix| &*prefix.0),
            path: &self.0,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_ref() {
        let path: PatchPath = "/a/b/c".parse().unwrap();
        let path_ref = path.as_ref();

        assert_eq!(path_ref.to_string(), "/a/b/c");

        let (parent, token) = path_ref.split_last().unwrap();
        assert_eq!(parent.to_string(), "/a/b");
        assert_eq!(token, "c");
    }

    #[test]
    fn with_prefix() {
        let prefix: PatchPath = "/users/7".parse().unwrap();
        let path: PatchPath = "/address/city".parse().unwrap();
        let path_ref = path.with_prefix(&prefix);

        assert_eq!(path_ref.to_string(), "/users/7/address/city");
        assert_eq!(path_ref.len(), 4);

        let (parent, token) = path_ref.split_last().unwrap();
        assert_eq!(parent.to_string(), "/users/7/address");
        assert_eq!(token, "city");

        let (parent, token) = parent.split_last().unwrap();
        assert_eq!(parent.to_string(), "/users/7");
        assert_eq!(token, "address");

        let (parent, token) = parent.split_last().unwrap();
        assert_eq!(parent.to_string(), "/users");
        assert_eq!(token, "7");
    }

    #[test]
    fn serde() {
        let path: PatchPath = serde_json::from_str("\"/a/0\"").unwrap();
        assert_eq!(path.tokens(), ["a", "0"]);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/a/0\"");
        assert!(serde_json::from_str::<PatchPath>("\"\"").is_err());
    }

    #[test]
    fn special_tokens_survive_display() {
        let path = PatchPath::parse("/a~1b/m~0n", true).unwrap();
        assert_eq!(path.tokens(), ["a/b", "m~n"]);
        assert_eq!(path.to_string(), "/a~1b/m~0n");

        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/a~1b/m~0n\"");
        assert_eq!(serde_json::from_str::<PatchPath>(&json).unwrap(), path);

        let raw = PatchPath::parse("/a~1b", false).unwrap();
        assert_eq!(raw.tokens(), ["a~1b"]);
        assert_eq!(raw.to_string().parse::<PatchPath>().unwrap(), raw);
    }

    #[test]
    fn root_displays_empty() {
        assert_eq!(PatchPath::root().to_string(), "");
        assert!(PatchPath::root().is_empty());
    }
}

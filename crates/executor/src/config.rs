use serde::{Deserialize, Serialize};

/// Behaviour switches for a [`Patcher`](crate::Patcher).
///
/// Both switches default to off, which keeps plain `/`-splitting of paths and lets
/// `remove` of an absent mapping key succeed silently.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatcherConfig {
    pub(crate) unescape_tokens: bool,
    pub(crate) strict_remove: bool,
}

impl PatcherConfig {
    /// Decode RFC 6901 escapes (`~0`, `~1`) in path tokens.
    #[must_use]
    pub fn unescape_tokens(self, enabled: bool) -> Self {
        Self {
            unescape_tokens: enabled,
            ..self
        }
    }

    /// Fail `remove` with `KeyNotFound` when the mapping key is absent.
    #[must_use]
    pub fn strict_remove(self, enabled: bool) -> Self {
        Self {
            strict_remove: enabled,
            ..self
        }
    }

    #[inline]
    pub fn is_unescaping_tokens(&self) -> bool {
        self.unescape_tokens
    }

    #[inline]
    pub fn is_strict_remove(&self) -> bool {
        self.strict_remove
    }
}

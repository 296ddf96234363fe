use std::fmt::{self, Display, Formatter};

use crate::{KeyKind, Shape};

/// The classification shared by every error the engine reports.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    MalformedPath,
    InvalidRoot,
    UnknownField,
    UnsupportedShape,
    NotANumber,
    IndexOutOfRange,
    InvalidKey,
    UnsupportedKeyType,
    KeyNotFound,
    NilReference,
    TypeMismatch,
    Decode,
    NotSettable,
    NoValueToReplace,
    InvalidMove,
    MissingMember,
    NotImplemented,
    UnknownOperation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("record `{record}` has no field named `{field}`")]
    UnknownField { record: &'static str, field: String },
    #[error("cannot resolve `{token}` inside {shape} node `{type_name}`")]
    UnsupportedShape {
        shape: Shape,
        type_name: &'static str,
        token: String,
    },
    #[error("node is a sequence, but `{token}` is not an index")]
    NotANumber { token: String },
    #[error("sequence has {len} elements, but index {index} was requested")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("mapping key `{token}` is not a valid {kind} key for `{key_type}`")]
    InvalidKey {
        token: String,
        kind: KeyKind,
        key_type: &'static str,
    },
    #[error("mapping key type `{key_type}` is not supported; keys must be strings or integers")]
    UnsupportedKeyType { key_type: &'static str },
    #[error("mapping has no key `{key}`")]
    KeyNotFound { key: String },
    #[error("optional `{type_name}` is empty")]
    NilReference { type_name: &'static str },
    #[error("cannot set `{expected}` to a value of type `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot decode value as `{expected}`: {source}")]
    Decode {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{type_name}` is shared and cannot be written through")]
    NotSettable { type_name: &'static str },
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::UnknownField { .. } => ErrorKind::UnknownField,
            AccessError::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
            AccessError::NotANumber { .. } => ErrorKind::NotANumber,
            AccessError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            AccessError::InvalidKey { .. } => ErrorKind::InvalidKey,
            AccessError::UnsupportedKeyType { .. } => ErrorKind::UnsupportedKeyType,
            AccessError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            AccessError::NilReference { .. } => ErrorKind::NilReference,
            AccessError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            AccessError::Decode { .. } => ErrorKind::Decode,
            AccessError::NotSettable { .. } => ErrorKind::NotSettable,
        }
    }
}

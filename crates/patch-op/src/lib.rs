use std::fmt::{self, Display, Formatter};

use accessor::AnyValue;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
    /// Any `op` string this engine does not know. Rejected when applied.
    #[serde(other)]
    Unknown,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
            OperationKind::Test => "test",
            OperationKind::Unknown => "unknown",
        })
    }
}

/// One patch instruction.
///
/// Paths stay unparsed until the operation is applied, so tokenization rules can be chosen
/// by the applying side. Deserializes from the usual JSON Patch layout, e.g.
/// `{"op": "move", "from": "/a/b", "path": "/a/c"}`.
#[derive(Debug, Deserialize)]
pub struct PatchOperation {
    #[serde(rename = "op")]
    pub kind: OperationKind,
    pub path: String,
    #[serde(default, deserialize_with = "present_value")]
    pub value: Option<AnyValue>,
    #[serde(default)]
    pub from: Option<String>,
}

// A member that is present is a value even when it is JSON `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<AnyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    AnyValue::deserialize(deserializer).map(Some)
}

impl PatchOperation {
    pub fn new(kind: OperationKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    pub fn add(path: impl Into<String>, value: AnyValue) -> Self {
        Self::new(OperationKind::Add, path).with_value(value)
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(OperationKind::Remove, path)
    }

    pub fn replace(path: impl Into<String>, value: AnyValue) -> Self {
        Self::new(OperationKind::Replace, path).with_value(value)
    }

    /// Moves the value at `from` to `path`.
    pub fn move_value(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(OperationKind::Move, path).with_from(from)
    }

    pub fn copy(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(OperationKind::Copy, path).with_from(from)
    }

    pub fn test(path: impl Into<String>, value: AnyValue) -> Self {
        Self::new(OperationKind::Test, path).with_value(value)
    }

    #[must_use]
    pub fn with_value(self, value: AnyValue) -> Self {
        Self {
            value: Some(value),
            ..self
        }
    }

    #[must_use]
    pub fn with_from(self, from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..self
        }
    }
}

/// Parses a JSON Patch document (an array of operations).
pub fn from_json(document: &str) -> Result<Vec<PatchOperation>, serde_json::Error> {
    serde_json::from_str(document)
}

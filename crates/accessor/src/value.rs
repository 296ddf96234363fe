use std::{
    any::Any,
    fmt::{self, Debug, Formatter},
};

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::{AccessError, TypeTag};

/// A type-erased value carried by a patch operation.
///
/// Native values are matched against their destination by exact type identity.
/// Wire values (decoded JSON) are deserialized into the destination's type at the
/// moment they are assigned.
pub struct AnyValue(Repr);

enum Repr {
    Native {
        value: Box<dyn Any + Send>,
        type_tag: TypeTag,
    },
    Json(Value),
}

impl AnyValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Repr::Native {
            value: Box::new(value),
            type_tag: TypeTag::of::<T>(),
        })
    }

    pub fn json(value: Value) -> Self {
        Self(Repr::Json(value))
    }

    pub fn type_name(&self) -> &'static str {
        match &self.0 {
            Repr::Native { type_tag, .. } => type_tag.name(),
            Repr::Json(_) => "serde_json::Value",
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match &self.0 {
            Repr::Json(value) => Some(value),
            Repr::Native { .. } => None,
        }
    }

    /// Converts into a `T`, failing unless a native value is exactly a `T` or a wire
    /// value decodes as one.
    pub fn downcast<T: Any + DeserializeOwned>(self) -> Result<T, AccessError> {
        match self.0 {
            Repr::Native { value, type_tag } => value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| AccessError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found: type_tag.name(),
                }),
            Repr::Json(value) => {
                serde_json::from_value(value).map_err(|source| AccessError::Decode {
                    expected: std::any::type_name::<T>(),
                    source,
                })
            }
        }
    }
}

impl Debug for AnyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.as_json() {
            Some(value) => write!(f, "AnyValue({})", value),
            None => write!(f, "AnyValue<{}>", self.type_name()),
        }
    }
}

impl From<Value> for AnyValue {
    fn from(value: Value) -> Self {
        AnyValue::json(value)
    }
}

impl<'de> Deserialize<'de> for AnyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(AnyValue::json)
    }
}

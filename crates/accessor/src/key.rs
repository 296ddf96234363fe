use std::fmt::{self, Display, Formatter};

use crate::AccessError;

/// The families of mapping keys a path token can be converted into.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyKind {
    String,
    Signed,
    Unsigned,
    Unsupported,
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyKind::String => "string",
            KeyKind::Signed => "signed integer",
            KeyKind::Unsigned => "unsigned integer",
            KeyKind::Unsupported => "unsupported",
        })
    }
}

/// A path token converted into its key family, before narrowing to the concrete key type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KeyValue {
    String(String),
    Signed(i64),
    Unsigned(u64),
}

/// Converts a path token into a key of the given family.
pub fn convert_key(
    token: &str,
    kind: KeyKind,
    key_type: &'static str,
) -> Result<KeyValue, AccessError> {
    let invalid = || AccessError::InvalidKey {
        token: token.to_string(),
        kind,
        key_type,
    };

    match kind {
        KeyKind::String => Ok(KeyValue::String(token.to_string())),
        KeyKind::Signed => token
            .parse::<i64>()
            .map(KeyValue::Signed)
            .map_err(|_| invalid()),
        KeyKind::Unsigned => token
            .parse::<u64>()
            .map(KeyValue::Unsigned)
            .map_err(|_| invalid()),
        KeyKind::Unsupported => Err(AccessError::UnsupportedKeyType { key_type }),
    }
}

/// A mapping key type that can be addressed by a path token.
pub trait MapKey: Sized {
    const KIND: KeyKind;

    /// Narrows a converted key to this type, `None` when it is out of range.
    fn from_key_value(value: KeyValue) -> Option<Self>;

    fn from_token(token: &str) -> Result<Self, AccessError> {
        let key_type = std::any::type_name::<Self>();
        let value = convert_key(token, Self::KIND, key_type)?;
        Self::from_key_value(value).ok_or_else(|| AccessError::InvalidKey {
            token: token.to_string(),
            kind: Self::KIND,
            key_type,
        })
    }
}

impl MapKey for String {
    const KIND: KeyKind = KeyKind::String;

    fn from_key_value(value: KeyValue) -> Option<Self> {
        match value {
            KeyValue::String(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! impl_integer_keys {
    ($variant:ident => $($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                const KIND: KeyKind = KeyKind::$variant;

                fn from_key_value(value: KeyValue) -> Option<Self> {
                    match value {
                        KeyValue::$variant(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer_keys!(Signed => i8, i16, i32, i64, isize);
impl_integer_keys!(Unsigned => u8, u16, u32, u64, usize);

macro_rules! impl_unsupported_keys {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                const KIND: KeyKind = KeyKind::Unsupported;

                fn from_key_value(_value: KeyValue) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

impl_unsupported_keys!(bool, char);

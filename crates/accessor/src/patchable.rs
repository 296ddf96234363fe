use std::{
    any::Any,
    fmt::{self, Debug, Formatter},
};

use serde::de::DeserializeOwned;

use crate::{AccessError, AnyValue, KeyKind, Materialize, Shape, TypeTag};

/// A node of a value tree that patch operations can address.
///
/// Implementations exist for records (through [`patchable_record!`](crate::patchable_record)),
/// sequences, mappings, optionals, scalars, transparent wrappers and `serde_json::Value`.
pub trait Patchable: Any + Send {
    fn shape(&self) -> Shape;

    /// The type a value must have to be assigned to this node.
    fn type_tag(&self) -> TypeTag;

    /// For optional nodes, the type of the wrapped value.
    fn optional_inner(&self) -> Option<TypeTag> {
        None
    }

    /// Resolves one path token to the addressed child.
    ///
    /// Optional nodes dereference themselves first and resolve the token against the
    /// wrapped value.
    fn resolve_child(
        &mut self,
        token: &str,
        materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError>;

    /// Dereferences an optional node, constructing a default inner value when empty and
    /// `create` is set. Any other node returns itself.
    fn materialized(&mut self, create: bool) -> Result<&mut dyn Patchable, AccessError>;

    /// Key-based mutation for mapping nodes.
    fn as_mapping_mut(&mut self) -> Option<&mut dyn MappingAccess> {
        None
    }

    /// Replaces the value of this node after checking the value's type.
    fn assign(&mut self, value: AnyValue) -> Result<(), AccessError>;

    /// Moves the value out, leaving the type's default behind.
    fn take_value(&mut self) -> Result<AnyValue, AccessError>;

    /// Resets the node to the type's default value.
    fn reset(&mut self) -> Result<(), AccessError>;

    /// Fails when [`Patchable::assign`] on this node could not write, without writing.
    fn ensure_writable(&mut self) -> Result<(), AccessError> {
        Ok(())
    }

    fn static_type_tag() -> TypeTag
    where
        Self: Sized,
    {
        TypeTag::of::<Self>()
    }

    fn static_optional_inner() -> Option<TypeTag>
    where
        Self: Sized,
    {
        None
    }
}

impl<'a> Debug for dyn Patchable + 'a {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} node `{}`", self.shape(), self.type_tag())
    }
}

/// A [`Patchable`] that can be constructed by default and decoded from a wire value,
/// which is what containers require of their elements.
pub trait Slot: Patchable + Default + DeserializeOwned {}

impl<T: Patchable + Default + DeserializeOwned> Slot for T {}

/// Explicit key-based access to a mapping node.
///
/// Mapping entries are written by key rather than through a reference to a stored value,
/// so inserting, overwriting and deleting never depend on an entry already existing.
pub trait MappingAccess {
    fn key_kind(&self) -> KeyKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, token: &str) -> Result<bool, AccessError>;

    /// Inserts or overwrites the value at `token`, returning whether the key was present.
    fn insert_value(&mut self, token: &str, value: AnyValue) -> Result<bool, AccessError>;

    /// Deletes the key, returning its value if it was present.
    fn remove_value(&mut self, token: &str) -> Result<Option<AnyValue>, AccessError>;

    fn value_type_tag(&self) -> TypeTag;

    fn value_optional_inner(&self) -> Option<TypeTag>;
}

use std::{
    any::{Any, TypeId},
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

/// The closed set of node shapes a value tree is made of.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shape {
    Record,
    Sequence,
    Mapping,
    Optional,
    Scalar,
    /// Open-ended, dynamically-typed nodes. They can be assigned as a whole but never
    /// descended into.
    Dynamic,
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Record => "record",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
            Shape::Optional => "optional",
            Shape::Scalar => "scalar",
            Shape::Dynamic => "dynamic",
        })
    }
}

/// How much missing structure resolution is allowed to create.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Materialize {
    /// Fail on empty optionals and absent mapping keys.
    Never,
    /// Construct empty optionals, but never insert mapping keys.
    Optionals,
    /// Construct empty optionals and insert default values at absent mapping keys.
    All,
}

impl Materialize {
    #[inline]
    pub fn optionals(self) -> bool {
        !matches!(self, Materialize::Never)
    }

    #[inline]
    pub fn keys(self) -> bool {
        matches!(self, Materialize::All)
    }
}

/// Runtime identity of a concrete Rust type, compared by [`TypeId`] only.
#[derive(Copy, Clone)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

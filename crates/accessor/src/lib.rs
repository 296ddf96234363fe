//! Uniform, type-checked access to the nodes of a strongly-typed value tree.
//!
//! Every addressable type implements [`Patchable`]. A node reports its [`Shape`] and knows
//! how to resolve a single path token to one of its children, how to accept a new value
//! of exactly its own type, and how to give its value up.

mod macros;

mod error;
mod key;
mod mapping;
mod optional;
mod patchable;
mod scalar;
mod sequence;
mod shape;
mod value;
mod wrapper;

pub use error::{AccessError, ErrorKind};
pub use key::{convert_key, KeyKind, KeyValue, MapKey};
pub use patchable::{MappingAccess, Patchable, Slot};
pub use shape::{Materialize, Shape, TypeTag};
pub use value::AnyValue;

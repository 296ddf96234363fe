use std::sync::Arc;

use crate::{AccessError, AnyValue, MappingAccess, Materialize, Patchable, Shape, Slot, TypeTag};

// A box is invisible to paths and to type checks: it behaves exactly like its content.
impl<T: Slot> Patchable for Box<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }

    fn optional_inner(&self) -> Option<TypeTag> {
        (**self).optional_inner()
    }

    fn resolve_child(
        &mut self,
        token: &str,
        materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        (**self).resolve_child(token, materialize)
    }

    fn materialized(&mut self, create: bool) -> Result<&mut dyn Patchable, AccessError> {
        (**self).materialized(create)
    }

    fn as_mapping_mut(&mut self) -> Option<&mut dyn MappingAccess> {
        (**self).as_mapping_mut()
    }

    fn assign(&mut self, value: AnyValue) -> Result<(), AccessError> {
        (**self).assign(value)
    }

    fn take_value(&mut self) -> Result<AnyValue, AccessError> {
        (**self).take_value()
    }

    fn reset(&mut self) -> Result<(), AccessError> {
        (**self).reset()
    }

    fn ensure_writable(&mut self) -> Result<(), AccessError> {
        (**self).ensure_writable()
    }

    fn static_type_tag() -> TypeTag {
        T::static_type_tag()
    }

    fn static_optional_inner() -> Option<TypeTag> {
        T::static_optional_inner()
    }
}

/// Shared nodes are written through only while this handle is the sole owner.
/// Reads of shape and type information never need ownership.
impl<T: Slot + Sync> Patchable for Arc<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }

    fn optional_inner(&self) -> Option<TypeTag> {
        (**self).optional_inner()
    }

    fn resolve_child(
        &mut self,
        token: &str,
        materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        unique(self)?.resolve_child(token, materialize)
    }

    fn materialized(&mut self, create: bool) -> Result<&mut dyn Patchable, AccessError> {
        unique(self)?.materialized(create)
    }

    fn as_mapping_mut(&mut self) -> Option<&mut dyn MappingAccess> {
        Arc::get_mut(self)?.as_mapping_mut()
    }

    fn assign(&mut self, value: AnyValue) -> Result<(), AccessError> {
        unique(self)?.assign(value)
    }

    fn take_value(&mut self) -> Result<AnyValue, AccessError> {
        unique(self)?.take_value()
    }

    fn reset(&mut self) -> Result<(), AccessError> {
        unique(self)?.reset()
    }

    fn ensure_writable(&mut self) -> Result<(), AccessError> {
        unique(self)?.ensure_writable()
    }

    fn static_type_tag() -> TypeTag {
        T::static_type_tag()
    }

    fn static_optional_inner() -> Option<TypeTag> {
        T::static_optional_inner()
    }
}

fn unique<T: Slot + Sync>(node: &mut Arc<T>) -> Result<&mut T, AccessError> {
    Arc::get_mut(node).ok_or(AccessError::NotSettable {
        type_name: std::any::type_name::<Arc<T>>(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn box_is_transparent() {
        let mut boxed: Box<Vec<i32>> = Box::new(vec![1, 2, 3]);
        assert_eq!(boxed.shape(), Shape::Sequence);
        assert_eq!(boxed.type_tag(), TypeTag::of::<Vec<i32>>());

        boxed
            .resolve_child("2", Materialize::Never)
            .unwrap()
            .assign(AnyValue::new(7_i32))
            .unwrap();
        boxed.assign(AnyValue::new(vec![4_i32])).unwrap();
        assert_eq!(*boxed, vec![4]);
    }

    #[test]
    fn boxed_optional_keeps_shape() {
        let mut boxed: Box<Option<u8>> = Box::new(None);
        assert_eq!(boxed.shape(), Shape::Optional);
        boxed
            .materialized(true)
            .unwrap()
            .assign(AnyValue::new(3_u8))
            .unwrap();
        assert_eq!(*boxed, Some(3));
    }

    #[test]
    fn arc_requires_unique_ownership() {
        let mut table: Arc<HashMap<String, u8>> = Arc::new(HashMap::new());
        table
            .as_mapping_mut()
            .unwrap()
            .insert_value("a", AnyValue::new(1_u8))
            .unwrap();
        assert_eq!(table["a"], 1);

        let other = Arc::clone(&table);
        assert!(table.as_mapping_mut().is_none());
        assert_eq!(
            table.ensure_writable().unwrap_err().kind(),
            ErrorKind::NotSettable
        );
        let mut boxed = Box::new(Arc::clone(&table));
        assert_eq!(
            boxed.ensure_writable().unwrap_err().kind(),
            ErrorKind::NotSettable
        );
        drop(boxed);
        let err = table.resolve_child("a", Materialize::Never).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSettable);
        assert_eq!(
            table.assign(AnyValue::new(HashMap::<String, u8>::new()))
                .unwrap_err()
                .kind(),
            ErrorKind::NotSettable
        );
        drop(other);

        table.ensure_writable().unwrap();
        table.reset().unwrap();
        assert!(table.is_empty());
    }
}

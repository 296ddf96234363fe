use crate::{AccessError, AnyValue, Materialize, Patchable, Shape, Slot, TypeTag};

impl<T: Slot> Patchable for Option<T> {
    fn shape(&self) -> Shape {
        Shape::Optional
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }

    fn optional_inner(&self) -> Option<TypeTag> {
        Self::static_optional_inner()
    }

    fn resolve_child(
        &mut self,
        token: &str,
        materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        self.materialized(materialize.optionals())?
            .resolve_child(token, materialize)
    }

    fn materialized(&mut self, create: bool) -> Result<&mut dyn Patchable, AccessError> {
        if self.is_none() {
            if !create {
                return Err(AccessError::NilReference {
                    type_name: std::any::type_name::<Self>(),
                });
            }
            tracing::trace!(
                type_name = std::any::type_name::<T>(),
                "materialize optional"
            );
        }
        Ok(self.get_or_insert_with(T::default))
    }

    fn assign(&mut self, value: AnyValue) -> Result<(), AccessError> {
        *self = value.downcast::<Self>()?;
        Ok(())
    }

    fn take_value(&mut self) -> Result<AnyValue, AccessError> {
        Ok(AnyValue::new(self.take()))
    }

    fn reset(&mut self) -> Result<(), AccessError> {
        *self = None;
        Ok(())
    }

    fn static_optional_inner() -> Option<TypeTag> {
        Some(T::static_type_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn materialize_on_demand() {
        let mut value: Option<i32> = None;
        assert_eq!(
            value.materialized(false).unwrap_err().kind(),
            ErrorKind::NilReference
        );

        let inner = value.materialized(true).unwrap();
        assert_eq!(inner.shape(), Shape::Scalar);
        inner.assign(AnyValue::new(42_i32)).unwrap();
        assert_eq!(value, Some(42));
    }

    #[test]
    fn resolution_passes_through() {
        let mut items: Option<Vec<u8>> = Some(vec![1, 2]);
        items
            .resolve_child("1", Materialize::Never)
            .unwrap()
            .assign(AnyValue::new(9_u8))
            .unwrap();
        assert_eq!(items, Some(vec![1, 9]));

        let mut missing: Option<Vec<u8>> = None;
        assert_eq!(
            missing
                .resolve_child("0", Materialize::Never)
                .unwrap_err()
                .kind(),
            ErrorKind::NilReference
        );
        // Materializing creates an empty sequence, which still has no index 0.
        assert_eq!(
            missing
                .resolve_child("0", Materialize::Optionals)
                .unwrap_err()
                .kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(missing, Some(vec![]));
    }

    #[test]
    fn type_information() {
        let value: Option<String> = None;
        assert_eq!(value.type_tag(), TypeTag::of::<Option<String>>());
        assert_eq!(value.optional_inner(), Some(TypeTag::of::<String>()));
        assert_eq!(1_u8.optional_inner(), None);
    }

    #[test]
    fn take_and_reset() {
        let mut value = Some("x".to_string());
        let taken = value.take_value().unwrap();
        assert_eq!(value, None);
        assert_eq!(
            taken.downcast::<Option<String>>().unwrap(),
            Some("x".to_string())
        );

        let mut value = Some(1_u64);
        value.reset().unwrap();
        assert_eq!(value, None);
    }
}

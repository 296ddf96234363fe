/// Implements [`Patchable`](crate::Patchable) for a struct, exposing the listed fields
/// under their external names.
///
/// Fields that are not listed cannot be addressed by any path. The struct must implement
/// `Default` and `serde::Deserialize`.
///
/// ```
/// use serde::Deserialize;
/// use typepatch_accessor::patchable_record;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Account {
///     display_name: String,
///     age: u32,
///     password_hash: String,
/// }
///
/// patchable_record!(Account {
///     "displayName" => display_name,
///     "age" => age,
/// });
/// ```
#[macro_export]
macro_rules! patchable_record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Patchable for $ty {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Record
            }

            fn resolve_child(
                &mut self,
                token: &str,
                _materialize: $crate::Materialize,
            ) -> ::std::result::Result<&mut dyn $crate::Patchable, $crate::AccessError> {
                match token {
                    $($name => ::std::result::Result::Ok(&mut self.$field as &mut dyn $crate::Patchable),)*
                    _ => ::std::result::Result::Err($crate::AccessError::UnknownField {
                        record: ::std::any::type_name::<$ty>(),
                        field: token.to_string(),
                    }),
                }
            }

            $crate::__patchable_identity!();
            $crate::__patchable_value_methods!();
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __patchable_identity {
    () => {
        fn materialized(
            &mut self,
            _create: bool,
        ) -> ::std::result::Result<&mut dyn $crate::Patchable, $crate::AccessError> {
            ::std::result::Result::Ok(self as &mut dyn $crate::Patchable)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __patchable_value_methods {
    () => {
        fn type_tag(&self) -> $crate::TypeTag {
            $crate::TypeTag::of::<Self>()
        }

        fn assign(
            &mut self,
            value: $crate::AnyValue,
        ) -> ::std::result::Result<(), $crate::AccessError> {
            *self = value.downcast::<Self>()?;
            ::std::result::Result::Ok(())
        }

        fn take_value(
            &mut self,
        ) -> ::std::result::Result<$crate::AnyValue, $crate::AccessError> {
            ::std::result::Result::Ok($crate::AnyValue::new(::std::mem::take(self)))
        }

        fn reset(&mut self) -> ::std::result::Result<(), $crate::AccessError> {
            *self = <Self as ::std::default::Default>::default();
            ::std::result::Result::Ok(())
        }
    };
}

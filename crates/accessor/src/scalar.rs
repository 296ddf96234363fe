use serde_json::Value;

use crate::{AccessError, Materialize, Patchable, Shape};

macro_rules! impl_scalar {
    ($($ty:ty),*) => {
        $(
            impl Patchable for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn resolve_child(
                    &mut self,
                    token: &str,
                    _materialize: Materialize,
                ) -> Result<&mut dyn Patchable, AccessError> {
                    Err(AccessError::UnsupportedShape {
                        shape: Shape::Scalar,
                        type_name: std::any::type_name::<$ty>(),
                        token: token.to_string(),
                    })
                }

                crate::__patchable_identity!();
                crate::__patchable_value_methods!();
            }
        )*
    };
}

impl_scalar!(
    (),
    bool,
    char,
    String,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64
);

// Dynamically-typed values can be replaced wholesale but not navigated.
impl Patchable for Value {
    fn shape(&self) -> Shape {
        Shape::Dynamic
    }

    fn resolve_child(
        &mut self,
        token: &str,
        _materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        Err(AccessError::UnsupportedShape {
            shape: Shape::Dynamic,
            type_name: "serde_json::Value",
            token: token.to_string(),
        })
    }

    crate::__patchable_identity!();
    crate::__patchable_value_methods!();
}

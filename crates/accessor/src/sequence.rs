use std::collections::VecDeque;

use crate::{AccessError, Materialize, Patchable, Shape, Slot};

fn parse_index(token: &str, len: usize) -> Result<usize, AccessError> {
    let index = token
        .parse::<usize>()
        .map_err(|_| AccessError::NotANumber {
            token: token.to_string(),
        })?;
    if index >= len {
        return Err(AccessError::IndexOutOfRange { index, len });
    }
    Ok(index)
}

// Sequences never grow during resolution: an index must already exist.
impl<T: Slot> Patchable for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn resolve_child(
        &mut self,
        token: &str,
        _materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        let index = parse_index(token, self.len())?;
        Ok(&mut self[index])
    }

    crate::__patchable_identity!();
    crate::__patchable_value_methods!();
}

impl<T: Slot> Patchable for VecDeque<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn resolve_child(
        &mut self,
        token: &str,
        _materialize: Materialize,
    ) -> Result<&mut dyn Patchable, AccessError> {
        let index = parse_index(token, self.len())?;
        Ok(&mut self[index])
    }

    crate::__patchable_identity!();
    crate::__patchable_value_methods!();
}

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use serde::de::DeserializeOwned;

use crate::{
    AccessError, AnyValue, KeyKind, MapKey, MappingAccess, Materialize, Patchable, Shape, Slot,
    TypeTag,
};

macro_rules! impl_mapping {
    ($map:ident, $($key_bound:tt)+) => {
        impl<K, V> Patchable for $map<K, V>
        where
            K: MapKey + DeserializeOwned + Send + 'static + $($key_bound)+,
            V: Slot,
        {
            fn shape(&self) -> Shape {
                Shape::Mapping
            }

            fn resolve_child(
                &mut self,
                token: &str,
                materialize: Materialize,
            ) -> Result<&mut dyn Patchable, AccessError> {
                let key = K::from_token(token)?;
                if !self.contains_key(&key) {
                    if !materialize.keys() {
                        return Err(AccessError::KeyNotFound {
                            key: token.to_string(),
                        });
                    }
                    tracing::trace!(key = token, "insert default mapping value");
                }
                Ok(self.entry(key).or_insert_with(V::default))
            }

            fn as_mapping_mut(&mut self) -> Option<&mut dyn MappingAccess> {
                Some(self)
            }

            crate::__patchable_identity!();
            crate::__patchable_value_methods!();
        }

        impl<K, V> MappingAccess for $map<K, V>
        where
            K: MapKey + DeserializeOwned + Send + 'static + $($key_bound)+,
            V: Slot,
        {
            fn key_kind(&self) -> KeyKind {
                K::KIND
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn contains(&self, token: &str) -> Result<bool, AccessError> {
                Ok(self.contains_key(&K::from_token(token)?))
            }

            fn insert_value(&mut self, token: &str, value: AnyValue) -> Result<bool, AccessError> {
                let key = K::from_token(token)?;
                // Going through a fresh slot keeps transparent wrappers consistent with
                // assignment everywhere else.
                let mut slot = V::default();
                slot.assign(value)?;
                Ok(self.insert(key, slot).is_some())
            }

            fn remove_value(&mut self, token: &str) -> Result<Option<AnyValue>, AccessError> {
                let key = K::from_token(token)?;
                match self.remove(&key) {
                    Some(mut removed) => removed.take_value().map(Some),
                    None => Ok(None),
                }
            }

            fn value_type_tag(&self) -> TypeTag {
                V::static_type_tag()
            }

            fn value_optional_inner(&self) -> Option<TypeTag> {
                V::static_optional_inner()
            }
        }
    };
}

impl_mapping!(HashMap, Eq + Hash);
impl_mapping!(BTreeMap, Ord);

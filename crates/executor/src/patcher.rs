use accessor::{AccessError, AnyValue, Materialize, Patchable, TypeTag};
use patch_op::{OperationKind, PatchOperation};
use patch_path::{PatchPath, PathRef};

use crate::{resolve::resolve_container, OperationError, PatchError, PatcherConfig};

/// Applies `ops` to `root` with the default configuration.
pub fn apply(
    ops: impl IntoIterator<Item = PatchOperation>,
    root: &mut dyn Patchable,
) -> Result<(), PatchError> {
    Patcher::default().apply(ops, root)
}

/// Applies patch operations to a typed value tree.
///
/// Operations run in order and the first failure stops the run. Nothing is rolled back:
/// use [`Patcher::apply_atomic`] when the whole patch must succeed or leave no trace.
#[derive(Debug, Clone, Default)]
pub struct Patcher {
    config: PatcherConfig,
}

/// How a moved value crosses between optional and required locations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Bridge {
    Direct,
    /// The source is optional, the destination is not: move the wrapped value.
    Unwrap,
    /// The destination is optional, the source is not: wrap the value on arrival.
    Wrap,
}

struct SlotInfo {
    tag: TypeTag,
    inner: Option<TypeTag>,
    in_mapping: bool,
}

impl Patcher {
    pub fn new(config: PatcherConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    pub fn apply(
        &self,
        ops: impl IntoIterator<Item = PatchOperation>,
        root: &mut dyn Patchable,
    ) -> Result<(), PatchError> {
        self.apply_all(None, ops, root)
    }

    /// Applies `ops` with every path (and `from`) resolved below `prefix`.
    /// An empty prefix addresses the root itself.
    pub fn apply_at(
        &self,
        prefix: &str,
        ops: impl IntoIterator<Item = PatchOperation>,
        root: &mut dyn Patchable,
    ) -> Result<(), PatchError> {
        if prefix.is_empty() {
            return self.apply_all(None, ops, root);
        }

        let prefix = PatchPath::parse(prefix, self.config.unescape_tokens).map_err(|source| {
            PatchError::InvalidPrefix {
                prefix: prefix.to_string(),
                source,
            }
        })?;
        self.apply_all(Some(&prefix), ops, root)
    }

    /// Applies `ops` to a copy of `root` and keeps the result only if every operation
    /// succeeded. On failure `root` is left exactly as it was.
    pub fn apply_atomic<T>(
        &self,
        ops: impl IntoIterator<Item = PatchOperation>,
        root: &mut T,
    ) -> Result<(), PatchError>
    where
        T: Patchable + Clone,
    {
        let mut scratch = root.clone();
        self.apply_all(None, ops, &mut scratch)?;
        *root = scratch;
        Ok(())
    }

    fn apply_all(
        &self,
        prefix: Option<&PatchPath>,
        ops: impl IntoIterator<Item = PatchOperation>,
        root: &mut dyn Patchable,
    ) -> Result<(), PatchError> {
        // An empty optional or a shared root has nothing that can be written to.
        root.materialized(false)
            .map_err(|source| PatchError::InvalidRoot { source })?;

        for (index, op) in ops.into_iter().enumerate() {
            let PatchOperation {
                kind,
                path,
                value,
                from,
            } = op;
            tracing::debug!(
                index,
                op = %kind,
                path = path.as_str(),
                value = ?value,
                "apply patch operation"
            );

            if let Err(source) = self.apply_one(root, prefix, kind, &path, value, from.as_deref())
            {
                let err = PatchError::Operation {
                    index,
                    kind,
                    path,
                    source,
                };
                tracing::debug!(error = %err, "patch aborted");
                return Err(err);
            }
        }

        Ok(())
    }

    fn apply_one(
        &self,
        root: &mut dyn Patchable,
        prefix: Option<&PatchPath>,
        kind: OperationKind,
        path: &str,
        value: Option<AnyValue>,
        from: Option<&str>,
    ) -> Result<(), OperationError> {
        match kind {
            OperationKind::Add => {
                let value = required(kind, "value", value)?;
                let path = self.parse_path(path)?;
                self.add(root, path.with_prefix_opt(prefix), value)
            }
            OperationKind::Remove => {
                let path = self.parse_path(path)?;
                self.remove(root, path.with_prefix_opt(prefix))
            }
            OperationKind::Replace => {
                let value = required(kind, "value", value)?;
                let path = self.parse_path(path)?;
                self.replace(root, path.with_prefix_opt(prefix), value)
            }
            OperationKind::Move => {
                let from = required(kind, "from", from)?;
                let from = self.parse_path(from)?;
                let path = self.parse_path(path)?;
                self.move_value(
                    root,
                    from.with_prefix_opt(prefix),
                    path.with_prefix_opt(prefix),
                )
            }
            OperationKind::Copy | OperationKind::Test => {
                Err(OperationError::NotImplemented { kind })
            }
            OperationKind::Unknown => Err(OperationError::UnknownOperation),
        }
    }

    fn parse_path(&self, path: &str) -> Result<PatchPath, OperationError> {
        PatchPath::parse(path, self.config.unescape_tokens).map_err(|source| {
            OperationError::MalformedPath {
                path: path.to_string(),
                source,
            }
        })
    }

    fn add(
        &self,
        root: &mut dyn Patchable,
        path: PathRef<'_>,
        value: AnyValue,
    ) -> Result<(), OperationError> {
        let (parent_path, token) = split(path)?;
        let parent = resolve_container(root, parent_path, Materialize::Optionals)
            .map_err(OperationError::resolve_parent(path))?;

        if let Some(mapping) = parent.as_mapping_mut() {
            let replaced = mapping
                .insert_value(token, value)
                .map_err(OperationError::write(path))?;
            tracing::trace!(key = token, replaced, "mapping insert");
            return Ok(());
        }

        let target = parent
            .resolve_child(token, Materialize::All)
            .and_then(|child| child.materialized(true))
            .map_err(OperationError::resolve(path))?;
        target.assign(value).map_err(OperationError::write(path))
    }

    fn remove(&self, root: &mut dyn Patchable, path: PathRef<'_>) -> Result<(), OperationError> {
        let (parent_path, token) = split(path)?;
        let parent = resolve_container(root, parent_path, Materialize::Optionals)
            .map_err(OperationError::resolve_parent(path))?;

        if let Some(mapping) = parent.as_mapping_mut() {
            let removed = mapping
                .remove_value(token)
                .map_err(OperationError::write(path))?;
            if removed.is_none() && self.config.strict_remove {
                return Err(OperationError::Resolve {
                    path: path.to_owned(),
                    source: AccessError::KeyNotFound {
                        key: token.to_string(),
                    },
                });
            }
            return Ok(());
        }

        // Records, sequence elements and optionals are reset in place; a sequence keeps
        // its length.
        parent
            .resolve_child(token, Materialize::All)
            .map_err(OperationError::resolve(path))?
            .reset()
            .map_err(OperationError::write(path))
    }

    fn replace(
        &self,
        root: &mut dyn Patchable,
        path: PathRef<'_>,
        value: AnyValue,
    ) -> Result<(), OperationError> {
        let (parent_path, token) = split(path)?;
        let parent = resolve_container(root, parent_path, Materialize::Optionals)
            .map_err(OperationError::resolve_parent(path))?;

        if let Some(mapping) = parent.as_mapping_mut() {
            if !mapping
                .contains(token)
                .map_err(OperationError::resolve(path))?
            {
                return Err(OperationError::NoValueToReplace {
                    path: path.to_owned(),
                });
            }
            mapping
                .insert_value(token, value)
                .map_err(OperationError::write(path))?;
            return Ok(());
        }

        let target = parent
            .resolve_child(token, Materialize::Never)
            .and_then(|child| child.materialized(false))
            .map_err(OperationError::resolve(path))?;
        target.assign(value).map_err(OperationError::write(path))
    }

    fn move_value(
        &self,
        root: &mut dyn Patchable,
        from: PathRef<'_>,
        path: PathRef<'_>,
    ) -> Result<(), OperationError> {
        if from == path {
            tracing::trace!(path = %path, "move onto itself");
            return Ok(());
        }
        if from.is_proper_descendant_of(path) || path.is_proper_descendant_of(from) {
            return Err(OperationError::InvalidMove {
                from: from.to_owned(),
                path: path.to_owned(),
            });
        }

        let (from_parent, from_token) = split(from)?;
        let (to_parent, to_token) = split(path)?;

        let source = {
            let parent = resolve_container(root, from_parent, Materialize::Never)
                .map_err(OperationError::resolve_parent(from))?;
            let in_mapping = parent.as_mapping_mut().is_some();
            let node = parent
                .resolve_child(from_token, Materialize::Never)
                .map_err(OperationError::resolve(from))?;
            SlotInfo {
                tag: node.type_tag(),
                inner: node.optional_inner(),
                in_mapping,
            }
        };

        let destination = {
            let parent = resolve_container(root, to_parent, Materialize::Optionals)
                .map_err(OperationError::resolve_parent(path))?;
            match parent.as_mapping_mut() {
                Some(mapping) => SlotInfo {
                    tag: mapping.value_type_tag(),
                    inner: mapping.value_optional_inner(),
                    in_mapping: true,
                },
                None => {
                    let node = parent
                        .resolve_child(to_token, Materialize::All)
                        .map_err(OperationError::resolve(path))?;
                    SlotInfo {
                        tag: node.type_tag(),
                        inner: node.optional_inner(),
                        in_mapping: false,
                    }
                }
            }
        };

        let (bridge, expected, found) = match (source.inner, destination.inner) {
            (Some(inner), None) => (Bridge::Unwrap, destination.tag, inner),
            (None, Some(inner)) => (Bridge::Wrap, inner, source.tag),
            _ => (Bridge::Direct, destination.tag, source.tag),
        };
        if expected != found {
            return Err(OperationError::Write {
                path: path.to_owned(),
                source: AccessError::TypeMismatch {
                    expected: expected.name(),
                    found: found.name(),
                },
            });
        }
        self.check_destination(root, to_parent, to_token, path, bridge)?;
        tracing::trace!(from = %from, path = %path, ?bridge, "move");

        // Both locations exist, agree on type and the destination accepts writes; from
        // here on the source is emptied, the destination written, and a mapping source
        // loses its key.
        let value = {
            let node = resolve_container(root, from_parent, Materialize::Never)
                .and_then(|parent| parent.resolve_child(from_token, Materialize::Never))
                .map_err(OperationError::resolve(from))?;
            match bridge {
                Bridge::Unwrap => {
                    let value = node
                        .materialized(false)
                        .and_then(|inner| inner.take_value())
                        .map_err(OperationError::resolve(from))?;
                    node.reset().map_err(OperationError::write(from))?;
                    value
                }
                Bridge::Direct | Bridge::Wrap => {
                    node.take_value().map_err(OperationError::write(from))?
                }
            }
        };

        self.write_destination(root, to_parent, to_token, path, bridge, value)?;

        if source.in_mapping {
            let parent = resolve_container(root, from_parent, Materialize::Never)
                .map_err(OperationError::resolve_parent(from))?;
            if let Some(mapping) = parent.as_mapping_mut() {
                mapping
                    .remove_value(from_token)
                    .map_err(OperationError::write(from))?;
            }
        }

        Ok(())
    }

    /// Resolves the move destination the way [`Patcher::write_destination`] does and
    /// checks that it can be assigned, without writing a value.
    fn check_destination(
        &self,
        root: &mut dyn Patchable,
        parent_path: PathRef<'_>,
        token: &str,
        path: PathRef<'_>,
        bridge: Bridge,
    ) -> Result<(), OperationError> {
        let parent = resolve_container(root, parent_path, Materialize::Optionals)
            .map_err(OperationError::resolve_parent(path))?;

        // Mapping entries are written into a fresh slot.
        if bridge != Bridge::Wrap && parent.as_mapping_mut().is_some() {
            return Ok(());
        }

        let node = parent
            .resolve_child(token, Materialize::All)
            .map_err(OperationError::resolve(path))?;
        let node = match bridge {
            Bridge::Wrap => node
                .materialized(true)
                .map_err(OperationError::resolve(path))?,
            Bridge::Direct | Bridge::Unwrap => node,
        };
        node.ensure_writable().map_err(OperationError::write(path))
    }

    fn write_destination(
        &self,
        root: &mut dyn Patchable,
        parent_path: PathRef<'_>,
        token: &str,
        path: PathRef<'_>,
        bridge: Bridge,
        value: AnyValue,
    ) -> Result<(), OperationError> {
        let parent = resolve_container(root, parent_path, Materialize::Optionals)
            .map_err(OperationError::resolve_parent(path))?;

        if bridge != Bridge::Wrap {
            if let Some(mapping) = parent.as_mapping_mut() {
                mapping
                    .insert_value(token, value)
                    .map_err(OperationError::write(path))?;
                return Ok(());
            }
        }

        let node = parent
            .resolve_child(token, Materialize::All)
            .map_err(OperationError::resolve(path))?;
        let node = match bridge {
            Bridge::Wrap => node
                .materialized(true)
                .map_err(OperationError::resolve(path))?,
            Bridge::Direct | Bridge::Unwrap => node,
        };
        node.assign(value).map_err(OperationError::write(path))
    }
}

fn required<T>(
    kind: OperationKind,
    member: &'static str,
    value: Option<T>,
) -> Result<T, OperationError> {
    value.ok_or(OperationError::MissingMember { kind, member })
}

fn split(path: PathRef<'_>) -> Result<(PathRef<'_>, &str), OperationError> {
    path.split_last()
        .ok_or_else(|| OperationError::MalformedPath {
            path: path.to_string(),
            source: patch_path::ParsePathError::Empty,
        })
}

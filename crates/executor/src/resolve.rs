use accessor::{AccessError, Materialize, Patchable};
use patch_path::PathRef;

/// Walks `path` from `root`, one token at a time.
pub(crate) fn resolve<'r>(
    root: &'r mut dyn Patchable,
    path: PathRef<'_>,
    materialize: Materialize,
) -> Result<&'r mut dyn Patchable, AccessError> {
    path.iter()
        .try_fold(root, |node, token| node.resolve_child(token, materialize))
}

/// Resolves the container addressed by `path`, dereferencing it if it is optional so
/// that a trailing optional mapping is seen as a mapping.
pub(crate) fn resolve_container<'r>(
    root: &'r mut dyn Patchable,
    path: PathRef<'_>,
    materialize: Materialize,
) -> Result<&'r mut dyn Patchable, AccessError> {
    resolve(root, path, materialize)?.materialized(materialize.optionals())
}

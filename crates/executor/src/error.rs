use accessor::{AccessError, ErrorKind};
use patch_op::OperationKind;
use patch_path::{ParsePathError, PatchPath, PathRef};

/// Why a single operation could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("malformed path '{path}': {source}")]
    MalformedPath {
        path: String,
        source: ParsePathError,
    },
    #[error("resolving parent of path '{path}': {source}")]
    ResolveParent { path: PatchPath, source: AccessError },
    #[error("resolving '{path}': {source}")]
    Resolve { path: PatchPath, source: AccessError },
    #[error("writing '{path}': {source}")]
    Write { path: PatchPath, source: AccessError },
    #[error("no value to replace at path '{path}'")]
    NoValueToReplace { path: PatchPath },
    #[error("cannot move '{from}' to '{path}': one location contains the other")]
    InvalidMove { from: PatchPath, path: PatchPath },
    #[error("`{kind}` operation requires a `{member}` member")]
    MissingMember {
        kind: OperationKind,
        member: &'static str,
    },
    #[error("`{kind}` operations are not implemented")]
    NotImplemented { kind: OperationKind },
    #[error("unknown operation")]
    UnknownOperation,
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::MalformedPath { .. } => ErrorKind::MalformedPath,
            OperationError::ResolveParent { source, .. }
            | OperationError::Resolve { source, .. }
            | OperationError::Write { source, .. } => source.kind(),
            OperationError::NoValueToReplace { .. } => ErrorKind::NoValueToReplace,
            OperationError::InvalidMove { .. } => ErrorKind::InvalidMove,
            OperationError::MissingMember { .. } => ErrorKind::MissingMember,
            OperationError::NotImplemented { .. } => ErrorKind::NotImplemented,
            OperationError::UnknownOperation => ErrorKind::UnknownOperation,
        }
    }

    pub(crate) fn resolve_parent(path: PathRef<'_>) -> impl FnOnce(AccessError) -> Self + '_ {
        move |source| OperationError::ResolveParent {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn resolve(path: PathRef<'_>) -> impl FnOnce(AccessError) -> Self + '_ {
        move |source| OperationError::Resolve {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn write(path: PathRef<'_>) -> impl FnOnce(AccessError) -> Self + '_ {
        move |source| OperationError::Write {
            path: path.to_owned(),
            source,
        }
    }
}

/// The error returned by a patch run: either the root was unusable, or one operation
/// failed. Operations before the failing one remain applied.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("invalid root: {source}")]
    InvalidRoot { source: AccessError },
    #[error("invalid prefix '{prefix}': {source}")]
    InvalidPrefix {
        prefix: String,
        source: ParsePathError,
    },
    #[error("operation {index} ({kind} '{path}') failed: {source}")]
    Operation {
        index: usize,
        kind: OperationKind,
        path: String,
        source: OperationError,
    },
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::InvalidRoot { .. } => ErrorKind::InvalidRoot,
            PatchError::InvalidPrefix { .. } => ErrorKind::MalformedPath,
            PatchError::Operation { source, .. } => source.kind(),
        }
    }

    /// Position of the failing operation in the submitted list.
    pub fn index(&self) -> Option<usize> {
        match self {
            PatchError::Operation { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum ParsePathError {
    #[error("path is empty")]
    Empty,
    #[error("path `{path}` must start with `/`")]
    MissingLeadingSlash { path: String },
}

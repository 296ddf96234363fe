mod macros;

mod error;
mod parser;
mod patch_path;
mod path_ref;

pub use error::ParsePathError;
pub use parser::parse_tokens;
pub use patch_path::PatchPath;
pub use path_ref::PathRef;

mod config;
mod error;
mod patcher;
mod resolve;


pub use config::PatcherConfig;
pub use error::{OperationError, PatchError};
pub use patcher::{apply, Patcher};

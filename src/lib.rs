//! Apply JSON-Patch style operations (`add`, `remove`, `replace`, `move`) to strongly-typed
//! Rust values.
//!
//! ```
//! use serde::Deserialize;
//! use typepatch::{apply, patchable_record, AnyValue, PatchOperation};
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     backup: Option<u16>,
//! }
//!
//! patchable_record!(Server {
//!     "host" => host,
//!     "port" => port,
//!     "backup" => backup,
//! });
//!
//! let mut server = Server::default();
//! apply(
//!     [
//!         PatchOperation::add("/host", AnyValue::new("localhost".to_string())),
//!         PatchOperation::replace("/port", AnyValue::new(8080_u16)),
//!         PatchOperation::move_value("/port", "/backup"),
//!     ],
//!     &mut server,
//! )
//! .unwrap();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 0);
//! assert_eq!(server.backup, Some(8080));
//! ```

mod shared;

pub use accessor::{
    patchable_record, AccessError, AnyValue, ErrorKind, KeyKind, MapKey, MappingAccess,
    Materialize, Patchable, Shape, Slot, TypeTag,
};
pub use executor::{apply, OperationError, PatchError, Patcher, PatcherConfig};
pub use patch_op::{from_json, OperationKind, PatchOperation};
pub use patch_path::{patch_path, ParsePathError, PatchPath, PathRef};
pub use shared::SharedTarget;

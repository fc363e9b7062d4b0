//! Error types for every layer of the workspace.
//!
//! Each enum carries a stable error code via [`error_code::TiendaErrorCode`].
//! HTTP status mapping happens only at the server boundary.

pub mod cart_error;
pub mod config_error;
pub mod error_code;
pub mod order_error;
pub mod storage_error;

pub use cart_error::CartError;
pub use config_error::ConfigError;
pub use order_error::OrderError;
pub use storage_error::StorageError;

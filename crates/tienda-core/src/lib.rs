//! # tienda-core
//!
//! Foundation crate for the tienda storefront.
//! Defines domain types, wire schemas, money helpers, errors, config,
//! and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod money;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::StoreConfig;
pub use errors::error_code::TiendaErrorCode;
pub use errors::{CartError, ConfigError, OrderError, StorageError};
pub use types::order::{OrderConfirmation, OrderItemInput, OrderRequest, PaymentMethod};
pub use types::product::{Product, ProductStatus};

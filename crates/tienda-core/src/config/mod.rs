//! Configuration for the storefront, loaded from TOML and passed
//! explicitly into constructors. No ambient globals.

pub mod store_config;

pub use store_config::StoreConfig;

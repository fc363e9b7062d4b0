//! Workspace-wide constants.

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "tienda.db";

/// Default HTTP bind address for the server binary.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default client-facing API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/";

/// Default number of read connections in the pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Status a `carrito` row is created with. Fulfilment processes move it
/// forward later; this crate never transitions it.
pub const ORDER_STATUS_PENDING: &str = "pendiente";

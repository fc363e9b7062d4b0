//! `StoreEngine` — unified storage engine for the storefront.
//!
//! Wraps `DatabaseManager` (read/write routing) and owns the checkout
//! transaction. All reads go through `with_reader()`, all writes through
//! `with_writer()`; no code outside this crate touches a raw
//! `&Connection` for store operations.

use std::path::Path;

use rusqlite::{Transaction, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use tienda_core::config::StoreConfig;
use tienda_core::errors::{OrderError, StorageError};
use tienda_core::money::{itbms_for, round_currency};
use tienda_core::types::catalog::{Category, NewSupplier, ProductType, PurchaseRecord, Supplier};
use tienda_core::types::order::{OrderConfirmation, OrderRequest};
use tienda_core::types::product::{NewProduct, Product, ProductStatus, ProductUpdate};
use tienda_core::types::user::{NewUser, ProfileUpdate, UserProfile};

use crate::connection::DatabaseManager;
use crate::queries;

/// The storefront storage engine.
pub struct StoreEngine {
    db: DatabaseManager,
}

impl StoreEngine {
    /// Open a file-backed engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        Ok(Self { db })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        Ok(Self { db })
    }

    /// Open the engine described by a config.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StorageError> {
        Self::open(
            Path::new(config.effective_database_path()),
            config.effective_read_pool_size(),
        )
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    /// Raw read access — for operations not covered by an engine method.
    pub fn with_reader<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not covered by an engine method.
    pub fn with_writer<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    // ─── Checkout ───────────────────────────────────────────────────────

    /// Place an order: validate, resolve the user, then check stock and
    /// write every row inside one immediate transaction. Any failure
    /// rolls back the whole order; no partial writes are ever visible.
    pub fn place_order(&self, req: &OrderRequest) -> Result<OrderConfirmation, OrderError> {
        let method = req.validate()?;

        let usuario_id = self
            .db
            .with_reader(|conn| queries::users::resolve_id_by_auth_uid(conn, &req.firebase_uid))?
            .ok_or_else(|| OrderError::UserNotFound {
                uid: req.firebase_uid.clone(),
            })?;

        let confirmation = self.db.with_writer(|conn| {
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
                .map_err(StorageError::from)?;

            // Stock pre-check for every item before any write. The live
            // unit price is captured here; it is the authoritative one.
            let mut live_prices = Vec::with_capacity(req.items.len());
            for item in &req.items {
                let (stock, precio) = queries::products::stock_and_price(&tx, item.id)?
                    .ok_or(OrderError::ProductNotFound { id: item.id })?;
                if stock < item.cantidad {
                    return Err(OrderError::InsufficientStock {
                        id: item.id,
                        requested: item.cantidad,
                        available: stock,
                    });
                }
                live_prices.push(precio);
            }

            // Reconcile the claimed subtotal against live prices so a
            // stale or tampered client total can neither persist nor echo.
            let computed: Decimal = round_currency(
                req.items
                    .iter()
                    .zip(&live_prices)
                    .map(|(item, precio)| *precio * Decimal::from(item.cantidad))
                    .sum(),
            );
            let claimed = round_currency(req.subtotal);
            if claimed != computed {
                return Err(OrderError::TotalsMismatch {
                    claimed,
                    computed,
                });
            }

            let mut carritos_ids = Vec::with_capacity(req.items.len());
            let mut total_productos = 0;

            for (item, precio) in req.items.iter().zip(&live_prices) {
                let subtotal_producto = round_currency(*precio * Decimal::from(item.cantidad));
                let itbms_producto = itbms_for(subtotal_producto);
                let total_producto = round_currency(subtotal_producto + itbms_producto);

                let id_carrito = queries::orders::insert_cart_row(
                    &tx,
                    &queries::orders::CartRowInsert {
                        id_producto: item.id,
                        id_usuario: usuario_id,
                        canti_productos: item.cantidad,
                        subtotal: subtotal_producto,
                        itbms: itbms_producto,
                        total: total_producto,
                        direccion: req.direccion.trim(),
                        metodo_pago: method.as_str(),
                    },
                )?;
                queries::orders::insert_purchase_detail(&tx, id_carrito, item.id, usuario_id)?;
                queries::products::adjust_stock(&tx, item.id, item.cantidad)?;

                carritos_ids.push(id_carrito);
                total_productos += item.cantidad;
            }

            tx.commit().map_err(StorageError::from)?;

            let subtotal = computed;
            let itbms = itbms_for(subtotal);
            Ok(OrderConfirmation {
                success: true,
                message: "order processed".to_string(),
                pedido_id: Uuid::new_v4().to_string(),
                carritos_ids,
                usuario_id,
                total_productos,
                subtotal,
                itbms,
                total: round_currency(subtotal + itbms),
                direccion: req.direccion.trim().to_string(),
                metodo_pago: method,
            })
        })?;

        info!(
            pedido_id = %confirmation.pedido_id,
            usuario_id = confirmation.usuario_id,
            total_productos = confirmation.total_productos,
            "order committed"
        );
        Ok(confirmation)
    }

    // ─── Catalog ────────────────────────────────────────────────────────

    pub fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        self.db.with_reader(queries::products::list_active)
    }

    pub fn get_product(&self, id: i64) -> Result<Option<Product>, StorageError> {
        self.db.with_reader(|conn| queries::products::get(conn, id))
    }

    /// Create a product and return the stored row.
    pub fn create_product(&self, product: &NewProduct) -> Result<Product, StorageError> {
        let id = self
            .db
            .with_writer(|conn| queries::products::insert(conn, product))?;
        debug!(id, "product created");
        self.db
            .with_writer(|conn| queries::products::get(conn, id))?
            .ok_or(StorageError::NotFound)
    }

    /// Apply a partial product update and return the stored row.
    pub fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, StorageError> {
        self.db.with_writer(|conn| {
            if !queries::products::update(conn, id, update)? {
                return Err(StorageError::NotFound);
            }
            queries::products::get(conn, id)?.ok_or(StorageError::NotFound)
        })
    }

    pub fn set_product_status(&self, id: i64, status: ProductStatus) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::products::set_status(conn, id, status)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    // ─── Users & history ────────────────────────────────────────────────

    /// Register a user and return the new internal id.
    pub fn register_user(&self, user: &NewUser) -> Result<i64, StorageError> {
        self.db.with_writer(|conn| queries::users::insert(conn, user))
    }

    pub fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, StorageError> {
        self.db
            .with_reader(|conn| queries::users::get_profile(conn, uid))
    }

    pub fn update_profile(&self, uid: &str, update: &ProfileUpdate) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::users::update_profile(conn, uid, update)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    /// Purchase history for an external auth uid, newest first.
    pub fn purchase_history(&self, uid: &str) -> Result<Vec<PurchaseRecord>, OrderError> {
        let usuario_id = self
            .db
            .with_reader(|conn| queries::users::resolve_id_by_auth_uid(conn, uid))?
            .ok_or_else(|| OrderError::UserNotFound {
                uid: uid.to_string(),
            })?;
        self.db
            .with_reader(|conn| queries::orders::purchase_history(conn, usuario_id))
            .map_err(OrderError::Storage)
    }

    // ─── Admin reference data ───────────────────────────────────────────

    pub fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        self.db.with_reader(queries::categories::list)
    }

    pub fn create_category(&self, nombre: &str) -> Result<i64, StorageError> {
        self.db
            .with_writer(|conn| queries::categories::insert(conn, nombre))
    }

    pub fn list_suppliers(&self) -> Result<Vec<Supplier>, StorageError> {
        self.db.with_reader(queries::suppliers::list)
    }

    pub fn list_suppliers_by_category(&self, categoria: i64) -> Result<Vec<Supplier>, StorageError> {
        self.db
            .with_reader(|conn| queries::suppliers::list_by_category(conn, categoria))
    }

    pub fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, StorageError> {
        self.db.with_writer(|conn| {
            let id = queries::suppliers::insert(conn, supplier)?;
            queries::suppliers::get(conn, id)?.ok_or(StorageError::NotFound)
        })
    }

    pub fn update_supplier(&self, id: i64, supplier: &NewSupplier) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::suppliers::update(conn, id, supplier)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    pub fn delete_supplier(&self, id: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::suppliers::delete(conn, id)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    pub fn list_product_types(&self, categoria: i64) -> Result<Vec<ProductType>, StorageError> {
        self.db
            .with_reader(|conn| queries::product_types::list_by_category(conn, categoria))
    }

    pub fn create_product_type(&self, tipo: &str, categoria: i64) -> Result<i64, StorageError> {
        self.db
            .with_writer(|conn| queries::product_types::insert(conn, tipo, categoria))
    }

    pub fn update_product_type(&self, id: i64, tipo: &str) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::product_types::update(conn, id, tipo)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }

    pub fn delete_product_type(&self, id: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            if !queries::product_types::delete(conn, id)? {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
    }
}

//! Cart reducer — a single state object mutated only through the
//! operations below. `total` and `item_count` are maintained
//! incrementally by every mutation, never recomputed from scratch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tienda_core::errors::CartError;

use crate::persist::SnapshotWriter;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: i64,
    pub nombre: String,
    pub precio: Decimal,
    pub cantidad: i64,
    /// Advisory — stock as of the last catalog read. The server re-checks
    /// the live value at checkout.
    pub known_stock: i64,
    pub categoria: String,
    #[serde(rename = "imagenURL")]
    pub imagen_url: Option<String>,
    pub color: Option<String>,
    pub talla: Option<String>,
    pub marca: Option<String>,
}

/// Payload for adding a product: a line item without a quantity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: i64,
    pub nombre: String,
    pub precio: Decimal,
    pub known_stock: i64,
    pub categoria: String,
    #[serde(rename = "imagenURL")]
    pub imagen_url: Option<String>,
    pub color: Option<String>,
    pub talla: Option<String>,
    pub marca: Option<String>,
}

impl NewCartItem {
    fn into_line(self, cantidad: i64) -> CartLineItem {
        CartLineItem {
            id: self.id,
            nombre: self.nombre,
            precio: self.precio,
            cantidad,
            known_stock: self.known_stock,
            categoria: self.categoria,
            imagen_url: self.imagen_url,
            color: self.color,
            talla: self.talla,
            marca: self.marca,
        }
    }
}

/// The cart aggregate: items keyed by product id plus running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub total: Decimal,
    pub item_count: i64,
}

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The requested quantity was applied as-is.
    Applied { cantidad: i64 },
    /// The request was clamped into `[1, known_stock]`; surface a
    /// "quantity adjusted" notice to the user.
    Clamped { requested: i64, applied: i64 },
    /// Clamping drove the quantity to zero and the line was removed.
    Removed,
}

/// Owns the cart state and pushes a snapshot to the writer after every
/// successful mutation. Persistence is best-effort: failures are logged
/// and never roll back the in-memory state.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    persister: Option<SnapshotWriter>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a snapshot writer; every mutation from here on persists.
    pub fn with_persister(persister: SnapshotWriter) -> Self {
        Self {
            state: CartState::default(),
            persister: Some(persister),
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Add one unit of a product. A repeated add increments the matching
    /// line instead of inserting a duplicate. Fails without touching
    /// state when the advisory stock would be exceeded.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<(), CartError> {
        if let Some(existing) = self.state.items.iter_mut().find(|i| i.id == item.id) {
            if existing.cantidad >= existing.known_stock {
                return Err(CartError::InsufficientStock {
                    id: item.id,
                    known_stock: existing.known_stock,
                });
            }
            existing.cantidad += 1;
            let precio = existing.precio;
            self.state.total += precio;
            self.state.item_count += 1;
        } else {
            if item.known_stock < 1 {
                return Err(CartError::OutOfStock { id: item.id });
            }
            let precio = item.precio;
            self.state.items.push(item.into_line(1));
            self.state.total += precio;
            self.state.item_count += 1;
        }
        self.persist();
        Ok(())
    }

    /// Delete a line entirely. No-op when the id is not in the cart.
    pub fn remove_item(&mut self, id: i64) {
        let Some(pos) = self.state.items.iter().position(|i| i.id == id) else {
            return;
        };
        let removed = self.state.items.remove(pos);
        self.state.total -= removed.precio * Decimal::from(removed.cantidad);
        self.state.item_count -= removed.cantidad;
        self.persist();
    }

    /// Set a line's quantity, clamped into `[1, known_stock]`. When the
    /// advisory stock is zero the clamp reaches zero and the line is
    /// removed instead.
    pub fn update_quantity(&mut self, id: i64, cantidad: i64) -> Result<QuantityUpdate, CartError> {
        let Some(pos) = self.state.items.iter().position(|i| i.id == id) else {
            return Err(CartError::UnknownItem { id });
        };

        let item = &mut self.state.items[pos];
        let clamped = cantidad.max(1).min(item.known_stock);
        let delta = clamped - item.cantidad;
        let precio = item.precio;

        let outcome = if clamped <= 0 {
            let removed = self.state.items.remove(pos);
            self.state.total -= removed.precio * Decimal::from(removed.cantidad);
            self.state.item_count -= removed.cantidad;
            self.persist();
            return Ok(QuantityUpdate::Removed);
        } else {
            item.cantidad = clamped;
            if clamped == cantidad {
                QuantityUpdate::Applied { cantidad: clamped }
            } else {
                QuantityUpdate::Clamped {
                    requested: cantidad,
                    applied: clamped,
                }
            }
        };

        self.state.total += precio * Decimal::from(delta);
        self.state.item_count += delta;
        self.persist();
        Ok(outcome)
    }

    /// Reset to the empty initial state.
    pub fn clear(&mut self) {
        self.state = CartState::default();
        self.persist();
    }

    /// Replace the state with a previously persisted snapshot.
    pub fn load(&mut self, snapshot: CartState) {
        self.state = snapshot;
    }

    /// Block until queued snapshots are written. Shutdown and test hook;
    /// normal operation never waits on persistence.
    pub fn flush_persistence(&self) {
        if let Some(persister) = &self.persister {
            persister.flush_sync();
        }
    }

    fn persist(&self) {
        if let Some(persister) = &self.persister {
            persister.persist(self.state.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, precio_cents: i64, known_stock: i64) -> NewCartItem {
        NewCartItem {
            id,
            nombre: format!("producto {id}"),
            precio: Decimal::new(precio_cents, 2),
            known_stock,
            categoria: "ropa".to_string(),
            imagen_url: None,
            color: None,
            talla: None,
            marca: None,
        }
    }

    #[test]
    fn repeated_add_increments_instead_of_duplicating() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 5)).unwrap();
        cart.add_item(item(1, 1000, 5)).unwrap();

        assert_eq!(cart.state().items.len(), 1);
        assert_eq!(cart.state().items[0].cantidad, 2);
        assert_eq!(cart.state().total, Decimal::new(2000, 2));
        assert_eq!(cart.state().item_count, 2);
    }

    #[test]
    fn add_fails_at_known_stock_and_leaves_state_unchanged() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 1)).unwrap();
        let before = cart.state().clone();

        let err = cart.add_item(item(1, 1000, 1)).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                id: 1,
                known_stock: 1
            }
        );
        assert_eq!(cart.state(), &before);
    }

    #[test]
    fn add_of_out_of_stock_product_fails() {
        let mut cart = CartStore::new();
        let err = cart.add_item(item(1, 1000, 0)).unwrap_err();
        assert_eq!(err, CartError::OutOfStock { id: 1 });
        assert_eq!(cart.state(), &CartState::default());
    }

    #[test]
    fn remove_deletes_the_whole_line() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 5)).unwrap();
        cart.add_item(item(1, 1000, 5)).unwrap();
        cart.add_item(item(2, 5000, 1)).unwrap();

        cart.remove_item(1);
        assert_eq!(cart.state().items.len(), 1);
        assert_eq!(cart.state().total, Decimal::new(5000, 2));
        assert_eq!(cart.state().item_count, 1);

        // unknown id is a no-op
        let before = cart.state().clone();
        cart.remove_item(99);
        assert_eq!(cart.state(), &before);
    }

    #[test]
    fn update_quantity_clamps_to_known_stock() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 3)).unwrap();

        let outcome = cart.update_quantity(1, 10).unwrap();
        assert_eq!(
            outcome,
            QuantityUpdate::Clamped {
                requested: 10,
                applied: 3
            }
        );
        assert_eq!(cart.state().items[0].cantidad, 3);
        assert_eq!(cart.state().total, Decimal::new(3000, 2));
        assert_eq!(cart.state().item_count, 3);
    }

    #[test]
    fn update_quantity_clamps_up_to_one() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 3)).unwrap();
        cart.update_quantity(1, 2).unwrap();

        let outcome = cart.update_quantity(1, 0).unwrap();
        assert_eq!(
            outcome,
            QuantityUpdate::Clamped {
                requested: 0,
                applied: 1
            }
        );
        assert_eq!(cart.state().items[0].cantidad, 1);
        assert_eq!(cart.state().total, Decimal::new(1000, 2));
        assert_eq!(cart.state().item_count, 1);
    }

    #[test]
    fn update_quantity_removes_line_when_stock_snapshot_is_zero() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 3)).unwrap();
        // a reloaded snapshot can carry a line whose advisory stock
        // dropped to zero since it was saved
        cart.state.items[0].known_stock = 0;

        let outcome = cart.update_quantity(1, 2).unwrap();
        assert_eq!(outcome, QuantityUpdate::Removed);
        assert!(cart.state().items.is_empty());
        assert_eq!(cart.state().total, Decimal::ZERO);
        assert_eq!(cart.state().item_count, 0);
    }

    #[test]
    fn update_quantity_of_unknown_item_fails() {
        let mut cart = CartStore::new();
        assert_eq!(
            cart.update_quantity(7, 2).unwrap_err(),
            CartError::UnknownItem { id: 7 }
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let mut cart = CartStore::new();
        cart.add_item(item(1, 1000, 5)).unwrap();

        cart.clear();
        let once = cart.state().clone();
        cart.clear();
        assert_eq!(cart.state(), &once);
        assert_eq!(cart.state(), &CartState::default());
    }
}

//! # tienda-cart
//!
//! Client-resident shopping cart for the tienda storefront: the reducer
//! state machine over line items, best-effort snapshot persistence on a
//! dedicated writer thread, and the checkout submitter.
//!
//! The cart's per-line `known_stock` is advisory — a stale cache of the
//! last catalog read. Only the server's transactional check at checkout
//! is authoritative.

pub mod checkout;
pub mod persist;
pub mod store;

pub use checkout::{CheckoutSubmitter, OrderGateway};
pub use persist::{load_snapshot, SnapshotWriter};
pub use store::{CartLineItem, CartState, CartStore, NewCartItem, QuantityUpdate};

//! Client-side cart errors.
//!
//! These are advisory — they reflect the cart's last-known stock, which
//! the server re-checks authoritatively at checkout.

use super::error_code::{self, TiendaErrorCode};

/// Errors signalled by cart mutations. State is left unchanged when one
/// of these is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("product {id} is out of stock")]
    OutOfStock { id: i64 },

    #[error("only {known_stock} units of product {id} are available")]
    InsufficientStock { id: i64, known_stock: i64 },

    #[error("product {id} is not in the cart")]
    UnknownItem { id: i64 },
}

impl TiendaErrorCode for CartError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfStock { .. } => error_code::CART_OUT_OF_STOCK,
            Self::InsufficientStock { .. } => error_code::CART_INSUFFICIENT_STOCK,
            Self::UnknownItem { .. } => error_code::CART_UNKNOWN_ITEM,
        }
    }
}

//! Order placement errors — validation, lookup, capacity, and storage.

use rust_decimal::Decimal;

use super::error_code::{self, TiendaErrorCode};
use super::StorageError;

/// Everything that can go wrong between receiving an order payload and
/// committing its rows. Validation variants are produced before any
/// database work begins.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("required field '{field}' is missing or empty")]
    MissingField { field: &'static str },

    #[error("no products in the cart")]
    EmptyCart,

    #[error("shipping address must not be empty")]
    EmptyAddress,

    #[error("invalid payment method: {value}")]
    InvalidPaymentMethod { value: String },

    #[error("invalid line item at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    #[error("claimed subtotal {claimed} does not match computed subtotal {computed}")]
    TotalsMismatch { claimed: Decimal, computed: Decimal },

    #[error("user not found: {uid}")]
    UserNotFound { uid: String },

    #[error("product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("insufficient stock for product {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: i64,
        requested: i64,
        available: i64,
    },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl OrderError {
    /// HTTP status this error maps to at the server boundary.
    /// 405 (wrong verb) is produced by the HTTP layer, never by this enum.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingField { .. }
            | Self::EmptyCart
            | Self::EmptyAddress
            | Self::InvalidPaymentMethod { .. }
            | Self::InvalidItem { .. } => 400,
            Self::UserNotFound { .. } | Self::ProductNotFound { .. } => 404,
            Self::TotalsMismatch { .. } | Self::InsufficientStock { .. } => 409,
            Self::Storage(_) => 500,
        }
    }
}

impl TiendaErrorCode for OrderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => error_code::ORDER_MISSING_FIELD,
            Self::EmptyCart => error_code::ORDER_EMPTY_CART,
            Self::EmptyAddress => error_code::ORDER_EMPTY_ADDRESS,
            Self::InvalidPaymentMethod { .. } => error_code::ORDER_INVALID_PAYMENT_METHOD,
            Self::InvalidItem { .. } => error_code::ORDER_INVALID_ITEM,
            Self::TotalsMismatch { .. } => error_code::ORDER_TOTALS_MISMATCH,
            Self::UserNotFound { .. } => error_code::ORDER_USER_NOT_FOUND,
            Self::ProductNotFound { .. } => error_code::ORDER_PRODUCT_NOT_FOUND,
            Self::InsufficientStock { .. } => error_code::ORDER_INSUFFICIENT_STOCK,
            Self::Storage(e) => e.error_code(),
        }
    }
}

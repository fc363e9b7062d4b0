//! Order wire schemas shared by the checkout submitter and the server.
//!
//! Field names match the HTTP contract exactly; the payload is validated
//! at the boundary and converted to typed values before any business
//! logic runs.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::OrderError;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Efectivo,
    Tarjeta,
    Transferencia,
}

impl PaymentMethod {
    /// Parse a wire value. Returns `None` for anything outside the fixed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "efectivo" => Some(Self::Efectivo),
            "tarjeta" => Some(Self::Tarjeta),
            "transferencia" => Some(Self::Transferencia),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Efectivo => "efectivo",
            Self::Tarjeta => "tarjeta",
            Self::Transferencia => "transferencia",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product-and-quantity pair within an order payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub id: i64,
    pub cantidad: i64,
    pub precio: Decimal,
}

/// The checkout request body.
///
/// `metodoPago` stays a string here so an out-of-set value produces a
/// validation error instead of a deserialisation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub firebase_uid: String,
    pub items: Vec<OrderItemInput>,
    pub direccion: String,
    #[serde(rename = "metodoPago")]
    pub metodo_pago: String,
    pub subtotal: Decimal,
    pub itbms: Decimal,
    pub total: Decimal,
}

impl OrderRequest {
    /// Fail-fast validation, run before any database work. Returns the
    /// parsed payment method on success.
    pub fn validate(&self) -> Result<PaymentMethod, OrderError> {
        if self.firebase_uid.trim().is_empty() {
            return Err(OrderError::MissingField {
                field: "firebase_uid",
            });
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if self.direccion.trim().is_empty() {
            return Err(OrderError::EmptyAddress);
        }
        let method =
            PaymentMethod::parse(&self.metodo_pago).ok_or(OrderError::InvalidPaymentMethod {
                value: self.metodo_pago.clone(),
            })?;
        for (index, item) in self.items.iter().enumerate() {
            if item.cantidad < 1 {
                return Err(OrderError::InvalidItem {
                    index,
                    reason: format!("cantidad must be at least 1, got {}", item.cantidad),
                });
            }
            if item.precio.is_sign_negative() {
                return Err(OrderError::InvalidItem {
                    index,
                    reason: format!("precio must not be negative, got {}", item.precio),
                });
            }
        }
        Ok(method)
    }
}

/// The checkout success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub success: bool,
    pub message: String,
    /// Generated order reference, not a database id.
    pub pedido_id: String,
    pub carritos_ids: Vec<i64>,
    pub usuario_id: i64,
    pub total_productos: i64,
    pub subtotal: Decimal,
    pub itbms: Decimal,
    pub total: Decimal,
    pub direccion: String,
    pub metodo_pago: PaymentMethod,
}

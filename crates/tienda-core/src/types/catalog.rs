//! Supplier, product-type, category, and purchase-history rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplier row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub nombre: String,
    pub ruc: String,
    pub logo: Option<String>,
    pub categoria: Option<i64>,
}

/// Payload for creating or replacing a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub nombre: String,
    pub ruc: String,
    pub logo: Option<String>,
    pub categoria: Option<i64>,
}

/// A product-type row, scoped to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i64,
    pub tipo: String,
    pub categoria: i64,
}

/// A category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nombre: String,
}

/// One purchase-history row: a `carrito` row joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: i64,
    pub id_producto: i64,
    pub canti_productos: i64,
    pub subtotal: Decimal,
    pub itbms: Decimal,
    pub total: Decimal,
    pub direccion: String,
    pub metodo_pago: String,
    pub status: String,
    pub fecha_creacion: String,
    pub producto_nombre: String,
    pub producto_precio: Decimal,
    pub producto_imagen: Option<String>,
    pub producto_categoria: Option<String>,
}

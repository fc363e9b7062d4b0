//! Product catalog types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog visibility of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Activo,
    Inactivo,
    Agotado,
}

impl ProductStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "activo" => Some(Self::Activo),
            "inactivo" => Some(Self::Inactivo),
            "agotado" => Some(Self::Agotado),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activo => "activo",
            Self::Inactivo => "inactivo",
            Self::Agotado => "agotado",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i64,
    pub categoria: Option<String>,
    #[serde(rename = "imagenURL")]
    pub imagen_url: Option<String>,
    pub color: Option<String>,
    pub talla: Option<String>,
    pub tipo: Option<String>,
    pub status: ProductStatus,
    /// Lifetime purchase counter, incremented transactionally at checkout.
    pub comprados: i64,
    /// Supplier reference.
    pub marca: Option<i64>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i64,
    pub categoria: Option<String>,
    #[serde(rename = "imagenURL")]
    pub imagen_url: Option<String>,
    pub color: Option<String>,
    pub talla: Option<String>,
    pub tipo: Option<String>,
    pub marca: Option<i64>,
}

/// Payload for updating a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductUpdate {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Decimal>,
    pub stock: Option<i64>,
    pub categoria: Option<String>,
    #[serde(rename = "imagenURL")]
    pub imagen_url: Option<String>,
    pub color: Option<String>,
    pub talla: Option<String>,
    pub tipo: Option<String>,
    pub status: Option<ProductStatus>,
    pub marca: Option<i64>,
}

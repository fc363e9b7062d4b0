//! Query modules — free functions over `&Connection`, one module per
//! table family. Monetary columns are canonical two-decimal TEXT.

pub mod categories;
pub mod orders;
pub mod product_types;
pub mod products;
pub mod suppliers;
pub mod users;

use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;

/// Parse a canonical decimal TEXT column.
pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Canonical TEXT rendering for a monetary amount.
pub(crate) fn decimal_text(value: Decimal) -> String {
    tienda_core::money::round_currency(value).to_string()
}

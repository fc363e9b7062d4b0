//! Product-type queries for the admin endpoints.

use rusqlite::{params, Connection};

use tienda_core::errors::StorageError;
use tienda_core::types::catalog::ProductType;

/// List the product types within a category, ordered by name.
pub fn list_by_category(
    conn: &Connection,
    categoria: i64,
) -> Result<Vec<ProductType>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, tipo, categoria FROM tipo_producto WHERE categoria = ?1 ORDER BY tipo",
    )?;
    let rows = stmt.query_map(params![categoria], |row| {
        Ok(ProductType {
            id: row.get(0)?,
            tipo: row.get(1)?,
            categoria: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

/// Insert a product type and return its id.
pub fn insert(conn: &Connection, tipo: &str, categoria: i64) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO tipo_producto (tipo, categoria) VALUES (?1, ?2)",
        params![tipo, categoria],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Rename a product type. Returns false when no row matched.
pub fn update(conn: &Connection, id: i64, tipo: &str) -> Result<bool, StorageError> {
    let rows = conn.execute(
        "UPDATE tipo_producto SET tipo = ?2 WHERE id = ?1",
        params![id, tipo],
    )?;
    Ok(rows > 0)
}

/// Delete a product type. Returns false when no row matched.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let rows = conn.execute("DELETE FROM tipo_producto WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}

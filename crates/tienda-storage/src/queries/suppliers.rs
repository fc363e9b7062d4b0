//! Supplier queries for the admin endpoints.

use rusqlite::{params, Connection, OptionalExtension, Row};

use tienda_core::errors::StorageError;
use tienda_core::types::catalog::{NewSupplier, Supplier};

fn row_to_supplier(row: &Row<'_>) -> rusqlite::Result<Supplier> {
    Ok(Supplier {
        id: row.get(0)?,
        nombre: row.get(1)?,
        ruc: row.get(2)?,
        logo: row.get(3)?,
        categoria: row.get(4)?,
    })
}

/// List all suppliers ordered by name.
pub fn list(conn: &Connection) -> Result<Vec<Supplier>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, nombre, ruc, logo, categoria FROM proveedores ORDER BY nombre",
    )?;
    let rows = stmt.query_map([], |row| row_to_supplier(row))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

/// List suppliers belonging to a category.
pub fn list_by_category(conn: &Connection, categoria: i64) -> Result<Vec<Supplier>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, nombre, ruc, logo, categoria FROM proveedores
         WHERE categoria = ?1 ORDER BY nombre",
    )?;
    let rows = stmt.query_map(params![categoria], |row| row_to_supplier(row))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

/// Fetch one supplier.
pub fn get(conn: &Connection, id: i64) -> Result<Option<Supplier>, StorageError> {
    conn.query_row(
        "SELECT id, nombre, ruc, logo, categoria FROM proveedores WHERE id = ?1",
        params![id],
        |row| row_to_supplier(row),
    )
    .optional()
    .map_err(StorageError::from)
}

/// Insert a supplier and return its id.
pub fn insert(conn: &Connection, supplier: &NewSupplier) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO proveedores (nombre, ruc, logo, categoria) VALUES (?1, ?2, ?3, ?4)",
        params![supplier.nombre, supplier.ruc, supplier.logo, supplier.categoria],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Replace a supplier's fields. Returns false when no row matched.
pub fn update(conn: &Connection, id: i64, supplier: &NewSupplier) -> Result<bool, StorageError> {
    let rows = conn.execute(
        "UPDATE proveedores SET nombre = ?2, ruc = ?3, logo = ?4, categoria = ?5,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?1",
        params![id, supplier.nombre, supplier.ruc, supplier.logo, supplier.categoria],
    )?;
    Ok(rows > 0)
}

/// Delete a supplier. Returns false when no row matched.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let rows = conn.execute("DELETE FROM proveedores WHERE id = ?1", params![id])?;
    Ok(rows > 0)
}

//! Category queries. Categories are reference data seeded by the admin.

use rusqlite::{params, Connection};

use tienda_core::errors::StorageError;
use tienda_core::types::catalog::Category;

/// List all categories ordered by name.
pub fn list(conn: &Connection) -> Result<Vec<Category>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, nombre FROM categorias ORDER BY nombre")?;
    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            nombre: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

/// Insert a category and return its id.
pub fn insert(conn: &Connection, nombre: &str) -> Result<i64, StorageError> {
    conn.execute("INSERT INTO categorias (nombre) VALUES (?1)", params![nombre])?;
    Ok(conn.last_insert_rowid())
}

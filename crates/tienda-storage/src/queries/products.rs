//! Product catalog queries.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use tienda_core::errors::StorageError;
use tienda_core::types::product::{NewProduct, Product, ProductStatus, ProductUpdate};

use super::{decimal_column, decimal_text};

const PRODUCT_COLUMNS: &str = "id, nombre, descripcion, precio, stock, categoria, imagen_url, \
                               color, talla, tipo, status, comprados, marca";

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    let status_raw: String = row.get(10)?;
    let status = ProductStatus::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            10,
            rusqlite::types::Type::Text,
            format!("unknown product status '{status_raw}'").into(),
        )
    })?;

    Ok(Product {
        id: row.get(0)?,
        nombre: row.get(1)?,
        descripcion: row.get(2)?,
        precio: decimal_column(row, 3)?,
        stock: row.get(4)?,
        categoria: row.get(5)?,
        imagen_url: row.get(6)?,
        color: row.get(7)?,
        talla: row.get(8)?,
        tipo: row.get(9)?,
        status,
        comprados: row.get(11)?,
        marca: row.get(12)?,
    })
}

/// List products visible in the storefront.
pub fn list_active(conn: &Connection) -> Result<Vec<Product>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM productos WHERE status = 'activo' ORDER BY nombre"
    ))?;
    let rows = stmt.query_map([], |row| row_to_product(row))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

/// Fetch a single product by id.
pub fn get(conn: &Connection, id: i64) -> Result<Option<Product>, StorageError> {
    conn.query_row(
        &format!("SELECT {PRODUCT_COLUMNS} FROM productos WHERE id = ?1"),
        params![id],
        |row| row_to_product(row),
    )
    .optional()
    .map_err(StorageError::from)
}

/// Insert a product and return its id.
pub fn insert(conn: &Connection, product: &NewProduct) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO productos (nombre, descripcion, precio, stock, categoria, imagen_url,
                                color, talla, tipo, marca)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            product.nombre,
            product.descripcion,
            decimal_text(product.precio),
            product.stock,
            product.categoria,
            product.imagen_url,
            product.color,
            product.talla,
            product.tipo,
            product.marca,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Apply a partial update. Absent fields keep their current value.
/// Returns false when no row matched.
pub fn update(conn: &Connection, id: i64, update: &ProductUpdate) -> Result<bool, StorageError> {
    let rows = conn.execute(
        "UPDATE productos SET
            nombre = COALESCE(?2, nombre),
            descripcion = COALESCE(?3, descripcion),
            precio = COALESCE(?4, precio),
            stock = COALESCE(?5, stock),
            categoria = COALESCE(?6, categoria),
            imagen_url = COALESCE(?7, imagen_url),
            color = COALESCE(?8, color),
            talla = COALESCE(?9, talla),
            tipo = COALESCE(?10, tipo),
            status = COALESCE(?11, status),
            marca = COALESCE(?12, marca),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?1",
        params![
            id,
            update.nombre,
            update.descripcion,
            update.precio.map(decimal_text),
            update.stock,
            update.categoria,
            update.imagen_url,
            update.color,
            update.talla,
            update.tipo,
            update.status.map(|s| s.as_str()),
            update.marca,
        ],
    )?;
    Ok(rows > 0)
}

/// Set only the catalog status. Returns false when no row matched.
pub fn set_status(conn: &Connection, id: i64, status: ProductStatus) -> Result<bool, StorageError> {
    let rows = conn.execute(
        "UPDATE productos SET status = ?2,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    Ok(rows > 0)
}

/// Live stock and unit price for one product — the authoritative row
/// fetch used inside the checkout transaction.
pub fn stock_and_price(
    conn: &Connection,
    id: i64,
) -> Result<Option<(i64, Decimal)>, StorageError> {
    conn.query_row(
        "SELECT stock, precio FROM productos WHERE id = ?1",
        params![id],
        |row| {
            let stock: i64 = row.get(0)?;
            let precio = decimal_column(row, 1)?;
            Ok((stock, precio))
        },
    )
    .optional()
    .map_err(StorageError::from)
}

/// Decrement stock and increment the purchase counter for one product.
pub fn adjust_stock(conn: &Connection, id: i64, cantidad: i64) -> Result<(), StorageError> {
    let rows = conn.execute(
        "UPDATE productos SET stock = stock - ?1, comprados = comprados + ?1
         WHERE id = ?2",
        params![cantidad, id],
    )?;
    if rows == 0 {
        return Err(StorageError::NotFound);
    }
    Ok(())
}

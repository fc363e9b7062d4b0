//! Order persistence — `carrito` rows, purchase details, and history.

use chrono::Utc;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use tienda_core::constants::ORDER_STATUS_PENDING;
use tienda_core::errors::StorageError;
use tienda_core::types::catalog::PurchaseRecord;

use super::{decimal_column, decimal_text};

/// One `carrito` row to insert, amounts already recomputed server-side.
#[derive(Debug)]
pub struct CartRowInsert<'a> {
    pub id_producto: i64,
    pub id_usuario: i64,
    pub canti_productos: i64,
    pub subtotal: Decimal,
    pub itbms: Decimal,
    pub total: Decimal,
    pub direccion: &'a str,
    pub metodo_pago: &'a str,
}

/// Insert a `carrito` row with status 'pendiente'; returns the new row id.
pub fn insert_cart_row(conn: &Connection, row: &CartRowInsert<'_>) -> Result<i64, StorageError> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO carrito (id_producto, canti_productos, id_usuario, subtotal, itbms,
                              total, direccion, metodo_pago, status, fecha_creacion,
                              fecha_modificacion)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            row.id_producto,
            row.canti_productos,
            row.id_usuario,
            decimal_text(row.subtotal),
            decimal_text(row.itbms),
            decimal_text(row.total),
            row.direccion,
            row.metodo_pago,
            ORDER_STATUS_PENDING,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert the `detalles_compra` row that mirrors a `carrito` row.
pub fn insert_purchase_detail(
    conn: &Connection,
    id_carrito: i64,
    id_producto: i64,
    id_usuario: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO detalles_compra (id_carrito, id_producto, id_usuario)
         VALUES (?1, ?2, ?3)",
        params![id_carrito, id_producto, id_usuario],
    )?;
    Ok(())
}

/// Purchase history for a user, newest first, joined with the product.
pub fn purchase_history(
    conn: &Connection,
    id_usuario: i64,
) -> Result<Vec<PurchaseRecord>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.id_producto, c.canti_productos, c.subtotal, c.itbms, c.total,
                c.direccion, c.metodo_pago, c.status, c.fecha_creacion,
                p.nombre, p.precio, p.imagen_url, p.categoria
         FROM carrito c
         INNER JOIN productos p ON c.id_producto = p.id
         WHERE c.id_usuario = ?1
         ORDER BY c.fecha_creacion DESC",
    )?;

    let rows = stmt.query_map(params![id_usuario], |row| {
        Ok(PurchaseRecord {
            id: row.get(0)?,
            id_producto: row.get(1)?,
            canti_productos: row.get(2)?,
            subtotal: decimal_column(row, 3)?,
            itbms: decimal_column(row, 4)?,
            total: decimal_column(row, 5)?,
            direccion: row.get(6)?,
            metodo_pago: row.get(7)?,
            status: row.get(8)?,
            fecha_creacion: row.get(9)?,
            producto_nombre: row.get(10)?,
            producto_precio: decimal_column(row, 11)?,
            producto_imagen: row.get(12)?,
            producto_categoria: row.get(13)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

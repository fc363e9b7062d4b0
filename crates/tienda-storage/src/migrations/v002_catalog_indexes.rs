//! v002 — indexes for the hot catalog and history queries.

use rusqlite::Connection;

use tienda_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_productos_status ON productos(status);
         CREATE INDEX IF NOT EXISTS idx_carrito_usuario ON carrito(id_usuario);
         CREATE INDEX IF NOT EXISTS idx_detalles_carrito ON detalles_compra(id_carrito);
         CREATE INDEX IF NOT EXISTS idx_tipo_producto_categoria ON tipo_producto(categoria);
         CREATE INDEX IF NOT EXISTS idx_proveedores_categoria ON proveedores(categoria);",
    )
    .map_err(StorageError::from)
}

//! v001 — storefront relational schema.
//!
//! Monetary columns are canonical two-decimal TEXT. Status vocabularies
//! are enforced with CHECK constraints. `carrito` rows are created by the
//! checkout transaction with status 'pendiente'; the remaining states
//! belong to fulfilment processes outside this workspace.

use rusqlite::Connection;

use tienda_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS categorias (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS proveedores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            ruc TEXT NOT NULL UNIQUE,
            logo TEXT,
            categoria INTEGER REFERENCES categorias(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS usuarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firebase_uid TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            nombre TEXT NOT NULL,
            apellido TEXT NOT NULL,
            usuario TEXT,
            edad INTEGER,
            direccion TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS productos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            descripcion TEXT,
            precio TEXT NOT NULL,
            stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
            categoria TEXT,
            imagen_url TEXT,
            color TEXT,
            talla TEXT,
            tipo TEXT,
            status TEXT NOT NULL DEFAULT 'activo'
                CHECK (status IN ('activo', 'inactivo', 'agotado')),
            comprados INTEGER NOT NULL DEFAULT 0,
            marca INTEGER REFERENCES proveedores(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS tipo_producto (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tipo TEXT NOT NULL,
            categoria INTEGER NOT NULL REFERENCES categorias(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS carrito (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            id_producto INTEGER NOT NULL REFERENCES productos(id) ON DELETE CASCADE,
            canti_productos INTEGER NOT NULL CHECK (canti_productos >= 1),
            id_usuario INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
            subtotal TEXT NOT NULL,
            itbms TEXT NOT NULL,
            total TEXT NOT NULL,
            direccion TEXT NOT NULL,
            metodo_pago TEXT NOT NULL
                CHECK (metodo_pago IN ('efectivo', 'tarjeta', 'transferencia')),
            status TEXT NOT NULL DEFAULT 'pendiente'
                CHECK (status IN ('pendiente', 'procesando', 'completado', 'cancelado')),
            fecha_creacion TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            fecha_modificacion TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS detalles_compra (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            id_carrito INTEGER NOT NULL REFERENCES carrito(id) ON DELETE CASCADE,
            id_producto INTEGER NOT NULL REFERENCES productos(id) ON DELETE CASCADE,
            id_usuario INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(StorageError::from)
}

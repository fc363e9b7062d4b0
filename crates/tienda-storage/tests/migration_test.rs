//! Migration runner tests — forward-only, idempotent, versioned.

use rusqlite::Connection;
use tempfile::TempDir;

use tienda_storage::migrations;

#[test]
fn fresh_database_reports_version_zero() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(migrations::current_version(&conn).unwrap(), 0);
}

#[test]
fn all_migrations_apply_and_reapplying_is_a_no_op() {
    let conn = Connection::open_in_memory().unwrap();

    let applied = migrations::run_migrations(&conn).unwrap();
    assert_eq!(applied, migrations::LATEST_VERSION);
    assert_eq!(
        migrations::current_version(&conn).unwrap(),
        migrations::LATEST_VERSION
    );

    let reapplied = migrations::run_migrations(&conn).unwrap();
    assert_eq!(reapplied, 0);
}

#[test]
fn schema_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("migrate.db");

    {
        let conn = Connection::open(&path).unwrap();
        migrations::run_migrations(&conn).unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(
        migrations::current_version(&conn).unwrap(),
        migrations::LATEST_VERSION
    );

    // the storefront tables exist
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
             ('usuarios', 'productos', 'carrito', 'detalles_compra', 'proveedores',
              'tipo_producto', 'categorias')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 7);
}

#[test]
fn checks_reject_out_of_vocabulary_statuses() {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();

    let err = conn.execute(
        "INSERT INTO productos (nombre, precio, stock, status) VALUES ('x', '1.00', 1, 'borrado')",
        [],
    );
    assert!(err.is_err());
}

//! Catalog, user, and reference-data tests against the engine.

use rust_decimal::Decimal;
use tempfile::TempDir;

use tienda_core::errors::StorageError;
use tienda_core::types::catalog::NewSupplier;
use tienda_core::types::product::{NewProduct, ProductStatus, ProductUpdate};
use tienda_core::types::user::{NewUser, ProfileUpdate};
use tienda_storage::StoreEngine;

fn temp_engine() -> (TempDir, StoreEngine) {
    let dir = TempDir::new().unwrap();
    let engine = StoreEngine::open(&dir.path().join("test.db"), 2).unwrap();
    (dir, engine)
}

fn new_product(nombre: &str, precio_cents: i64, stock: i64) -> NewProduct {
    NewProduct {
        nombre: nombre.to_string(),
        descripcion: Some("descripción".to_string()),
        precio: Decimal::new(precio_cents, 2),
        stock,
        categoria: Some("ropa".to_string()),
        imagen_url: None,
        color: Some("negro".to_string()),
        talla: Some("M".to_string()),
        tipo: None,
        marca: None,
    }
}

#[test]
fn product_round_trip_preserves_fields() {
    let (_dir, engine) = temp_engine();

    let created = engine.create_product(&new_product("camisa", 1999, 10)).unwrap();
    assert_eq!(created.precio, Decimal::new(1999, 2));
    assert_eq!(created.stock, 10);
    assert_eq!(created.status, ProductStatus::Activo);
    assert_eq!(created.comprados, 0);

    let fetched = engine.get_product(created.id).unwrap().unwrap();
    assert_eq!(fetched.nombre, "camisa");
    assert_eq!(fetched.color.as_deref(), Some("negro"));
}

#[test]
fn listing_excludes_inactive_products() {
    let (_dir, engine) = temp_engine();

    let visible = engine.create_product(&new_product("visible", 1000, 5)).unwrap();
    let hidden = engine.create_product(&new_product("oculto", 1000, 5)).unwrap();
    engine
        .set_product_status(hidden.id, ProductStatus::Inactivo)
        .unwrap();

    let listed = engine.list_products().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, visible.id);
}

#[test]
fn partial_update_leaves_other_fields_alone() {
    let (_dir, engine) = temp_engine();
    let created = engine.create_product(&new_product("camisa", 1000, 5)).unwrap();

    let updated = engine
        .update_product(
            created.id,
            &ProductUpdate {
                precio: Some(Decimal::new(1250, 2)),
                stock: Some(8),
                ..ProductUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.precio, Decimal::new(1250, 2));
    assert_eq!(updated.stock, 8);
    assert_eq!(updated.nombre, "camisa");
    assert_eq!(updated.talla.as_deref(), Some("M"));

    let missing = engine.update_product(999, &ProductUpdate::default());
    assert!(matches!(missing.unwrap_err(), StorageError::NotFound));
}

#[test]
fn user_profile_round_trip_and_update() {
    let (_dir, engine) = temp_engine();

    engine
        .register_user(&NewUser {
            firebase_uid: "uid-profile".to_string(),
            email: "ana@example.com".to_string(),
            nombre: "Ana".to_string(),
            apellido: "Gómez".to_string(),
            usuario: Some("anag".to_string()),
            edad: Some(30),
            direccion: None,
        })
        .unwrap();

    let profile = engine.get_profile("uid-profile").unwrap().unwrap();
    assert_eq!(profile.nombre, "Ana");
    assert_eq!(profile.edad, Some(30));
    assert_eq!(profile.direccion, None);

    engine
        .update_profile(
            "uid-profile",
            &ProfileUpdate {
                direccion: Some("Vía España".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();

    let profile = engine.get_profile("uid-profile").unwrap().unwrap();
    assert_eq!(profile.direccion.as_deref(), Some("Vía España"));
    assert_eq!(profile.nombre, "Ana");

    assert!(engine.get_profile("uid-ghost").unwrap().is_none());
}

#[test]
fn suppliers_and_product_types_crud() {
    let (_dir, engine) = temp_engine();

    let ropa = engine.create_category("ropa").unwrap();
    let calzado = engine.create_category("calzado").unwrap();
    assert_eq!(engine.list_categories().unwrap().len(), 2);

    let supplier = engine
        .create_supplier(&NewSupplier {
            nombre: "Deportes SA".to_string(),
            ruc: "8-123-456".to_string(),
            logo: None,
            categoria: Some(calzado),
        })
        .unwrap();
    assert_eq!(engine.list_suppliers().unwrap().len(), 1);
    assert_eq!(engine.list_suppliers_by_category(calzado).unwrap().len(), 1);
    assert!(engine.list_suppliers_by_category(ropa).unwrap().is_empty());

    engine
        .update_supplier(
            supplier.id,
            &NewSupplier {
                nombre: "Deportes SA".to_string(),
                ruc: "8-123-456".to_string(),
                logo: Some("logo.png".to_string()),
                categoria: Some(ropa),
            },
        )
        .unwrap();
    assert_eq!(engine.list_suppliers_by_category(ropa).unwrap().len(), 1);

    let tipo_id = engine.create_product_type("camisetas", ropa).unwrap();
    assert_eq!(engine.list_product_types(ropa).unwrap().len(), 1);

    engine.update_product_type(tipo_id, "camisetas deportivas").unwrap();
    assert_eq!(
        engine.list_product_types(ropa).unwrap()[0].tipo,
        "camisetas deportivas"
    );

    engine.delete_product_type(tipo_id).unwrap();
    assert!(engine.list_product_types(ropa).unwrap().is_empty());

    engine.delete_supplier(supplier.id).unwrap();
    assert!(engine.list_suppliers().unwrap().is_empty());
    assert!(matches!(
        engine.delete_supplier(supplier.id).unwrap_err(),
        StorageError::NotFound
    ));
}

#[test]
fn duplicate_auth_uid_is_a_storage_error() {
    let (_dir, engine) = temp_engine();

    let user = NewUser {
        firebase_uid: "uid-dup".to_string(),
        email: "dup@example.com".to_string(),
        nombre: "Ana".to_string(),
        apellido: "Gómez".to_string(),
        usuario: None,
        edad: None,
        direccion: None,
    };
    engine.register_user(&user).unwrap();
    assert!(engine.register_user(&user).is_err());
}

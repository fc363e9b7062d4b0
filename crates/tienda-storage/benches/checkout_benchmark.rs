//! Checkout hot-path benchmark: one order, two line items, full
//! transaction including the stock pre-check and row writes.

use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::TempDir;

use tienda_core::types::order::{OrderItemInput, OrderRequest};
use tienda_core::types::product::NewProduct;
use tienda_core::types::user::NewUser;
use tienda_storage::StoreEngine;

fn seed(engine: &StoreEngine) -> (i64, i64) {
    engine
        .register_user(&NewUser {
            firebase_uid: "uid-bench".to_string(),
            email: "bench@example.com".to_string(),
            nombre: "Bench".to_string(),
            apellido: "Marks".to_string(),
            usuario: None,
            edad: None,
            direccion: None,
        })
        .unwrap();

    let product = |nombre: &str| NewProduct {
        nombre: nombre.to_string(),
        descripcion: None,
        precio: Decimal::new(1000, 2),
        stock: 100_000_000,
        categoria: None,
        imagen_url: None,
        color: None,
        talla: None,
        tipo: None,
        marca: None,
    };

    let a = engine.create_product(&product("bench a")).unwrap().id;
    let b = engine.create_product(&product("bench b")).unwrap().id;
    (a, b)
}

fn order(a: i64, b: i64) -> OrderRequest {
    let subtotal = Decimal::new(3000, 2); // 2 + 1 units at 10.00
    let itbms = Decimal::new(210, 2);
    OrderRequest {
        firebase_uid: "uid-bench".to_string(),
        items: vec![
            OrderItemInput {
                id: a,
                cantidad: 2,
                precio: Decimal::new(1000, 2),
            },
            OrderItemInput {
                id: b,
                cantidad: 1,
                precio: Decimal::new(1000, 2),
            },
        ],
        direccion: "Calle 50".to_string(),
        metodo_pago: "efectivo".to_string(),
        subtotal,
        itbms,
        total: subtotal + itbms,
    }
}

fn bench_place_order(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let engine = StoreEngine::open(&dir.path().join("bench.db"), 2).unwrap();
    let (a, b) = seed(&engine);
    let req = order(a, b);

    c.bench_function("place_order_two_items", |bencher| {
        bencher.iter(|| engine.place_order(&req).unwrap());
    });
}

criterion_group!(benches, bench_place_order);
criterion_main!(benches);

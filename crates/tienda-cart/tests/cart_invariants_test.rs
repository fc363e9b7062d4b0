//! Property tests for the cart reducer invariants, plus the snapshot
//! round-trip through the writer thread.

use proptest::prelude::*;
use rust_decimal::Decimal;

use tienda_cart::{load_snapshot, CartState, CartStore, NewCartItem, SnapshotWriter};

/// Price is a function of the product id so repeated adds of one id are
/// consistent, as they are when payloads come from one catalog read.
fn precio_for(id: i64) -> Decimal {
    Decimal::new(id * 125, 2)
}

fn new_item(id: i64, known_stock: i64) -> NewCartItem {
    NewCartItem {
        id,
        nombre: format!("producto {id}"),
        precio: precio_for(id),
        known_stock,
        categoria: "ropa".to_string(),
        imagen_url: None,
        color: None,
        talla: None,
        marca: None,
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add { id: i64, known_stock: i64 },
    Remove { id: i64 },
    Update { id: i64, cantidad: i64 },
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1..6i64, 0..6i64).prop_map(|(id, known_stock)| Op::Add { id, known_stock }),
        2 => (1..6i64).prop_map(|id| Op::Remove { id }),
        3 => (1..6i64, -2..10i64).prop_map(|(id, cantidad)| Op::Update { id, cantidad }),
        1 => Just(Op::Clear),
    ]
}

fn apply(cart: &mut CartStore, op: &Op) {
    match *op {
        Op::Add { id, known_stock } => {
            // capacity errors leave state unchanged; that is part of
            // what the invariants below verify
            let _ = cart.add_item(new_item(id, known_stock));
        }
        Op::Remove { id } => cart.remove_item(id),
        Op::Update { id, cantidad } => {
            let _ = cart.update_quantity(id, cantidad);
        }
        Op::Clear => cart.clear(),
    }
}

proptest! {
    /// `total` and `item_count` always equal the true sums over items.
    #[test]
    fn running_totals_match_true_sums(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut cart = CartStore::new();
        for op in &ops {
            apply(&mut cart, op);

            let true_total: Decimal = cart
                .state()
                .items
                .iter()
                .map(|i| i.precio * Decimal::from(i.cantidad))
                .sum();
            let true_count: i64 = cart.state().items.iter().map(|i| i.cantidad).sum();

            prop_assert_eq!(cart.state().total, true_total);
            prop_assert_eq!(cart.state().item_count, true_count);
        }
    }

    /// At most one line per product id, whatever the operation order.
    #[test]
    fn no_duplicate_product_ids(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut cart = CartStore::new();
        for op in &ops {
            apply(&mut cart, op);

            let mut ids: Vec<i64> = cart.state().items.iter().map(|i| i.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), cart.state().items.len());
        }
    }

    /// Every line's quantity stays within `[1, known_stock]`.
    #[test]
    fn quantities_stay_within_bounds(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut cart = CartStore::new();
        for op in &ops {
            apply(&mut cart, op);

            for item in &cart.state().items {
                prop_assert!(item.cantidad >= 1);
                prop_assert!(item.cantidad <= item.known_stock);
            }
        }
    }
}

#[test]
fn snapshot_round_trips_through_the_writer() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");

    let mut cart = CartStore::with_persister(SnapshotWriter::new(path.clone()));
    cart.add_item(new_item(1, 5)).unwrap();
    cart.add_item(new_item(1, 5)).unwrap();
    cart.add_item(new_item(2, 3)).unwrap();
    let expected = cart.state().clone();

    // persistence is fire-and-forget; flush before reading back
    cart.flush_persistence();

    let mut restored = CartStore::new();
    restored.load(load_snapshot(&path));
    assert_eq!(restored.state(), &expected);
}

#[test]
fn missing_snapshot_yields_the_empty_state() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = load_snapshot(&dir.path().join("does-not-exist.json"));
    assert_eq!(state, CartState::default());
}

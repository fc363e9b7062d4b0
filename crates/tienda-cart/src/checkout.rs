//! Checkout submitter — builds the order payload from cart state and
//! hands it to the order gateway. Single attempt, no retry; the cart is
//! cleared only after the gateway confirms.

use tracing::info;

use tienda_core::errors::OrderError;
use tienda_core::money::{itbms_for, round_currency};
use tienda_core::types::order::{OrderConfirmation, OrderItemInput, OrderRequest, PaymentMethod};

use crate::store::CartStore;

/// The seam between the client cart and the order endpoint. The server
/// engine implements this directly; tests substitute fakes.
pub trait OrderGateway {
    fn submit(&self, req: &OrderRequest) -> Result<OrderConfirmation, OrderError>;
}

/// Builds and submits order payloads through a gateway.
pub struct CheckoutSubmitter<G> {
    gateway: G,
}

impl<G: OrderGateway> CheckoutSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Submit the cart as an order. On success the cart is cleared and
    /// the confirmation returned; on failure the cart is left exactly as
    /// it was and the gateway's error is surfaced verbatim.
    pub fn submit_order(
        &self,
        cart: &mut CartStore,
        auth_uid: &str,
        direccion: &str,
        metodo_pago: PaymentMethod,
    ) -> Result<OrderConfirmation, OrderError> {
        if auth_uid.trim().is_empty() {
            return Err(OrderError::MissingField {
                field: "firebase_uid",
            });
        }
        let direccion = direccion.trim();
        if direccion.is_empty() {
            return Err(OrderError::EmptyAddress);
        }
        if cart.state().items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let subtotal = round_currency(cart.state().total);
        let itbms = itbms_for(subtotal);
        let total = round_currency(subtotal + itbms);

        let req = OrderRequest {
            firebase_uid: auth_uid.to_string(),
            items: cart
                .state()
                .items
                .iter()
                .map(|item| OrderItemInput {
                    id: item.id,
                    cantidad: item.cantidad,
                    precio: item.precio,
                })
                .collect(),
            direccion: direccion.to_string(),
            metodo_pago: metodo_pago.as_str().to_string(),
            subtotal,
            itbms,
            total,
        };

        let confirmation = self.gateway.submit(&req)?;

        info!(pedido_id = %confirmation.pedido_id, "checkout confirmed, clearing cart");
        cart.clear();
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::cell::RefCell;

    use crate::store::NewCartItem;

    /// Gateway fake that records the request and returns a canned result.
    struct FakeGateway {
        requests: RefCell<Vec<OrderRequest>>,
        fail_with: Option<fn() -> OrderError>,
    }

    impl FakeGateway {
        fn succeeding() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(err: fn() -> OrderError) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                fail_with: Some(err),
            }
        }
    }

    impl OrderGateway for FakeGateway {
        fn submit(&self, req: &OrderRequest) -> Result<OrderConfirmation, OrderError> {
            self.requests.borrow_mut().push(req.clone());
            if let Some(err) = self.fail_with {
                return Err(err());
            }
            Ok(OrderConfirmation {
                success: true,
                message: "order processed".to_string(),
                pedido_id: "pedido-test".to_string(),
                carritos_ids: vec![1],
                usuario_id: 1,
                total_productos: req.items.iter().map(|i| i.cantidad).sum(),
                subtotal: req.subtotal,
                itbms: req.itbms,
                total: req.total,
                direccion: req.direccion.clone(),
                metodo_pago: PaymentMethod::Efectivo,
            })
        }
    }

    fn loaded_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(NewCartItem {
            id: 1,
            nombre: "zapatillas".to_string(),
            precio: Decimal::new(1000, 2),
            known_stock: 5,
            categoria: "zapatillas".to_string(),
            imagen_url: None,
            color: None,
            talla: None,
            marca: None,
        })
        .unwrap();
        cart.update_quantity(1, 2).unwrap();
        cart
    }

    #[test]
    fn payload_carries_seven_percent_tax() {
        let gateway = FakeGateway::succeeding();
        let submitter = CheckoutSubmitter::new(gateway);
        let mut cart = loaded_cart();

        submitter
            .submit_order(&mut cart, "uid-1", "Calle 50", PaymentMethod::Tarjeta)
            .unwrap();

        let requests = submitter.gateway.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.subtotal, Decimal::new(2000, 2)); // 20.00
        assert_eq!(req.itbms, Decimal::new(140, 2)); // 1.40
        assert_eq!(req.total, Decimal::new(2140, 2)); // 21.40
        assert_eq!(req.metodo_pago, "tarjeta");
    }

    #[test]
    fn success_clears_the_cart() {
        let submitter = CheckoutSubmitter::new(FakeGateway::succeeding());
        let mut cart = loaded_cart();

        submitter
            .submit_order(&mut cart, "uid-1", "Calle 50", PaymentMethod::Efectivo)
            .unwrap();
        assert!(cart.state().items.is_empty());

        // a second submission of the now-empty cart fails validation
        let err = submitter
            .submit_order(&mut cart, "uid-1", "Calle 50", PaymentMethod::Efectivo)
            .unwrap_err();
        assert!(matches!(err, OrderError::EmptyCart));
    }

    #[test]
    fn failure_leaves_the_cart_untouched() {
        let submitter = CheckoutSubmitter::new(FakeGateway::failing(|| {
            OrderError::InsufficientStock {
                id: 1,
                requested: 2,
                available: 1,
            }
        }));
        let mut cart = loaded_cart();
        let before = cart.state().clone();

        let err = submitter
            .submit_order(&mut cart, "uid-1", "Calle 50", PaymentMethod::Efectivo)
            .unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { .. }));
        assert_eq!(cart.state(), &before);

        // exactly one attempt reached the gateway
        assert_eq!(submitter.gateway.requests.borrow().len(), 1);
    }

    #[test]
    fn blank_address_is_rejected_before_the_gateway() {
        let submitter = CheckoutSubmitter::new(FakeGateway::succeeding());
        let mut cart = loaded_cart();

        let err = submitter
            .submit_order(&mut cart, "uid-1", "   ", PaymentMethod::Efectivo)
            .unwrap_err();
        assert!(matches!(err, OrderError::EmptyAddress));
        assert!(submitter.gateway.requests.borrow().is_empty());
    }

    #[test]
    fn missing_user_is_rejected_before_the_gateway() {
        let submitter = CheckoutSubmitter::new(FakeGateway::succeeding());
        let mut cart = loaded_cart();

        let err = submitter
            .submit_order(&mut cart, "", "Calle 50", PaymentMethod::Efectivo)
            .unwrap_err();
        assert!(matches!(err, OrderError::MissingField { .. }));
        assert!(submitter.gateway.requests.borrow().is_empty());
    }
}

//! Integration tests for cart contents across page loads.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use funky_teens_core::ProductId;
use funky_teens_integration_tests::{load_page, product_card, raw_store};
use funky_teens_storefront::catalog::ProductCard;
use funky_teens_storefront::models::keys;
use funky_teens_storefront::{Region, UiEvent};

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "₹499")));
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "₹499")));
    page.dispatch(UiEvent::AddToCart(product_card("cap", "Cap", "₹299.50")));
    page.shutdown();

    let page = load_page(dir.path());
    let cart = page.cart();
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), Decimal::new(129_750, 2));
    assert_eq!(cart.get(&ProductId::new("tee")).unwrap().quantity, 2);
}

#[test]
fn test_quantity_changes_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let tee = ProductId::new("tee");

    let mut page = load_page(dir.path());
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "499")));
    page.dispatch(UiEvent::AddToCart(product_card("cap", "Cap", "299")));
    page.dispatch(UiEvent::IncreaseQuantity(tee.clone()));
    page.dispatch(UiEvent::IncreaseQuantity(tee.clone()));
    page.dispatch(UiEvent::RemoveItem(ProductId::new("cap")));

    let mut page = load_page(dir.path());
    assert_eq!(page.cart().items().len(), 1);
    assert_eq!(page.cart().count(), 3);

    for _ in 0..3 {
        page.dispatch(UiEvent::DecreaseQuantity(tee.clone()));
    }

    let page = load_page(dir.path());
    assert!(page.cart().is_empty());
}

#[test]
fn test_stored_cart_uses_wire_format() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "499.5")));

    let raw = raw_store(dir.path()).get_item(keys::CART).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{
            "id": "tee",
            "name": "Neon Tee",
            "price": 499.5,
            "image": "/img/tee.jpg",
            "quantity": 1
        }])
    );
}

#[test]
fn test_cart_written_elsewhere_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    raw_store(dir.path())
        .set_item(
            keys::CART,
            r#"[
                {"id":"tee","name":"Neon Tee","price":499,"image":"a.jpg","quantity":1},
                {"id":"tee","name":"Neon Tee","price":499,"image":"a.jpg","quantity":2},
                {"id":"cap","name":"Cap","price":299,"image":"b.jpg","quantity":0}
            ]"#,
        )
        .unwrap();

    let page = load_page(dir.path());
    assert_eq!(page.cart().items().len(), 1);
    assert_eq!(page.cart().count(), 3);
}

#[test]
fn test_corrupt_cart_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    raw_store(dir.path()).set_item(keys::CART, "[{]").unwrap();

    let mut page = load_page(dir.path());
    assert!(page.cart().is_empty());

    // The next change overwrites the corrupt record
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "499")));
    let page = load_page(dir.path());
    assert_eq!(page.cart().count(), 1);
}

// =============================================================================
// Extraction and Rendering Tests
// =============================================================================

#[test]
fn test_card_without_data_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let card = ProductCard::new()
        .with_class("hot-card")
        .with_text(".hot-card-title", "Glitter Hoodie")
        .with_text(".hot-card-price", "Rs 1,299");

    let mut page = load_page(dir.path());
    page.dispatch(UiEvent::AddToCart(card.clone()));
    page.dispatch(UiEvent::AddToCart(card));

    // Without a data-id every click is its own line
    let cart = page.cart();
    assert_eq!(cart.items().len(), 2);
    assert!(cart.items().iter().all(|item| item.id.is_generated()));
    assert_eq!(cart.total(), Decimal::new(2598, 0));
    assert_eq!(
        cart.items().first().unwrap().image,
        "https://via.placeholder.com/150"
    );
}

#[test]
fn test_rendered_overlay_matches_cart() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "499")));
    page.dispatch(UiEvent::IncreaseQuantity(ProductId::new("tee")));
    page.dispatch(UiEvent::CartIconClicked);

    let renderer = page.renderer();
    let overlay = renderer.region(&page, Region::CartOverlay).unwrap();
    assert!(overlay.contains("cart-modal active"));
    assert!(overlay.contains("<h4>Neon Tee</h4>"));
    assert!(overlay.contains(">998.00</span>"));

    let badge = renderer.region(&page, Region::CartCount).unwrap();
    assert!(badge.contains(">2</span>"));
}

#[test]
fn test_change_listener_sees_every_update() {
    let dir = tempfile::tempdir().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut page = load_page(dir.path());
    let sink = Arc::clone(&seen);
    page.cart_mut().on_change(move |items| {
        let count: u32 = items.iter().map(|item| item.quantity).sum();
        sink.lock().unwrap().push(count);
    });

    page.dispatch(UiEvent::AddToCart(product_card("tee", "Neon Tee", "499")));
    page.dispatch(UiEvent::IncreaseQuantity(ProductId::new("tee")));
    page.dispatch(UiEvent::RemoveItem(ProductId::new("tee")));
    // Unknown line, no change
    page.dispatch(UiEvent::RemoveItem(ProductId::new("tee")));

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 0]);
}

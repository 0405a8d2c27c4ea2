//! Storefront pages against a faked backend.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use hbspa_auth::TokenKind;
use hbspa_cache::{Cache, MemoryStore};
use hbspa_commerce::booking::BookingForm;
use hbspa_commerce::catalog::{CategoryRef, NewProduct};
use hbspa_commerce::{CategoryId, ProductId, ServiceId};
use hbspa_data::{FetchClient, Method, MockTransport};
use hbspa_storefront::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

fn shop(mock: MockTransport) -> (Storefront, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    let client = FetchClient::with_transport(mock.clone()).with_base_url(DEFAULT_API_BASE);
    (Storefront::new(Cache::new(MemoryStore::new()), client), mock)
}

fn token(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
    format!("{}.{}.sig", header, URL_SAFE_NO_PAD.encode(claims.to_string()))
}

fn snapshot(cache: &Cache) -> BTreeMap<String, Option<String>> {
    cache
        .keys()
        .unwrap()
        .into_iter()
        .map(|k| {
            let v = cache.get_raw(&k).unwrap();
            (k, v)
        })
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

#[tokio::test]
async fn add_to_cart_keeps_local_increment_when_backend_fails() {
    let (shop, mock) = shop(MockTransport::new().json(
        Method::Post,
        "/api/cart/add",
        500,
        json!("boom"),
    ));

    let outcome = shop.cart().add_to_cart(&ProductId::new("7")).await;

    assert!(!outcome.sync.is_synced());
    assert_eq!(outcome.cart.quantity(&ProductId::new("7")), 1);
    assert_eq!(shop.cart_store().read().quantity(&ProductId::new("7")), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn add_to_cart_announces_before_backend_reply() {
    let (shop, _mock) = shop(MockTransport::new().json(Method::Post, "/api/cart/add", 200, json!({})));
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    shop.cart_store().channel().subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let outcome = shop.cart().add_to_cart(&ProductId::new("2")).await;
    assert!(outcome.sync.is_synced());
    assert_eq!(outcome.message, "Producto agregado al carrito 🛒");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn load_products_rebuilds_catalog_but_category_does_not() {
    let (shop, _mock) = shop(
        MockTransport::new()
            .json(
                Method::Get,
                "/api/products",
                200,
                json!([{"id": 7, "name": "Facial", "price": 50, "imageUrl": "f.png"}]),
            )
            .json(
                Method::Get,
                "/api/products/category/2",
                200,
                json!([{"id": 9, "name": "Aceite", "price": 12.5}]),
            ),
    );

    let listing = shop.catalog().load_products().await;
    assert_eq!(listing.ready().map(Vec::len), Some(1));
    let entry = shop.catalog_cache().lookup(&ProductId::new("7")).unwrap();
    assert_eq!(entry.name.as_deref(), Some("Facial"));

    let category = shop.catalog().load_category(&CategoryId::new("2")).await;
    assert_eq!(category.ready().map(Vec::len), Some(1));
    assert!(shop.catalog_cache().lookup(&ProductId::new("9")).is_none());
    assert_eq!(shop.catalog_cache().read().len(), 1);
}

#[tokio::test]
async fn failed_listing_leaves_catalog_and_shows_placeholder() {
    let (shop, _mock) = shop(MockTransport::new());
    shop.catalog_cache().rebuild(&[serde_json::from_value(json!({"id": 1, "name": "A", "price": 1})).unwrap()]);

    let listing = shop.catalog().load_products().await;
    assert_eq!(listing.failure(), Some("Error al cargar productos."));
    assert_eq!(shop.catalog_cache().read().len(), 1);
}

#[tokio::test]
async fn reservation_failure_leaves_storage_untouched() {
    let (shop, _mock) = shop(MockTransport::new().json(
        Method::Post,
        "/api/reservas",
        400,
        json!("Horario no disponible"),
    ));
    shop.cart_store().increment(&ProductId::new("3"), 2);
    let before = snapshot(shop.cache());

    let form = BookingForm {
        service_id: Some(ServiceId::new("1")),
        email: "ana@correo.mx".into(),
        date: "2025-03-02".into(),
        time: "10:30".into(),
        phone: "5555555555".into(),
        note: String::new(),
    };
    let outcome = shop.booking().submit(&form, today()).await;

    assert!(!outcome.is_confirmed());
    assert!(outcome.message().is_error());
    assert!(outcome
        .message()
        .text
        .starts_with("❌ Error al crear la reserva: "));
    assert_eq!(snapshot(shop.cache()), before);
}

#[tokio::test]
async fn reservation_success_posts_pending_request() {
    let (shop, mock) = shop(MockTransport::new().json(
        Method::Post,
        "/api/reservas",
        201,
        json!({"id": 4, "spaService": {"id": 1, "name": "Facial"}, "estado": "PENDIENTE"}),
    ));

    let form = BookingForm {
        service_id: Some(ServiceId::new("1")),
        email: "ana@correo.mx".into(),
        date: "2025-03-01".into(),
        time: "10:30".into(),
        phone: "5555555555".into(),
        note: "  ".into(),
    };
    let outcome = shop.booking().submit(&form, today()).await;

    assert!(outcome.is_confirmed());
    assert!(outcome.message().text.contains("Facial"));
    let body = mock.requests()[0].json_body().unwrap();
    assert_eq!(body["estado"], "PENDIENTE");
    assert_eq!(body["usuario"]["correo"], "ana@correo.mx");
    assert_eq!(body["nota"], Value::Null);
}

#[tokio::test]
async fn booking_validation_never_reaches_backend() {
    let (shop, mock) = shop(MockTransport::new());
    let form = BookingForm {
        service_id: Some(ServiceId::new("1")),
        email: "ana@correo.mx".into(),
        date: "2025-02-27".into(),
        time: "10:30".into(),
        ..BookingForm::default()
    };

    let outcome = shop.booking().submit(&form, today()).await;
    assert_eq!(
        outcome.message().text,
        "❌ La fecha no puede ser anterior a hoy."
    );
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn admin_guard_removes_non_admin_token() {
    let (shop, mock) = shop(MockTransport::new());
    shop.credentials()
        .set(TokenKind::Admin, &token(json!({"sub": "ana", "role": "USER"})))
        .unwrap();

    let err = shop.admin().list_products().await.unwrap_err();
    assert!(err.needs_login());
    assert!(shop.credentials().get(TokenKind::Admin).unwrap().is_none());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn admin_create_and_delete_report_inline_messages() {
    let (shop, mock) = shop(
        MockTransport::new()
            .json(Method::Post, "/api/products", 403, json!("forbidden"))
            .json(Method::Delete, "/api/products/5", 204, json!(null))
            .json(Method::Get, "/api/products", 200, json!([])),
    );
    let admin_token = token(json!({"sub": "root", "authorities": [{"authority": "ROLE_ADMIN"}]}));
    shop.credentials().set(TokenKind::Admin, &admin_token).unwrap();
    let admin = shop.admin();

    let product = NewProduct {
        name: "Crema".into(),
        price: 120.0,
        stock: 3,
        description: "Hidratante".into(),
        contenido: "50 ml".into(),
        image_url: String::new(),
        category: CategoryRef {
            id: CategoryId::new("1"),
            name: None,
        },
    };
    let created = admin.create_product(&product).await.unwrap();
    assert!(created.is_error());
    assert_eq!(created.text, ADMIN_CREATE_FAILED);

    let deleted = admin.delete_product(&ProductId::new("5")).await.unwrap();
    assert!(!deleted.is_error());

    let listing = admin.list_products().await.unwrap();
    assert_eq!(listing.ready().map(Vec::len), Some(0));
    let expected = format!("Bearer {}", admin_token);
    assert!(mock
        .requests()
        .iter()
        .all(|r| r.header_value("Authorization") == Some(expected.as_str())));
}

#[tokio::test]
async fn profile_regions_fail_independently() {
    let (shop, _mock) = shop(
        MockTransport::new()
            .json(
                Method::Get,
                "/api/usuarios/me",
                200,
                json!({"id": 12, "username": "ana", "email": "ana@correo.mx"}),
            )
            .json(Method::Get, "/api/reservas/mias", 500, json!("down"))
            .json(
                Method::Get,
                "/api/orders/mine",
                200,
                json!([{"id": 1, "fechaCreacion": "2025-01-02", "total": 99.5, "estado": "PAGADA"}]),
            ),
    );
    shop.credentials().set(TokenKind::Shopper, "tok").unwrap();

    let view = shop.profile().load().await.unwrap();
    assert!(!view.session_expired());
    assert_eq!(view.user.ready().unwrap().display_name(), "ana");
    assert_eq!(view.reservations.failure(), Some("Error al cargar reservas."));
    assert_eq!(view.orders.ready().map(Vec::len), Some(1));
    assert_eq!(shop.cache().get_raw("userId").unwrap().as_deref(), Some("12"));

    shop.profile().logout().unwrap();
    assert!(shop.credentials().get(TokenKind::Shopper).unwrap().is_none());
    assert!(shop.cache().get_raw("userId").unwrap().is_none());
}

#[tokio::test]
async fn profile_requires_token() {
    let (shop, mock) = shop(MockTransport::new());
    let err = shop.profile().load().await.unwrap_err();
    assert!(err.needs_login());
    assert!(mock.requests().is_empty());
}

use aggregate_fetch::mock::MockHttpClient;
use aggregate_fetch::{CrudClient, Method};
use serde_json::json;
use site_client::clients::{CategoryClient, GstRateClient, ProductClient, ReviewClient};
use site_client::config::SiteConfig;
use site_client::error::AdminError;
use site_client::lifecycle::SiteSystem;
use site_client::model::{
    CategoryId, CategoryUpsert, GstRateUpsert, ProductCreate, ProductId, ProductUpdate, ReviewId, ReviewUpsert,
    SettingsId, SettingsUpsert,
};
use std::sync::Arc;

#[tokio::test]
async fn test_product_lifecycle() {
    let mut mock = MockHttpClient::new();
    mock.expect(Method::Post, "/products").return_ok(json!({
        "success": true,
        "message": "Product created",
        "data": { "id": 12, "name": "Hybrid inverter", "category_id": 3, "price": 42000.0 }
    }));
    mock.expect(Method::Put, "/products/12").return_ok(json!({
        "success": true,
        "data": { "id": 12, "name": "Hybrid inverter", "category_id": 3, "price": 39999.0 }
    }));
    mock.expect(Method::Patch, "/products/12/toggle-status").return_ok(json!({
        "success": true,
        "data": { "id": 12, "name": "Hybrid inverter", "price": 39999.0, "is_active": false }
    }));
    mock.expect(Method::Delete, "/products/12").return_ok(json!({ "success": true, "message": "Deleted" }));

    let client = ProductClient::new(Arc::new(mock.clone()));

    let created = client
        .create_product(ProductCreate {
            name: "Hybrid inverter".into(),
            category_id: CategoryId(3),
            gst_rate_id: None,
            price: 42000.0,
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, ProductId(12));
    assert_eq!(created.category_id, Some(CategoryId(3)));

    let updated = client
        .update_product(
            ProductId(12),
            ProductUpdate {
                price: Some(39999.0),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 39999.0);

    let toggled = client.toggle_status(ProductId(12)).await.unwrap();
    assert!(!toggled.is_active);

    client.delete(ProductId(12)).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[1].body, Some(json!({ "price": 39999.0 })));
    mock.verify();
}

#[tokio::test]
async fn test_invalid_input_never_reaches_backend() {
    let mock = MockHttpClient::new();
    let products = ProductClient::new(Arc::new(mock.clone()));
    let reviews = ReviewClient::new(Arc::new(mock.clone()));
    let rates = GstRateClient::new(Arc::new(mock.clone()));

    let err = products
        .create_product(ProductCreate {
            name: "  ".into(),
            category_id: CategoryId(1),
            gst_rate_id: None,
            price: 10.0,
            description: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidInput(_)));

    let err = reviews
        .update_review(
            ReviewId(1),
            ReviewUpsert {
                customer_name: "Ravi".into(),
                service: None,
                rating: 9,
                comment: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidInput(_)));

    let err = rates
        .create_rate(GstRateUpsert { name: None, rate: 120.0 })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidInput(_)));

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_backend_validation_errors() {
    let mut mock = MockHttpClient::new();
    mock.expect(Method::Post, "/categories").return_ok(json!({
        "success": false,
        "message": "The given data was invalid.",
        "errors": { "name": ["The name has already been taken."] }
    }));

    let client = CategoryClient::new(Arc::new(mock));
    let err = client
        .create_category(CategoryUpsert {
            name: "Panels".into(),
            description: None,
        })
        .await
        .unwrap_err();

    match err {
        AdminError::Validation { message, fields } => {
            assert_eq!(message, "The given data was invalid.");
            assert_eq!(fields["name"], vec!["The name has already been taken.".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_active_rates_sorted() {
    let mut mock = MockHttpClient::new();
    mock.expect_get("/gst-rates").return_ok(json!({
        "success": true,
        "data": [
            { "id": 1, "rate": 18.0 },
            { "id": 2, "rate": 5.0 },
            { "id": 3, "rate": 28.0, "is_active": false },
            { "id": 4, "rate": 12.0 }
        ]
    }));

    let client = GstRateClient::new(Arc::new(mock));
    let rates: Vec<f64> = client
        .active_rates()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.rate)
        .collect();
    assert_eq!(rates, vec![5.0, 12.0, 18.0]);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let mut mock = MockHttpClient::new();
    mock.expect_get("/categories").return_status(503);

    let client = CategoryClient::new(Arc::new(mock));
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, AdminError::Unavailable(_)));
}

#[tokio::test]
async fn test_site_settings_through_system() {
    let mut mock = MockHttpClient::new();
    mock.expect(Method::Put, "/site-settings/1").return_ok(json!({
        "success": true,
        "data": {
            "id": 1,
            "site_name": "Solar Co",
            "email": "hello@solar.test",
            "social_links": { "instagram": "https://instagram.com/solarco" }
        }
    }));
    mock.expect_get("/site-settings").return_ok(json!({
        "success": true,
        "data": [{ "id": 1, "site_name": "Solar Co" }]
    }));

    let system = SiteSystem::with_client(Arc::new(mock.clone()), &SiteConfig::new("https://api.test")).unwrap();

    let updated = system
        .settings
        .update_settings(
            SettingsId(1),
            SettingsUpsert {
                email: Some("hello@solar.test".into()),
                ..SettingsUpsert::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, Some(SettingsId(1)));
    assert_eq!(updated.site_name.as_deref(), Some("Solar Co"));
    assert_eq!(updated.social_links["instagram"], "https://instagram.com/solarco");

    let all = system.settings.list().await.unwrap();
    assert_eq!(all.len(), 1);

    let err = system
        .settings
        .update_settings(
            SettingsId(1),
            SettingsUpsert {
                email: Some("not-an-email".into()),
                ..SettingsUpsert::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::InvalidInput(_)));

    assert_eq!(mock.calls()[0].body, Some(json!({ "email": "hello@solar.test" })));
    system.shutdown().await.unwrap();
    mock.verify();
}

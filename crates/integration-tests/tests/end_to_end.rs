//! Admin changes as seen by the public catalog.

use av_store_core::Category;
use av_store_integration_tests::{TestContext, section};
use axum::http::StatusCode;

fn wears(html: &str) -> &str {
    section(html, "id=\"wears-grid\"", "</section>")
}

fn drinks(html: &str) -> &str {
    section(html, "id=\"drinks-grid\"", "</section>")
}

#[tokio::test]
async fn test_product_lifecycle() {
    let mut ctx = TestContext::new().await;
    ctx.login().await;

    // Create
    let response = ctx.save_product("Cap", "wear", "15").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let products = ctx.stored_products().await;
    assert_eq!(products.len(), 1);
    let id = products.first().unwrap().id.clone();

    let catalog = ctx.storefront_get("/").await.body;
    assert!(wears(&catalog).contains("Cap"));
    assert!(wears(&catalog).contains("₦15.00"));
    assert!(drinks(&catalog).contains("No drinks yet. Check back soon."));

    // Edit to drink
    ctx.admin_post_form(&format!("/products/{id}/edit"), &[])
        .await;
    ctx.save_product("Cap", "drink", "15").await;

    let products = ctx.stored_products().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().unwrap().id, id);
    assert_eq!(products.first().unwrap().category, Category::Drink);

    let catalog = ctx.storefront_get("/").await.body;
    assert!(drinks(&catalog).contains("Cap"));
    assert!(!wears(&catalog).contains("Cap"));
    assert!(wears(&catalog).contains("No wears yet. Check back soon."));

    // Unpublish hides it from the catalog only
    ctx.admin_post_form(&format!("/products/{id}/toggle"), &[])
        .await;
    let catalog = ctx.storefront_get("/").await.body;
    assert!(!catalog.contains("Cap"));
    assert!(ctx.admin_get("/").await.body.contains("Cap"));

    ctx.admin_post_form(&format!("/products/{id}/toggle"), &[])
        .await;
    assert!(ctx.storefront_get("/").await.body.contains("Cap"));

    // Confirmed delete
    ctx.admin_post_form(&format!("/products/{id}/delete"), &[("confirm", "yes")])
        .await;
    assert!(ctx.stored_products().await.is_empty());
    assert!(!ctx.storefront_get("/").await.body.contains("Cap"));

    let panel = ctx.admin_get("/").await;
    assert!(!panel.body.contains("Cap"));
    assert!(panel.body.contains("No products yet."));
}

#[tokio::test]
async fn test_catalog_reads_latest_state_on_every_request() {
    let mut ctx = TestContext::new().await;
    ctx.login().await;

    assert!(ctx.storefront_get("/").await.body.contains("No wears yet."));
    ctx.save_product("Hat", "wear", "9.5").await;
    assert!(ctx.storefront_get("/").await.body.contains("₦9.50"));
}

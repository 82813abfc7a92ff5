//! Admin edits flowing through the settings store to the public site.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use brand_mappers_core::content::HeroSection;
use brand_mappers_core::store::{SettingKey, SettingsStore};
use brand_mappers_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn hero_body(headline: &str) -> Value {
    json!({
        "content": {
            "badge": "Since 2016",
            "headline": headline,
            "tagline": "Stands, events, and print.",
            "ctaText": "Talk to us",
            "ctaSecondaryText": "See the work"
        },
        "stats": [
            { "value": "6000+", "label": "Projects Delivered" }
        ]
    })
}

#[tokio::test]
async fn test_site_renders_defaults_when_nothing_is_stored() {
    let ctx = TestContext::new().await;

    let resp = TestContext::client().get(ctx.site("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("GROW BIGGER."));
    assert!(body.contains("5000+"));
}

#[tokio::test]
async fn test_hero_edit_shows_on_site() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .put(ctx.admin("/api/sections/hero"))
        .json(&hero_body("BIGGER STANDS.\nBOLDER BRANDS."))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let saved: Value = resp.json().await.unwrap();
    assert_eq!(saved["success"], true);

    let body = TestContext::client()
        .get(ctx.site("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("BIGGER STANDS."));
    assert!(body.contains("BOLDER BRANDS."));
    assert!(body.contains("6000+"));
    assert!(!body.contains("GROW BIGGER."));

    // Both keys of the section were written
    let stored = ctx
        .settings
        .select(&[SettingKey::HeroContent, SettingKey::HeroStats])
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_editor_api_returns_what_was_saved() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    admin
        .put(ctx.admin("/api/sections/hero"))
        .json(&hero_body("ONE LINE"))
        .send()
        .await
        .unwrap();

    let loaded: HeroSection = admin
        .get(ctx.admin("/api/sections/hero"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loaded.content.headline, "ONE LINE");
    assert_eq!(loaded.stats.len(), 1);
}

#[tokio::test]
async fn test_invalid_section_is_rejected_and_site_unchanged() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    // Wrong shape
    let resp = admin
        .put(ctx.admin("/api/sections/hero"))
        .json(&json!({ "content": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Right shape, failing validation
    let resp = admin
        .put(ctx.admin("/api/sections/hero"))
        .json(&hero_body("   "))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid content");

    assert!(ctx.settings.list().await.unwrap().is_empty());
    let page = TestContext::client()
        .get(ctx.site("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("GROW BIGGER."));
}

#[tokio::test]
async fn test_unknown_section_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .get(ctx.admin("/api/sections/pricing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_theme_colors_reach_stylesheet() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let mut theme: Value = admin
        .get(ctx.admin("/api/sections/theme"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    theme["colors"]["primary"] = json!("#12ab34");

    let resp = admin
        .put(ctx.admin("/api/sections/theme"))
        .json(&theme)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let css = TestContext::client()
        .get(ctx.site("/theme.css"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(css.contains("--color-primary: #12ab34;"));
}

#[tokio::test]
async fn test_malformed_stored_value_degrades_to_default() {
    let ctx = TestContext::new().await;
    ctx.settings
        .upsert(SettingKey::HeroContent, json!({ "headline": 42 }))
        .await
        .unwrap();

    let resp = TestContext::client().get(ctx.site("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("GROW BIGGER."));
}

#[tokio::test]
async fn test_repeated_query_parameters_still_render_home() {
    let ctx = TestContext::new().await;

    let resp = TestContext::client()
        .get(ctx.site("/?category=Events&category=Exhibitions&notice=access-denied&notice=x"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("GROW BIGGER."));
    assert!(body.contains("Access Denied"));
}

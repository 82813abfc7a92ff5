//! Upload validation, blob storage, and the hero video.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use brand_mappers_core::store::{SettingKey, SettingsStore};
use brand_mappers_integration_tests::TestContext;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

fn file_form(name: &str, mime: &str, bytes: Vec<u8>) -> Form {
    let part = Part::bytes(bytes)
        .file_name(name.to_string())
        .mime_str(mime)
        .unwrap();
    Form::new().part("file", part)
}

#[tokio::test]
async fn test_image_upload_returns_public_url() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .post(ctx.admin("/api/uploads/clients"))
        .multipart(file_form("logo.png", "image/png", vec![0x89, b'P', b'N', b'G']))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Image uploaded");
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://blobs.test/clients/"));
    assert!(url.ends_with(".png"));

    let stored = ctx.blobs.uploads().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content_type, "image/png");
    assert_eq!(stored[0].size, 4);
}

#[tokio::test]
async fn test_wrong_type_never_reaches_blob_store() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .post(ctx.admin("/api/uploads/news"))
        .multipart(file_form("notes.pdf", "application/pdf", b"%PDF".to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["description"], "Please select an image file");

    let resp = admin
        .post(ctx.admin("/api/hero/video"))
        .multipart(file_form("still.jpg", "image/jpeg", vec![1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["description"], "Please select a video file");

    assert!(ctx.blobs.uploads().await.is_empty());
}

#[tokio::test]
async fn test_unknown_folder_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .post(ctx.admin("/api/uploads/secrets"))
        .multipart(file_form("a.png", "image/png", vec![1]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(ctx.blobs.uploads().await.is_empty());
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let ctx = TestContext::new().await;

    let resp = TestContext::client()
        .post(ctx.admin("/api/uploads/clients"))
        .multipart(file_form("a.png", "image/png", vec![1]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.blobs.uploads().await.is_empty());
}

#[tokio::test]
async fn test_hero_video_upload_shows_on_site() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .post(ctx.admin("/api/hero/video"))
        .multipart(file_form("reel.mp4", "video/mp4", vec![0; 64]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Hero video updated");
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://blobs.test/videos/"));

    let page = TestContext::client()
        .get(ctx.site("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let file_name = url.rsplit('/').next().unwrap();
    assert!(page.contains(file_name));
    assert!(!page.contains("hero-video.mp4"));
}

#[tokio::test]
async fn test_rejected_blob_write_keeps_previous_video() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;
    ctx.blobs.set_rejecting(true);

    let resp = admin
        .post(ctx.admin("/api/hero/video"))
        .multipart(file_form("reel.mp4", "video/mp4", vec![0; 64]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Upload failed");

    let stored = ctx.settings.select(&[SettingKey::HeroVideo]).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_failed_hero_video_save_removes_uploaded_object() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;
    ctx.settings.set_read_only(true);

    let resp = admin
        .post(ctx.admin("/api/hero/video"))
        .multipart(file_form("reel.mp4", "video/mp4", vec![0; 64]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Error saving");

    assert!(ctx.blobs.uploads().await.is_empty());
}

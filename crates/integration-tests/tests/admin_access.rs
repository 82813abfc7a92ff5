//! Sign-in, the admin route guard, and admin management.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use brand_mappers_admin::db::IdentityStore;
use brand_mappers_core::AppRole;
use brand_mappers_integration_tests::{TestContext, location};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_unauthenticated_page_redirects_to_auth() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    for path in ["/", "/hero", "/users"] {
        let resp = client.get(ctx.admin(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp), "/auth", "{path}");
    }
}

#[tokio::test]
async fn test_unauthenticated_api_is_unauthorized() {
    let ctx = TestContext::new().await;

    let resp = TestContext::client()
        .put(ctx.admin("/api/sections/hero"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Not signed in");
}

#[tokio::test]
async fn test_non_admin_is_sent_to_site_with_notice() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.sign_up(&client, "visitor@brand-mappers.test").await;
    let resp = ctx.sign_in(&client, "visitor@brand-mappers.test").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = client.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert_eq!(target, ctx.site("/?notice=access-denied"));

    let page = client.get(target).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("Access Denied"));

    let api = client
        .get(ctx.admin("/api/sections/hero"))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_sign_up_does_not_sign_in() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    let resp = ctx.sign_up(&client, "new@brand-mappers.test").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("If this email is valid"));

    let resp = client.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(location(&resp), "/auth");
}

#[tokio::test]
async fn test_wrong_password_shows_generic_error() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.sign_up(&client, "nour@brand-mappers.test").await;

    let resp = client
        .post(ctx.admin("/auth/login"))
        .form(&[("email", "nour@brand-mappers.test"), ("password", "not it at all")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.text()
            .await
            .unwrap()
            .contains("Invalid email or password. Please try again.")
    );
}

#[tokio::test]
async fn test_admin_reaches_dashboard_and_can_sign_out() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("nour@brand-mappers.test"));

    let resp = admin.get(ctx.admin("/auth")).send().await.unwrap();
    assert_eq!(location(&resp), "/");

    let resp = admin.post(ctx.admin("/auth/logout")).send().await.unwrap();
    assert_eq!(location(&resp), "/auth");

    let resp = admin.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(location(&resp), "/auth");
}

#[tokio::test]
async fn test_revoked_admin_loses_access_mid_session() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let grant = ctx.identities.list_grants(AppRole::Admin).await.unwrap()[0].clone();
    ctx.identities.revoke_grant(grant.id).await.unwrap();

    let resp = admin.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), ctx.site("/?notice=access-denied"));
}

#[tokio::test]
async fn test_role_lookup_failure_denies_access() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    ctx.identities.set_role_lookup_down(true);
    let resp = admin
        .get(ctx.admin("/api/sections/hero"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_and_remove_admin() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;
    ctx.sign_up(&TestContext::client(), "omar@brand-mappers.test")
        .await;

    let resp = admin
        .post(ctx.admin("/api/users"))
        .json(&json!({ "email": "OMAR@brand-mappers.test" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Admin added");

    let page = admin.get(ctx.admin("/users")).send().await.unwrap();
    assert!(page.text().await.unwrap().contains("omar@brand-mappers.test"));

    let again = admin
        .post(ctx.admin("/api/users"))
        .json(&json!({ "email": "omar@brand-mappers.test" }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let grants = ctx.identities.list_grants(AppRole::Admin).await.unwrap();
    let omar = grants
        .iter()
        .find(|g| g.email.as_str() == "omar@brand-mappers.test")
        .unwrap();
    let resp = admin
        .delete(ctx.admin(&format!("/api/users/{}", omar.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.identities.list_grants(AppRole::Admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;

    let resp = admin
        .post(ctx.admin("/api/users"))
        .json(&json!({ "email": "ghost@brand-mappers.test" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_admin_cannot_remove_themselves() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_client("nour@brand-mappers.test").await;
    let own = ctx.identities.list_grants(AppRole::Admin).await.unwrap()[0].clone();

    let resp = admin
        .delete(ctx.admin(&format!("/api/users/{}", own.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Cannot remove yourself");
}

//! Integration tests for Brand Mappers.
//!
//! Each test starts the site and the admin dashboard on ephemeral ports,
//! backed by one shared in-memory settings store, and drives them over HTTP
//! with a cookie-keeping client. No database or external service is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brand-mappers-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `content_flow` - Admin edits showing up on the public site
//! - `admin_access` - Sign-in, the route guard, and admin management
//! - `admin_uploads` - Upload validation and the hero video

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use brand_mappers_admin::db::{IdentityStore, InMemoryIdentityStore};
use brand_mappers_admin::middleware::session::signing_key;
use brand_mappers_admin::middleware::create_session_layer;
use brand_mappers_admin::services::InMemoryBlobStore;
use brand_mappers_core::store::{ContentStore, InMemorySettingsStore, SettingsStore};
use brand_mappers_core::{AppRole, Email};
use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

/// Password used for every account the tests create.
pub const PASSWORD: &str = "correct horse battery";

/// Running site and dashboard sharing one settings store.
pub struct TestContext {
    pub site_url: String,
    pub admin_url: String,
    pub settings: Arc<InMemorySettingsStore>,
    pub identities: Arc<InMemoryIdentityStore>,
    pub blobs: Arc<InMemoryBlobStore>,
}

impl TestContext {
    /// Start both servers.
    ///
    /// # Panics
    ///
    /// Panics if a listener cannot be bound.
    pub async fn new() -> Self {
        let settings = Arc::new(InMemorySettingsStore::new());
        let identities = Arc::new(InMemoryIdentityStore::new());
        let blobs = Arc::new(InMemoryBlobStore::new());

        let site_state = brand_mappers_site::state::AppState::new(
            ContentStore::new(settings.clone() as Arc<dyn SettingsStore>),
            None,
            Email::parse("hello@brand-mappers.test").expect("valid inbox"),
        );
        let site = brand_mappers_site::routes::routes().with_state(site_state);
        let site_url = spawn(site).await;

        let admin_state = brand_mappers_admin::state::AppState::new(
            ContentStore::new(settings.clone() as Arc<dyn SettingsStore>),
            identities.clone(),
            blobs.clone(),
            site_url.clone(),
        );
        let secret = SecretString::from("k".repeat(64));
        let key = signing_key(&secret).expect("64-byte key");
        let sessions = create_session_layer(MemoryStore::default(), false, key);
        let admin_url = spawn(brand_mappers_admin::app(admin_state, sessions)).await;

        Self {
            site_url,
            admin_url,
            settings,
            identities,
            blobs,
        }
    }

    /// A fresh client with its own cookie jar that does not follow redirects.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Full dashboard URL for `path`.
    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Full site URL for `path`.
    #[must_use]
    pub fn site(&self, path: &str) -> String {
        format!("{}{path}", self.site_url)
    }

    /// Register an account through the sign-up form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn sign_up(&self, client: &Client, email: &str) -> Response {
        client
            .post(self.admin("/auth/register"))
            .form(&[("email", email), ("password", PASSWORD)])
            .send()
            .await
            .expect("sign-up request")
    }

    /// Sign in through the login form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn sign_in(&self, client: &Client, email: &str) -> Response {
        client
            .post(self.admin("/auth/login"))
            .form(&[("email", email), ("password", PASSWORD)])
            .send()
            .await
            .expect("sign-in request")
    }

    /// Grant the admin role directly in the identity store.
    ///
    /// # Panics
    ///
    /// Panics if the account does not exist.
    pub async fn make_admin(&self, email: &str) {
        let email = Email::parse(email).expect("valid email");
        let user = self
            .identities
            .find_user_by_email(&email)
            .await
            .expect("lookup")
            .expect("account exists");
        self.identities
            .grant_role(user.id, AppRole::Admin)
            .await
            .expect("grant");
    }

    /// Client signed in as a freshly created admin.
    pub async fn admin_client(&self, email: &str) -> Client {
        let client = Self::client();
        self.sign_up(&client, email).await;
        self.make_admin(email).await;
        let resp = self.sign_in(&client, email).await;
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
        client
    }
}

/// `Location` header of a redirect.
///
/// # Panics
///
/// Panics if the response has no `Location`.
#[must_use]
pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect location")
        .to_string()
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("server");
    });
    format!("http://{addr}")
}

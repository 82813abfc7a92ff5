//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// The dashboard needs both stores: settings to edit and identities to
/// sign in. Returns 503 if either is unreachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let (settings, identities) = tokio::join!(
        state.content().settings().ping(),
        state.identities().ping(),
    );

    if let Err(e) = settings {
        tracing::warn!(error = %e, "Readiness check failed: settings store");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    if let Err(e) = identities {
        tracing::warn!(error = %e, "Readiness check failed: identity store");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use brand_mappers_core::store::{ContentStore, InMemorySettingsStore};

    use super::*;
    use crate::db::InMemoryIdentityStore;
    use crate::services::InMemoryBlobStore;

    #[tokio::test]
    async fn test_ready_with_in_memory_stores() {
        let state = AppState::new(
            ContentStore::new(Arc::new(InMemorySettingsStore::new())),
            Arc::new(InMemoryIdentityStore::new()),
            Arc::new(InMemoryBlobStore::new()),
            "http://localhost:3000",
        );
        assert_eq!(health().await, "ok");
        assert_eq!(readiness(State(state)).await, StatusCode::OK);
    }
}

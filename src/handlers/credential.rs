use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StoreTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenStatus {
    pub configured: bool,
}

/// Whether a provider token is stored. The token itself is never echoed back.
pub async fn status(State(state): State<AppState>) -> Json<TokenStatus> {
    Json(TokenStatus {
        configured: state.tokens.get().await.is_some(),
    })
}

/// Persist the provider token; an empty token clears it
pub async fn store(
    State(state): State<AppState>,
    Json(payload): Json<StoreTokenRequest>,
) -> AppResult<Json<TokenStatus>> {
    state.tokens.set(&payload.token).await?;

    Ok(Json(TokenStatus {
        configured: state.tokens.get().await.is_some(),
    }))
}

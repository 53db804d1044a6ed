use std::sync::Arc;

use apify_client::ApifyError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use relay_common::{ScrapeRequest, ValidationError};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::AppState;

pub const GREETING: &str = "Hello, World!";
pub const SCRAPE_FAILED: &str = "Error occurred during scraping";
pub const INVALID_REQUEST: &str = "Invalid scrape request";

/// Everything that can go wrong while serving `POST /scrape`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    MalformedBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] ApifyError),
}

impl ScrapeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScrapeError::MalformedBody(_) | ScrapeError::Validation(_) => StatusCode::BAD_REQUEST,
            // Auth, quota and actor failures all surface as a failed scrape.
            ScrapeError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ScrapeError::Remote(_) => SCRAPE_FAILED,
            _ => INVALID_REQUEST,
        };
        (
            status,
            Json(serde_json::json!({
                "success": false,
                "message": message,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

pub async fn home() -> &'static str {
    GREETING
}

pub async fn api_scrape(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ScrapeError> {
    let Json(body) = body.map_err(|e| {
        warn!(error = %e, "Rejected scrape body");
        ScrapeError::MalformedBody(e.body_text())
    })?;

    let req = ScrapeRequest::from_json(body).inspect_err(|e| {
        warn!(error = %e, "Invalid scrape request");
    })?;

    let items = state.scraper.run(&req).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": items,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_map_to_500_with_scrape_message() {
        let err = ScrapeError::from(ApifyError::Auth {
            status: 401,
            message: "invalid token".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Authentication rejected (status 401): invalid token");
    }

    #[test]
    fn validation_errors_map_to_400() {
        let err = ScrapeError::from(ValidationError::Missing("sortBy"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "missing field `sortBy`");
    }
}

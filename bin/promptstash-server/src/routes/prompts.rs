//! Prompt CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use promptstash_types::{CreatePromptRequest, Prompt};

use crate::db::{PromptRecord, PromptStore};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_prompts, create_prompt, delete_prompt))]
pub struct PromptsApi;

/// Register prompt CRUD routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prompts", get(list_prompts).post(create_prompt))
        .route("/prompts/{id}", delete(delete_prompt))
}

fn to_response(r: PromptRecord) -> Prompt {
    Prompt {
        id: r.id,
        content: r.content,
        created_at: r.created_at,
    }
}

/// Pull `content` out of the request body, rejecting blank submissions.
///
/// The body is read as loose JSON rather than a typed extractor so that a
/// missing field, a non-string value, and whitespace-only text all produce
/// the same 400.  Trimming is for validation only; content is stored
/// exactly as submitted.
fn validate_content(body: &serde_json::Value) -> Result<&str, ServerError> {
    match body.get("content").and_then(|v| v.as_str()) {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(ServerError::BadRequest(
            "Content cannot be empty".to_owned(),
        )),
    }
}

/// All saved prompts, newest first.
#[utoipa::path(
    get,
    path = "/api/prompts",
    tag = "prompts",
    responses(
        (status = 200, description = "Every saved prompt, newest first", body = [Prompt])
    )
)]
pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Prompt>>, ServerError> {
    let records = state.store.list_prompts().await?;
    Ok(Json(records.into_iter().map(to_response).collect()))
}

/// Save a new prompt.
#[utoipa::path(
    post,
    path = "/api/prompts",
    tag = "prompts",
    request_body = CreatePromptRequest,
    responses(
        (status = 201, description = "Prompt saved", body = Prompt),
        (status = 400, description = "Missing or blank content")
    )
)]
pub async fn create_prompt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Prompt>), ServerError> {
    let content = validate_content(&body)?;
    let record = state.store.insert_prompt(content).await?;
    info!(id = record.id, "prompt saved");
    Ok((StatusCode::CREATED, Json(to_response(record))))
}

/// Delete a prompt by id.
#[utoipa::path(
    delete,
    path = "/api/prompts/{id}",
    tag = "prompts",
    params(("id" = i64, Path, description = "Prompt id")),
    responses(
        (status = 204, description = "Prompt deleted"),
        (status = 404, description = "No prompt with that id")
    )
)]
pub async fn delete_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    if state.store.delete_prompt(id).await? {
        info!(id, "prompt deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound("Prompt not found".to_owned()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_and_missing_content_are_rejected() {
        for body in [
            json!({}),
            json!({ "content": "" }),
            json!({ "content": "   " }),
            json!({ "content": 7 }),
            json!({ "content": null }),
        ] {
            assert!(validate_content(&body).is_err(), "should reject {body}");
        }
    }

    #[test]
    fn content_survives_validation_untrimmed() {
        let body = json!({ "content": "  padded  " });
        assert_eq!(validate_content(&body).expect("valid"), "  padded  ");
    }
}

//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info, instrument};

use crate::domain::UserProgress;
use crate::progress::{load_user_progress, save_user_progress, ProgressError};
use crate::protocol::{HealthOut, ProgressResponse};
use crate::questions;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_get_math_question() -> impl IntoResponse {
  let q = questions::generate();
  info!(target: "question", topic = %q.topic, difficulty = %q.difficulty, points = q.points, "Math question served");
  Json(q)
}

#[instrument(level = "info", skip(state, body), fields(user_id = %body.user_id))]
pub async fn http_post_save_progress(
  State(state): State<Arc<AppState>>,
  Json(body): Json<UserProgress>,
) -> Result<Json<ProgressResponse>, (StatusCode, Json<ProgressResponse>)> {
  match save_user_progress(&state, &body).await {
    Ok(()) => Ok(Json(ProgressResponse::ok("Progress saved successfully", body))),
    Err(e) => {
      error!(target: "progress", user_id = %body.user_id, error = %e, "HTTP save_progress failed");
      Err(failure_response(&e, "Failed to save progress"))
    }
  }
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, (StatusCode, Json<ProgressResponse>)> {
  match load_user_progress(&state, &user_id).await {
    Ok(progress) => Ok(Json(ProgressResponse::ok("Progress retrieved successfully", progress))),
    Err(e) => {
      error!(target: "progress", %user_id, error = %e, "HTTP get_progress failed");
      Err(failure_response(&e, "Failed to retrieve progress"))
    }
  }
}

/// Shape mismatches in stored data are the caller's 400; everything else is a
/// 500 carrying the operation-specific message.
fn failure_response(e: &ProgressError, server_message: &str) -> (StatusCode, Json<ProgressResponse>) {
  match e {
    ProgressError::Format(_) => (
      StatusCode::BAD_REQUEST,
      Json(ProgressResponse::failure("Invalid progress data format")),
    ),
    _ => (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(ProgressResponse::failure(server_message)),
    ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::{KvStore, MemoryStore, StoreError};
  use serde_json::json;

  fn memory_state() -> (Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (Arc::new(AppState { store: store.clone() }), store)
  }

  #[tokio::test]
  async fn save_then_get_round_trips_through_handlers() {
    let (state, _) = memory_state();
    let record = UserProgress {
      user_id: "alice".into(),
      level: 3,
      score: 70,
      completed_tasks: vec!["t1".into()],
    };

    let saved = http_post_save_progress(State(state.clone()), Json(record.clone()))
      .await
      .unwrap();
    assert!(saved.0.success);
    assert_eq!(saved.0.message, "Progress saved successfully");
    assert_eq!(saved.0.data.as_ref(), Some(&record));

    let got = http_get_progress(State(state), Path("alice".into())).await.unwrap();
    assert!(got.0.success);
    assert_eq!(got.0.message, "Progress retrieved successfully");
    assert_eq!(got.0.data, Some(record));
  }

  #[tokio::test]
  async fn get_for_unknown_user_returns_defaults() {
    let (state, _) = memory_state();
    let got = http_get_progress(State(state), Path("newbie".into())).await.unwrap();
    assert!(got.0.success);
    assert_eq!(got.0.data, Some(UserProgress::default_for("newbie")));
  }

  #[tokio::test]
  async fn malformed_stored_record_maps_to_bad_request() {
    let (state, store) = memory_state();
    store
      .put_json("user_progress_bob", json!({"user_id": "bob", "level": []}))
      .await
      .unwrap();

    let (status, body) = http_get_progress(State(state), Path("bob".into())).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.0.success);
    assert_eq!(body.0.message, "Invalid progress data format");
    assert!(body.0.data.is_none());
  }

  #[test]
  fn storage_failures_map_to_internal_server_error() {
    let err = ProgressError::Store(StoreError::Backend(503));
    let (status, body) = failure_response(&err, "Failed to save progress");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.0.message, "Failed to save progress");
  }
}

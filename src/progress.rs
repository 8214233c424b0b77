//! Per-user progress persistence on top of the key-value backends.
//!
//! One record per user at key `user_progress_{user_id}`. Saves overwrite the
//! whole record (last writer wins, no versioning). Reads synthesize a default
//! record for users that never saved, without persisting it as a side effect.

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::UserProgress;
use crate::state::AppState;
use crate::storage::{KvStore, StoreError};

/// Failures of the progress operations. `Format` is the only client-facing
/// category; everything else is a server-side storage failure.
#[derive(Debug, Error)]
pub enum ProgressError {
  #[error("invalid progress data format: {0}")]
  Format(#[source] serde_json::Error),
  #[error("failed to serialize progress record: {0}")]
  Encode(#[source] serde_json::Error),
  #[error(transparent)]
  Store(#[from] StoreError),
}

pub fn progress_key(user_id: &str) -> String {
  format!("user_progress_{}", user_id)
}

/// Serialize and overwrite the stored record for `progress.user_id`.
#[instrument(level = "info", skip(state, progress), fields(user_id = %progress.user_id))]
pub async fn save_user_progress(state: &AppState, progress: &UserProgress) -> Result<(), ProgressError> {
  let value = serde_json::to_value(progress).map_err(ProgressError::Encode)?;
  state.store.put_json(&progress_key(&progress.user_id), value).await?;
  info!(
    target: "progress",
    user_id = %progress.user_id,
    level = progress.level,
    score = progress.score,
    tasks = progress.completed_tasks.len(),
    "Progress saved"
  );
  Ok(())
}

/// Read the stored record for `user_id`, or synthesize the default one.
#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn load_user_progress(state: &AppState, user_id: &str) -> Result<UserProgress, ProgressError> {
  match state.store.get_json(&progress_key(user_id)).await? {
    Some(value) => {
      let progress: UserProgress = serde_json::from_value(value).map_err(|e| {
        error!(target: "progress", %user_id, error = %e, "Stored progress has an invalid shape");
        ProgressError::Format(e)
      })?;
      info!(target: "progress", %user_id, level = progress.level, score = progress.score, "Progress retrieved");
      Ok(progress)
    }
    None => {
      info!(target: "progress", %user_id, "No stored progress; returning defaults");
      Ok(UserProgress::default_for(user_id))
    }
  }
}

//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::UserProgress;

/// Envelope shared by the progress endpoints. Errors reuse it with
/// `success = false` and no data.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<UserProgress>,
}

impl ProgressResponse {
    pub fn ok(message: impl Into<String>, data: UserProgress) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_null_data_on_failure() {
        let v = serde_json::to_value(ProgressResponse::failure("Failed to save progress")).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["message"], "Failed to save progress");
        assert!(v["data"].is_null());
    }

    #[test]
    fn envelope_echoes_record_on_success() {
        let p = UserProgress::default_for("alice");
        let v = serde_json::to_value(ProgressResponse::ok("Progress saved successfully", p)).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["user_id"], "alice");
        assert_eq!(v["data"]["level"], 1);
        assert_eq!(v["data"]["completed_tasks"], serde_json::json!([]));
    }
}

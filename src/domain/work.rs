// Work submission domain model
use serde::{Deserialize, Serialize};

pub const SUBMISSION_FAILED_ALERT: &str = "⚠️ Error while posting. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSubmission {
    pub title: String,
    pub description: String,
}

/// Backend reply to a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkReply {
    pub status: String,
    pub message: String,
}

impl WorkReply {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Text shown to the user once the backend has answered
    pub fn alert(&self) -> String {
        if self.is_success() {
            format!("✅ {}", self.message)
        } else {
            format!("❌ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text() {
        let reply = WorkReply {
            status: "success".to_string(),
            message: "Posted".to_string(),
        };
        assert_eq!(reply.alert(), "✅ Posted");

        let reply = WorkReply {
            status: "error".to_string(),
            message: "Failed to post. Please try again.".to_string(),
        };
        assert_eq!(reply.alert(), "❌ Failed to post. Please try again.");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_rating, NotificationLevel, ValidationResult};

/// Feedback being composed on the menu page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub text: String,
    rating: u8,
}

impl FeedbackDraft {
    pub fn new(text: impl Into<String>, rating: u8) -> ValidationResult<Self> {
        validate_rating(rating)?;
        Ok(Self {
            text: text.into(),
            rating,
        })
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Set the star rating, 0 meaning "not rated"
    pub fn set_rating(&mut self, rating: u8) -> ValidationResult<()> {
        validate_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.rating = 0;
    }
}

/// Body of `POST /feedback`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub canteen_id: String,
    pub feedback: String,
    pub rating: u8,
    pub student_id: Option<String>,
}

impl FeedbackRequest {
    pub fn from_draft(canteen_id: &str, draft: &FeedbackDraft, student_id: Option<String>) -> Self {
        Self {
            canteen_id: canteen_id.to_string(),
            feedback: draft.text.clone(),
            rating: draft.rating,
            student_id,
        }
    }
}

/// Toast shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

use std::sync::Arc;
use tracing::{error, instrument, warn};

use crate::models::{
    FeedbackDraft, FeedbackRequest, Notification, ServiceResult, Validate,
};
use crate::repositories::MenuRepository;

pub const FEEDBACK_SUBMITTED: &str = "Feedback Submitted!";
pub const FEEDBACK_MISSING: &str = "Please provide your feedback and rating before submitting.";
pub const FEEDBACK_FAILED: &str = "Failed to submit feedback. Please try again.";

/// Validates feedback drafts and, when persistence is enabled, posts them to the backend
pub struct FeedbackService {
    repository: Arc<dyn MenuRepository>,
    persist: bool,
    student_id: Option<String>,
}

impl FeedbackService {
    /// Accept-and-clear only; nothing is sent to the backend
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self {
            repository,
            persist: false,
            student_id: None,
        }
    }

    /// Post accepted feedback to `POST /feedback` before clearing the draft
    pub fn with_persistence(repository: Arc<dyn MenuRepository>, student_id: Option<String>) -> Self {
        Self {
            repository,
            persist: true,
            student_id,
        }
    }

    pub fn persists(&self) -> bool {
        self.persist
    }

    /// Submit `draft` for `canteen_id`.
    ///
    /// The draft is cleared only when the submission is accepted; on any
    /// rejection it is left exactly as the user wrote it.
    #[instrument(skip(self, draft), fields(canteen_id = %canteen_id, rating = draft.rating(), persist = self.persist))]
    pub async fn submit(&self, canteen_id: &str, draft: &mut FeedbackDraft) -> Notification {
        if let Err(e) = draft.validate() {
            warn!(error = %e, "Feedback rejected");
            return Notification::error(FEEDBACK_MISSING);
        }

        if self.persist {
            let request = FeedbackRequest::from_draft(canteen_id, draft, self.student_id.clone());
            if let Err(e) = self.store(&request).await {
                error!(error = %e, "Error submitting feedback");
                return Notification::error(FEEDBACK_FAILED);
            }
        }

        draft.clear();
        crate::info_with_trace!("Feedback accepted");
        Notification::success(FEEDBACK_SUBMITTED)
    }

    async fn store(&self, request: &FeedbackRequest) -> ServiceResult<()> {
        request.validate()?;
        self.repository.submit_feedback(request).await?;
        Ok(())
    }
}

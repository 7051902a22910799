use super::{FeedbackDraft, FeedbackRequest, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MIN_RATING: u8 = 0;
pub const MAX_RATING: u8 = 5;
pub const MAX_CANTEEN_ID_LENGTH: usize = 100;
pub const MAX_RECIPE_ID_LENGTH: usize = 64;

impl Validate for FeedbackDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_rating(self.rating())?;
        validate_feedback(&self.text, self.rating())
    }
}

impl Validate for FeedbackRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_canteen_id(&self.canteen_id)?;
        validate_rating(self.rating)?;
        validate_feedback(&self.feedback, self.rating)
    }
}

/// Reject feedback only when both the comment and the rating are missing.
///
/// A rating without a comment, or a comment without a rating, is accepted.
pub fn validate_feedback(text: &str, rating: u8) -> ValidationResult<()> {
    if text.trim().is_empty() && rating == 0 {
        return Err(ValidationError::EmptyFeedback);
    }

    Ok(())
}

/// Validate a star rating, 0 meaning "not rated"
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if rating > MAX_RATING {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING.to_string(),
            max: MAX_RATING.to_string(),
            value: rating.to_string(),
        });
    }

    Ok(())
}

/// Validate canteen identifier
pub fn validate_canteen_id(canteen_id: &str) -> ValidationResult<()> {
    let trimmed = canteen_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "canteen_id".to_string(),
        });
    }

    if trimmed.len() > MAX_CANTEEN_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "canteen_id".to_string(),
            max_length: MAX_CANTEEN_ID_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidValue {
            field: "canteen_id".to_string(),
            value: canteen_id.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate recipe identifier used with the recipe lookup service
pub fn validate_recipe_id(recipe_id: &str) -> ValidationResult<()> {
    let trimmed = recipe_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "recipe_id".to_string(),
        });
    }

    if trimmed.len() > MAX_RECIPE_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "recipe_id".to_string(),
            max_length: MAX_RECIPE_ID_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidValue {
            field: "recipe_id".to_string(),
            value: recipe_id.to_string(),
            reason: "Recipe ID must contain only alphanumeric characters, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

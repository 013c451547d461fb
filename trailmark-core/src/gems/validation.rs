//! Field checks applied to gem submissions before duplicate detection.

use thiserror::Error;

use super::GemSubmission;
use crate::CoordinateError;
use crate::poi::{validate_latitude, validate_longitude};

/// Minimum trimmed length of a gem name, in characters.
pub const MIN_NAME_CHARS: usize = 3;
/// Minimum trimmed length of a gem description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// A single problem with a [`GemSubmission`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GemValidationError {
    /// The name was blank.
    #[error("gem name is required")]
    MissingName,
    /// The name was shorter than [`MIN_NAME_CHARS`].
    #[error("gem name must be at least {min} characters", min = MIN_NAME_CHARS)]
    NameTooShort,
    /// The description was blank.
    #[error("description is required")]
    MissingDescription,
    /// The description was shorter than [`MIN_DESCRIPTION_CHARS`].
    #[error("description must be at least {min} characters", min = MIN_DESCRIPTION_CHARS)]
    DescriptionTooShort,
    /// Latitude or longitude was out of range.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// Collect every problem with `submission`, in field order.
///
/// An empty vector means the submission is acceptable.
#[must_use]
pub fn validate_submission(submission: &GemSubmission) -> Vec<GemValidationError> {
    let mut errors = Vec::new();
    if let Some(err) = check_text(
        &submission.name,
        MIN_NAME_CHARS,
        GemValidationError::MissingName,
        GemValidationError::NameTooShort,
    ) {
        errors.push(err);
    }
    if let Some(err) = check_text(
        &submission.description,
        MIN_DESCRIPTION_CHARS,
        GemValidationError::MissingDescription,
        GemValidationError::DescriptionTooShort,
    ) {
        errors.push(err);
    }
    if let Err(err) = validate_latitude(submission.latitude) {
        errors.push(err.into());
    }
    if let Err(err) = validate_longitude(submission.longitude) {
        errors.push(err.into());
    }
    errors
}

fn check_text(
    value: &str,
    min_chars: usize,
    missing: GemValidationError,
    too_short: GemValidationError,
) -> Option<GemValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(missing)
    } else if trimmed.chars().count() < min_chars {
        Some(too_short)
    } else {
        None
    }
}

//! Deterministic fixtures shared by unit and behaviour tests.

use geo::Coord;

use crate::proximity::destination_point;
use crate::{Catalog, MessageError, MessageProvider, PointOfInterest, builtin};

/// The six-target Kerala catalog used across test suites.
#[must_use]
pub fn sample_catalog() -> Catalog {
    builtin::kerala_tour()
}

/// Return the coordinate `distance` metres due north of `target`.
#[must_use]
pub fn offset_north(target: &PointOfInterest, distance: f64) -> Coord<f64> {
    destination_point(target.location(), 0.0, distance)
}

/// `MessageProvider` that always returns the same text.
#[derive(Debug, Clone, Default)]
pub struct FixedMessageProvider {
    text: String,
}

impl FixedMessageProvider {
    /// Create a provider answering with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl MessageProvider for FixedMessageProvider {
    fn describe(&self, _target: &PointOfInterest) -> Result<String, MessageError> {
        Ok(self.text.clone())
    }
}

/// `MessageProvider` that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingMessageProvider {
    error: MessageError,
}

impl FailingMessageProvider {
    /// Create a provider failing with `error`.
    #[must_use]
    pub const fn new(error: MessageError) -> Self {
        Self { error }
    }
}

impl Default for FailingMessageProvider {
    fn default() -> Self {
        Self::new(MessageError::TimedOut)
    }
}

impl MessageProvider for FailingMessageProvider {
    fn describe(&self, _target: &PointOfInterest) -> Result<String, MessageError> {
        Err(self.error.clone())
    }
}

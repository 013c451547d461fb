//! Descriptive messages shown alongside a target.
//!
//! Messages are cosmetic. A [`MessageProvider`] may call out to an external
//! service, but its failure never changes a check-in decision:
//! [`describe_or_fallback`] swallows errors and substitutes
//! [`FALLBACK_MESSAGE`].

use log::warn;
use thiserror::Error;

use crate::PointOfInterest;

/// Text shown when no provider message is available.
pub const FALLBACK_MESSAGE: &str =
    "A new adventure awaits! Get ready to explore this amazing spot.";

/// Errors reported by a [`MessageProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The provider could not be reached or refused the request.
    #[error("message provider unavailable: {reason}")]
    Unavailable {
        /// Provider-specific explanation.
        reason: String,
    },
    /// The provider did not answer in time.
    #[error("message provider timed out")]
    TimedOut,
    /// The provider answered without usable text.
    #[error("message provider returned no text")]
    Empty,
}

/// Produce a short, friendly description for a target.
///
/// Implementations must be `Send + Sync` so a single provider can serve
/// several sessions.
///
/// # Examples
///
/// ```rust
/// use trailmark_core::{MessageError, MessageProvider, PointOfInterest};
///
/// struct Shouty;
///
/// impl MessageProvider for Shouty {
///     fn describe(&self, target: &PointOfInterest) -> Result<String, MessageError> {
///         Ok(format!("GO TO {}!", target.name().to_uppercase()))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let poi = PointOfInterest::new(1, "Thekkady", 9.5939, 77.1025, 1000.0, 45)?;
/// assert_eq!(Shouty.describe(&poi)?, "GO TO THEKKADY!");
/// # Ok(())
/// # }
/// ```
pub trait MessageProvider: Send + Sync {
    /// Return a message about `target`.
    fn describe(&self, target: &PointOfInterest) -> Result<String, MessageError>;
}

impl<P: MessageProvider + ?Sized> MessageProvider for Box<P> {
    fn describe(&self, target: &PointOfInterest) -> Result<String, MessageError> {
        (**self).describe(target)
    }
}

/// Ask `provider` for a message, falling back to [`FALLBACK_MESSAGE`].
///
/// Errors and blank responses are logged at `warn` and replaced.
///
/// # Examples
/// ```
/// use trailmark_core::{
///     FALLBACK_MESSAGE, MessageError, MessageProvider, PointOfInterest, describe_or_fallback,
/// };
///
/// struct Offline;
///
/// impl MessageProvider for Offline {
///     fn describe(&self, _target: &PointOfInterest) -> Result<String, MessageError> {
///         Err(MessageError::TimedOut)
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let poi = PointOfInterest::new(1, "Thekkady", 9.5939, 77.1025, 1000.0, 45)?;
/// assert_eq!(describe_or_fallback(&Offline, &poi), FALLBACK_MESSAGE);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn describe_or_fallback<P>(provider: &P, target: &PointOfInterest) -> String
where
    P: MessageProvider + ?Sized,
{
    match provider.describe(target) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("message provider returned blank text for {}", target.name());
            FALLBACK_MESSAGE.to_owned()
        }
        Err(err) => {
            warn!("message provider failed for {}: {err}", target.name());
            FALLBACK_MESSAGE.to_owned()
        }
    }
}

/// Offline provider that fills a fixed template with the target's details.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateMessageProvider;

impl MessageProvider for TemplateMessageProvider {
    fn describe(&self, target: &PointOfInterest) -> Result<String, MessageError> {
        Ok(format!(
            "Next stop: {}! Get within {:.0} m to earn {} points.",
            target.name(),
            target.radius_meters(),
            target.points()
        ))
    }
}

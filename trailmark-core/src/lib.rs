//! Core domain types for the Trailmark check-in engine.
//!
//! A [`Catalog`] holds the fixed set of [`PointOfInterest`] targets a player
//! can visit. The [`proximity`] module measures great-circle distances and
//! decides whether a candidate position falls inside a target's radius, and a
//! [`RewardSession`] tracks which targets have been checked into and the score
//! earned so far.
//!
//! Nothing in this crate performs I/O. Catalog loading, gem persistence and
//! interactive play live in sibling crates; descriptive messages are supplied
//! through the [`MessageProvider`] seam and always degrade to a fixed fallback.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use trailmark_core::{RewardSession, builtin};
//!
//! # fn main() -> Result<(), trailmark_core::CheckInError> {
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut session = RewardSession::new(builtin::kerala_tour(), &mut rng);
//! let target = session.current().cloned().expect("catalog is not empty");
//!
//! let outcome = session.attempt_check_in(target.latitude(), target.longitude())?;
//! assert!(outcome.is_accepted());
//! assert_eq!(session.score(), u64::from(target.points()));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod builtin;
mod catalog;
pub mod gems;
mod message;
mod poi;
pub mod proximity;
mod session;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{Catalog, CatalogError};
pub use gems::{GemError, GemRegistry, GemStatus, GemSubmission, HiddenGem};
pub use message::{
    FALLBACK_MESSAGE, MessageError, MessageProvider, TemplateMessageProvider, describe_or_fallback,
};
pub use poi::{CoordinateError, PointOfInterest, PointOfInterestError, validate_coordinate};
pub use proximity::{EARTH_RADIUS_METERS, distance_between, distance_meters, is_within_radius};
#[cfg(feature = "serde")]
pub use session::{RestoreError, SessionSnapshot};
pub use session::{CheckInError, CheckInOutcome, Progress, RewardSession, SessionState};

//! Facade crate for the Trailmark check-in engine.
//!
//! This crate re-exports the core domain types and, behind the `data`
//! feature, the CSV catalog loader and the JSON-backed gem store.

#![forbid(unsafe_code)]

pub use trailmark_core::{
    Catalog, CatalogError, CheckInError, CheckInOutcome, CoordinateError, EARTH_RADIUS_METERS,
    FALLBACK_MESSAGE, GemError, GemRegistry, GemStatus, GemSubmission, HiddenGem, MessageError,
    MessageProvider, PointOfInterest, PointOfInterestError, Progress, RewardSession,
    SessionState, TemplateMessageProvider, builtin, describe_or_fallback, distance_between,
    distance_meters, is_within_radius, proximity, validate_coordinate,
};

#[cfg(feature = "serde")]
pub use trailmark_core::{RestoreError, SessionSnapshot};

#[cfg(feature = "test-support")]
pub use trailmark_core::test_support;

#[cfg(feature = "data")]
pub use trailmark_data::{
    CATALOG_COLUMNS, CatalogLoadError, GemStore, GemStoreError, load_catalog, parse_catalog,
};

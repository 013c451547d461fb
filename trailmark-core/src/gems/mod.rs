//! Crowdsourced "hidden gem" listings.
//!
//! Travellers submit little-known spots with a name, a description and a
//! position. A [`GemRegistry`] validates each [`GemSubmission`], refuses
//! anything that looks like a gem it already holds, and keeps listings
//! newest-first for browsing and search.
//!
//! Two gems count as duplicates when they lie within
//! [`DUPLICATE_RADIUS_METERS`] of each other (boundary inclusive, measured
//! with [`distance_meters`]) or when either lowercase name contains the other.

use chrono::{DateTime, Utc};
use geo::Coord;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::proximity::{distance_meters, is_within_radius};

mod validation;

pub use validation::{
    GemValidationError, MIN_DESCRIPTION_CHARS, MIN_NAME_CHARS, validate_submission,
};

/// Gems closer than this to an existing gem are rejected, in metres.
pub const DUPLICATE_RADIUS_METERS: f64 = 100.0;
/// Uploader recorded when a submission leaves the field blank.
pub const ANONYMOUS_UPLOADER: &str = "anonymous";

/// Moderation state of a gem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum GemStatus {
    /// Awaiting review. Every new submission starts here.
    #[default]
    Pending,
    /// Reviewed and published.
    Approved,
}

impl GemStatus {
    /// Return the status as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for GemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            _ => Err(format!("unknown gem status '{s}'")),
        }
    }
}

/// A published or pending gem.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HiddenGem {
    /// Random identifier assigned on submission.
    pub id: Uuid,
    /// Trimmed display name.
    pub name: String,
    /// Trimmed free-text description.
    pub description: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Who submitted the gem.
    pub uploaded_by: String,
    /// When the gem was accepted into the registry.
    pub submitted_at: DateTime<Utc>,
    /// Moderation state.
    pub status: GemStatus,
}

impl HiddenGem {
    /// Position with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.uploaded_by]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Raw user input for a new gem.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GemSubmission {
    /// Proposed name.
    pub name: String,
    /// Proposed description.
    pub description: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Optional uploader; blank values become [`ANONYMOUS_UPLOADER`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub uploaded_by: Option<String>,
}

/// Errors returned by [`GemRegistry`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GemError {
    /// The submission failed one or more field checks.
    #[error("gem submission is invalid: {}", join_errors(.0))]
    Invalid(Vec<GemValidationError>),
    /// An existing gem is too close or too similarly named.
    #[error("this location/name is too similar to an existing gem: '{existing}'")]
    Duplicate {
        /// Name of the clashing gem.
        existing: String,
    },
    /// No gem carries the requested identifier.
    #[error("no gem with id {id}")]
    UnknownGem {
        /// The requested identifier.
        id: Uuid,
    },
}

fn join_errors(errors: &[GemValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Newest-first collection of hidden gems.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use trailmark_core::{GemError, GemRegistry, GemSubmission};
///
/// let mut registry = GemRegistry::new();
/// let submission = GemSubmission {
///     name: "Secret Waterfall".into(),
///     description: "Hidden behind the old mill".into(),
///     latitude: 40.7589,
///     longitude: -73.9851,
///     uploaded_by: None,
/// };
/// let gem = registry.submit(submission.clone(), Utc::now()).expect("first submission");
/// assert_eq!(gem.uploaded_by, "anonymous");
///
/// let err = registry.submit(submission, Utc::now()).expect_err("duplicate");
/// assert!(matches!(err, GemError::Duplicate { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GemRegistry {
    gems: Vec<HiddenGem>,
}

impl GemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { gems: Vec::new() }
    }

    /// Wrap gems that were loaded from storage, keeping their order.
    #[must_use]
    pub const fn from_gems(gems: Vec<HiddenGem>) -> Self {
        Self { gems }
    }

    /// A registry seeded with the two sample gems shown on first use.
    #[must_use]
    pub fn with_samples() -> Self {
        Self::from_gems(SAMPLE_GEMS.iter().filter_map(SampleGem::build).collect())
    }

    /// All gems, newest first.
    #[must_use]
    pub fn gems(&self) -> &[HiddenGem] {
        &self.gems
    }

    /// Number of gems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gems.len()
    }

    /// Report whether the registry holds no gems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    /// Look up a gem by identifier.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&HiddenGem> {
        self.gems.iter().find(|gem| gem.id == id)
    }

    /// Consume the registry and return its gems.
    #[must_use]
    pub fn into_gems(self) -> Vec<HiddenGem> {
        self.gems
    }

    /// Return the first gem that clashes with `name` at `location`.
    ///
    /// A gem clashes when it lies within `max_distance` metres (inclusive) or
    /// when either lowercase name contains the other.
    #[must_use]
    pub fn find_duplicate(
        &self,
        name: &str,
        location: Coord<f64>,
        max_distance: f64,
    ) -> Option<&HiddenGem> {
        let wanted = name.trim().to_lowercase();
        self.gems.iter().find(|gem| {
            if is_within_radius(distance_meters(location, gem.location()), max_distance) {
                return true;
            }
            let existing = gem.name.trim().to_lowercase();
            !existing.is_empty()
                && !wanted.is_empty()
                && (existing.contains(wanted.as_str()) || wanted.contains(existing.as_str()))
        })
    }

    /// Validate, de-duplicate and insert a new gem at the front.
    ///
    /// Text fields are trimmed and the gem starts as [`GemStatus::Pending`].
    ///
    /// # Errors
    /// [`GemError::Invalid`] listing every failed field check, or
    /// [`GemError::Duplicate`] naming the clashing gem.
    pub fn submit(
        &mut self,
        submission: GemSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<HiddenGem, GemError> {
        let errors = validate_submission(&submission);
        if !errors.is_empty() {
            return Err(GemError::Invalid(errors));
        }

        let name = submission.name.trim().to_owned();
        let location = Coord {
            x: submission.longitude,
            y: submission.latitude,
        };
        if let Some(existing) = self.find_duplicate(&name, location, DUPLICATE_RADIUS_METERS) {
            debug!("rejecting gem {name}: clashes with {}", existing.name);
            return Err(GemError::Duplicate {
                existing: existing.name.clone(),
            });
        }

        let uploaded_by = submission
            .uploaded_by
            .as_deref()
            .map(str::trim)
            .filter(|uploader| !uploader.is_empty())
            .unwrap_or(ANONYMOUS_UPLOADER)
            .to_owned();
        let gem = HiddenGem {
            id: Uuid::new_v4(),
            name,
            description: submission.description.trim().to_owned(),
            latitude: submission.latitude,
            longitude: submission.longitude,
            uploaded_by,
            submitted_at,
            status: GemStatus::Pending,
        };
        info!("accepted gem {} ({}) from {}", gem.name, gem.id, gem.uploaded_by);
        self.gems.insert(0, gem.clone());
        Ok(gem)
    }

    /// Case-insensitive search over name, description and uploader.
    ///
    /// A blank term returns every gem.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&HiddenGem> {
        let needle = term.trim().to_lowercase();
        self.gems
            .iter()
            .filter(|gem| needle.is_empty() || gem.mentions(&needle))
            .collect()
    }

    /// Gems in the given moderation state, newest first.
    pub fn with_status(&self, status: GemStatus) -> impl Iterator<Item = &HiddenGem> + '_ {
        self.gems.iter().filter(move |gem| gem.status == status)
    }

    /// Mark a gem as approved.
    ///
    /// # Errors
    /// [`GemError::UnknownGem`] when no gem has `id`.
    pub fn approve(&mut self, id: Uuid) -> Result<&HiddenGem, GemError> {
        let gem = self
            .gems
            .iter_mut()
            .find(|gem| gem.id == id)
            .ok_or(GemError::UnknownGem { id })?;
        gem.status = GemStatus::Approved;
        info!("approved gem {} ({id})", gem.name);
        Ok(gem)
    }
}

struct SampleGem {
    id: u128,
    name: &'static str,
    description: &'static str,
    latitude: f64,
    longitude: f64,
    uploaded_by: &'static str,
    submitted_at: i64,
    status: GemStatus,
}

impl SampleGem {
    fn build(&self) -> Option<HiddenGem> {
        let submitted_at = DateTime::from_timestamp(self.submitted_at, 0)?;
        Some(HiddenGem {
            id: Uuid::from_u128(self.id),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            latitude: self.latitude,
            longitude: self.longitude,
            uploaded_by: self.uploaded_by.to_owned(),
            submitted_at,
            status: self.status,
        })
    }
}

const SAMPLE_GEMS: [SampleGem; 2] = [
    SampleGem {
        id: 0x5a3f_0c1e_9d2b_4e61_8a07_1f3c_6b2d_0001,
        name: "Secret Waterfall",
        description: "A hidden waterfall behind the old mill, perfect for a peaceful afternoon",
        latitude: 40.7589,
        longitude: -73.9851,
        uploaded_by: "explorer123",
        // 2025-09-26T04:00:00Z
        submitted_at: 1_758_859_200,
        status: GemStatus::Pending,
    },
    SampleGem {
        id: 0x5a3f_0c1e_9d2b_4e61_8a07_1f3c_6b2d_0002,
        name: "Rooftop Garden",
        description: "Beautiful rooftop garden with city views, open to public during weekdays",
        latitude: 40.7614,
        longitude: -73.9776,
        uploaded_by: "citywalker",
        // 2025-09-25T15:30:00Z
        submitted_at: 1_758_814_200,
        status: GemStatus::Approved,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::destination_point;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_759_000_000, 0).expect("valid timestamp")
    }

    #[fixture]
    fn registry() -> GemRegistry {
        GemRegistry::with_samples()
    }

    fn submission(name: &str, latitude: f64, longitude: f64) -> GemSubmission {
        GemSubmission {
            name: name.into(),
            description: "Worth the detour for the view alone".into(),
            latitude,
            longitude,
            uploaded_by: Some("  wanderer  ".into()),
        }
    }

    #[rstest]
    fn samples_are_newest_first(registry: GemRegistry) {
        let names: Vec<&str> = registry.gems().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Secret Waterfall", "Rooftop Garden"]);
        assert!(
            registry
                .gems()
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.submitted_at >= b.submitted_at))
        );
    }

    #[rstest]
    fn accepted_gem_is_trimmed_pending_and_first(
        mut registry: GemRegistry,
        now: DateTime<Utc>,
    ) {
        let gem = registry
            .submit(submission("  Tea Terrace ", 10.0892, 77.0595), now)
            .expect("valid gem");

        assert_eq!(gem.name, "Tea Terrace");
        assert_eq!(gem.uploaded_by, "wanderer");
        assert_eq!(gem.status, GemStatus::Pending);
        assert_eq!(gem.submitted_at, now);
        assert_eq!(registry.gems().first(), Some(&gem));
        assert_eq!(registry.len(), 3);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn blank_uploader_becomes_anonymous(
        mut registry: GemRegistry,
        now: DateTime<Utc>,
        #[case] uploader: Option<String>,
    ) {
        let mut gem = submission("Spice Market", 9.96, 76.24);
        gem.uploaded_by = uploader;
        let stored = registry.submit(gem, now).expect("valid gem");
        assert_eq!(stored.uploaded_by, ANONYMOUS_UPLOADER);
    }

    #[rstest]
    #[case(99.0, true)]
    #[case(101.0, false)]
    fn nearby_gems_are_duplicates(
        registry: GemRegistry,
        #[case] offset: f64,
        #[case] duplicate: bool,
    ) {
        let waterfall = Coord {
            x: -73.9851,
            y: 40.7589,
        };
        let candidate = destination_point(waterfall, 200.0, offset);
        let found = registry.find_duplicate("Completely New Place", candidate, DUPLICATE_RADIUS_METERS);
        assert_eq!(found.is_some(), duplicate);
    }

    #[rstest]
    #[case("secret waterfall")]
    #[case("The Secret Waterfall Trail")]
    #[case("Rooftop")]
    fn similar_names_are_duplicates(
        mut registry: GemRegistry,
        now: DateTime<Utc>,
        #[case] name: &str,
    ) {
        let err = registry
            .submit(submission(name, 9.0, 76.0), now)
            .expect_err("similar name");
        assert!(matches!(err, GemError::Duplicate { .. }), "got {err:?}");
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    fn duplicate_error_names_existing_gem(mut registry: GemRegistry, now: DateTime<Utc>) {
        let err = registry
            .submit(submission("Rooftop Garden Cafe", 9.0, 76.0), now)
            .expect_err("similar name");
        assert_eq!(
            err.to_string(),
            "this location/name is too similar to an existing gem: 'Rooftop Garden'"
        );
    }

    #[rstest]
    fn invalid_submission_lists_every_problem(mut registry: GemRegistry, now: DateTime<Utc>) {
        let bad = GemSubmission {
            name: "ab".into(),
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            uploaded_by: None,
        };
        let err = registry.submit(bad, now).expect_err("invalid");
        assert_eq!(
            err,
            GemError::Invalid(vec![
                GemValidationError::NameTooShort,
                GemValidationError::MissingDescription,
            ])
        );
        assert_eq!(
            err.to_string(),
            "gem submission is invalid: gem name must be at least 3 characters; description is required"
        );
    }

    #[rstest]
    #[case("", 2)]
    #[case("ROOFTOP", 1)]
    #[case("mill", 1)]
    #[case("citywalker", 1)]
    #[case("volcano", 0)]
    fn search_matches_any_text_field(
        registry: GemRegistry,
        #[case] term: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(registry.search(term).len(), expected);
    }

    #[rstest]
    fn approve_updates_status(mut registry: GemRegistry) {
        let id = registry
            .with_status(GemStatus::Pending)
            .next()
            .map(|gem| gem.id)
            .expect("a pending sample");
        registry.approve(id).expect("known gem");
        assert_eq!(registry.with_status(GemStatus::Pending).count(), 0);
        assert_eq!(registry.with_status(GemStatus::Approved).count(), 2);
    }

    #[rstest]
    fn approve_rejects_unknown_id(mut registry: GemRegistry) {
        let err = registry.approve(Uuid::nil()).expect_err("unknown");
        assert_eq!(err, GemError::UnknownGem { id: Uuid::nil() });
    }

    #[rstest]
    #[case("approved", Ok(GemStatus::Approved))]
    #[case(" Pending ", Ok(GemStatus::Pending))]
    fn parses_status(#[case] raw: &str, #[case] expected: Result<GemStatus, String>) {
        assert_eq!(raw.parse::<GemStatus>(), expected);
    }
}

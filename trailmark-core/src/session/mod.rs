//! Reward sessions: the check-in state machine.
//!
//! A [`RewardSession`] offers one target at a time. A successful check-in adds
//! the target's points to the score, marks it visited and clears the offer; the
//! caller then asks for the next target with
//! [`RewardSession::select_next_target`], which lets a UI show the success
//! message before moving on. Once every target is visited the session is
//! [`SessionState::Complete`].
//!
//! Sessions hold no hidden shared state and draw randomness only from the
//! generator passed in, so many sessions can run side by side and a seeded
//! generator replays a game exactly.

use std::collections::BTreeSet;

use geo::Coord;
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::proximity::{distance_meters, is_within_radius};
use crate::{Catalog, PointOfInterest, validate_coordinate};

mod outcome;
#[cfg(feature = "serde")]
mod snapshot;

pub use outcome::{CheckInError, CheckInOutcome};
#[cfg(feature = "serde")]
pub use snapshot::{RestoreError, SessionSnapshot};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// A target is on offer and has not been visited.
    AwaitingTarget,
    /// Unvisited targets remain but none is on offer, either because the
    /// session has not started or because the last offer was just checked
    /// into.
    AwaitingSelection,
    /// Every target has been visited.
    Complete,
}

/// Visited and total target counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Targets checked into so far.
    pub visited: usize,
    /// Targets in the catalog.
    pub total: usize,
}

impl Progress {
    /// Targets still to visit.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total.saturating_sub(self.visited)
    }
}

/// A player's progress through a [`Catalog`].
///
/// `score` always equals the sum of points over `visited`; both only grow
/// until [`RewardSession::reset`].
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use trailmark_core::{CheckInError, RewardSession, SessionState, builtin};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut session = RewardSession::new(builtin::kerala_tour(), &mut rng);
/// assert_eq!(session.state(), SessionState::AwaitingTarget);
///
/// // Far away from every Kerala target.
/// let outcome = session.attempt_check_in(51.5, -0.12).expect("active target");
/// assert!(!outcome.is_accepted());
/// assert_eq!(session.score(), 0);
///
/// assert_eq!(
///     session.attempt_check_in(123.0, 0.0).map(|o| o.is_accepted()),
///     Err(CheckInError::InvalidCoordinate(
///         trailmark_core::CoordinateError::Latitude(123.0)
///     ))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RewardSession {
    catalog: Catalog,
    visited: BTreeSet<u64>,
    score: u64,
    current: Option<usize>,
}

impl RewardSession {
    /// Start a session and offer a random first target.
    ///
    /// An empty catalog yields a session that is already complete.
    pub fn new<R>(catalog: Catalog, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut session = Self::unstarted(catalog);
        session.select_next_target(rng);
        session
    }

    /// Create a session with no target on offer yet.
    ///
    /// Check-ins fail with [`CheckInError::NoActiveTarget`] until
    /// [`RewardSession::select_next_target`] is called.
    #[must_use]
    pub const fn unstarted(catalog: Catalog) -> Self {
        Self {
            catalog,
            visited: BTreeSet::new(),
            score: 0,
            current: None,
        }
    }

    /// Offer a target chosen uniformly from the unvisited ones.
    ///
    /// When nothing is left the offer is cleared and the session becomes
    /// [`SessionState::Complete`]. A single remaining target is always chosen.
    pub fn select_next_target<R>(&mut self, rng: &mut R) -> Option<&PointOfInterest>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<usize> = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, poi)| !self.visited.contains(&poi.id()))
            .map(|(index, _)| index)
            .collect();
        self.current = candidates.choose(rng).copied();
        match self.current() {
            Some(target) => debug!(
                "offering {} ({} of {} remaining)",
                target.name(),
                candidates.len(),
                self.catalog.len()
            ),
            None => info!(
                "all {} targets visited; final score {}",
                self.catalog.len(),
                self.score
            ),
        }
        self.current()
    }

    /// Evaluate a candidate position against the target on offer.
    ///
    /// Inside the radius (inclusive) the target's points are added, the target
    /// is marked visited and the offer is cleared; call
    /// [`RewardSession::select_next_target`] to continue. Outside the radius
    /// nothing changes and the same target stays on offer.
    ///
    /// # Errors
    /// [`CheckInError::NoActiveTarget`] when no target is on offer and
    /// [`CheckInError::InvalidCoordinate`] when the position is out of range.
    /// The session is unchanged in both cases.
    pub fn attempt_check_in(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CheckInOutcome, CheckInError> {
        let target = self
            .current()
            .cloned()
            .ok_or(CheckInError::NoActiveTarget)?;
        let candidate = validate_coordinate(latitude, longitude)?;
        Ok(self.evaluate(target, candidate))
    }

    /// [`RewardSession::attempt_check_in`] for a WGS84 coordinate
    /// (`x = longitude`, `y = latitude`).
    ///
    /// # Errors
    /// Same as [`RewardSession::attempt_check_in`].
    pub fn attempt_check_in_at(
        &mut self,
        candidate: Coord<f64>,
    ) -> Result<CheckInOutcome, CheckInError> {
        self.attempt_check_in(candidate.y, candidate.x)
    }

    /// Forget all progress and offer a fresh random target.
    pub fn reset<R>(&mut self, rng: &mut R) -> Option<&PointOfInterest>
    where
        R: Rng + ?Sized,
    {
        info!(
            "resetting session after {} visits and {} points",
            self.visited.len(),
            self.score
        );
        self.visited.clear();
        self.score = 0;
        self.current = None;
        self.select_next_target(rng)
    }

    fn evaluate(&mut self, target: PointOfInterest, candidate: Coord<f64>) -> CheckInOutcome {
        let distance = distance_meters(candidate, target.location());
        if !is_within_radius(distance, target.radius_meters()) {
            debug!(
                "rejected check-in {distance:.1} m from {} (radius {} m)",
                target.name(),
                target.radius_meters()
            );
            return CheckInOutcome::Rejected {
                target,
                distance_meters: distance,
            };
        }

        let points = target.points();
        self.score = self.score.saturating_add(u64::from(points));
        self.visited.insert(target.id());
        self.current = None;
        info!(
            "checked into {} for {points} points (score {})",
            target.name(),
            self.score
        );
        CheckInOutcome::Accepted {
            target,
            distance_meters: distance,
            points_awarded: points,
        }
    }

    /// The catalog this session draws from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The target on offer, if any.
    #[must_use]
    pub fn current(&self) -> Option<&PointOfInterest> {
        self.current.and_then(|index| self.catalog.as_slice().get(index))
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Identifiers of visited targets.
    #[must_use]
    pub const fn visited(&self) -> &BTreeSet<u64> {
        &self.visited
    }

    /// Number of visited targets.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Report whether the target with `id` has been visited.
    #[must_use]
    pub fn has_visited(&self, id: u64) -> bool {
        self.visited.contains(&id)
    }

    /// Visited and total counts.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            visited: self.visited.len(),
            total: self.catalog.len(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::AwaitingTarget
        } else if self.visited.len() >= self.catalog.len() {
            SessionState::Complete
        } else {
            SessionState::AwaitingSelection
        }
    }

    /// Report whether every target has been visited.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }
}

//! Results and errors produced by check-in attempts.

use thiserror::Error;

use crate::{CoordinateError, PointOfInterest};

/// Result of evaluating a candidate position against the current target.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// The candidate was inside the radius and the reward was granted.
    Accepted {
        /// Target that was checked into.
        target: PointOfInterest,
        /// Measured distance in metres.
        distance_meters: f64,
        /// Points added to the session score.
        points_awarded: u32,
    },
    /// The candidate was too far away; the same target remains active.
    Rejected {
        /// Target that remains active.
        target: PointOfInterest,
        /// Measured distance in metres.
        distance_meters: f64,
    },
}

impl CheckInOutcome {
    /// Report whether the check-in succeeded.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Distance between the candidate and the target, in metres.
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        match self {
            Self::Accepted {
                distance_meters, ..
            }
            | Self::Rejected {
                distance_meters, ..
            } => *distance_meters,
        }
    }

    /// The target the candidate was measured against.
    #[must_use]
    pub const fn target(&self) -> &PointOfInterest {
        match self {
            Self::Accepted { target, .. } | Self::Rejected { target, .. } => target,
        }
    }

    /// Points granted, present only for accepted check-ins.
    #[must_use]
    pub const fn points_awarded(&self) -> Option<u32> {
        match self {
            Self::Accepted { points_awarded, .. } => Some(*points_awarded),
            Self::Rejected { .. } => None,
        }
    }
}

/// Errors returned by [`RewardSession::attempt_check_in`](crate::RewardSession::attempt_check_in).
///
/// Both variants are recoverable and leave the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CheckInError {
    /// The session is complete, or no target has been selected since the last
    /// successful check-in.
    #[error("no active target to check into")]
    NoActiveTarget,
    /// The candidate position was out of range or non-finite.
    #[error("invalid check-in position: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
}

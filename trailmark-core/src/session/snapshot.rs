//! Serialisable session state for callers that persist progress.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RewardSession;
use crate::Catalog;

/// Plain-data copy of a session's progress.
///
/// Targets are referenced by id; the catalog itself is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Identifiers of visited targets.
    pub visited: BTreeSet<u64>,
    /// Accumulated score.
    pub score: u64,
    /// Identifier of the target on offer, if any.
    #[serde(default)]
    pub current: Option<u64>,
}

/// Errors returned by [`RewardSession::restore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// The snapshot references a target missing from the catalog.
    #[error("snapshot references unknown target {id}")]
    UnknownTarget {
        /// The missing identifier.
        id: u64,
    },
    /// The target on offer was already visited.
    #[error("snapshot offers target {id} which is already visited")]
    CurrentAlreadyVisited {
        /// The offending identifier.
        id: u64,
    },
    /// The recorded score disagrees with the visited targets.
    #[error("snapshot score {recorded} does not match visited points {expected}")]
    ScoreMismatch {
        /// Score stored in the snapshot.
        recorded: u64,
        /// Sum of points over the visited targets.
        expected: u64,
    },
}

impl RewardSession {
    /// Capture the session's progress.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            visited: self.visited.clone(),
            score: self.score,
            current: self.current().map(crate::PointOfInterest::id),
        }
    }

    /// Rebuild a session from `snapshot` against `catalog`.
    ///
    /// # Errors
    /// Returns [`RestoreError`] when the snapshot names unknown targets, offers
    /// a visited target, or records a score that differs from the visited
    /// points.
    pub fn restore(catalog: Catalog, snapshot: SessionSnapshot) -> Result<Self, RestoreError> {
        let mut expected: u64 = 0;
        for &id in &snapshot.visited {
            let poi = catalog.get(id).ok_or(RestoreError::UnknownTarget { id })?;
            expected = expected.saturating_add(u64::from(poi.points()));
        }
        if expected != snapshot.score {
            return Err(RestoreError::ScoreMismatch {
                recorded: snapshot.score,
                expected,
            });
        }

        let current = match snapshot.current {
            None => None,
            Some(id) if snapshot.visited.contains(&id) => {
                return Err(RestoreError::CurrentAlreadyVisited { id });
            }
            Some(id) => Some(
                catalog
                    .iter()
                    .position(|poi| poi.id() == id)
                    .ok_or(RestoreError::UnknownTarget { id })?,
            ),
        };

        Ok(Self {
            catalog,
            visited: snapshot.visited,
            score: snapshot.score,
            current,
        })
    }
}

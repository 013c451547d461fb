//! Built-in catalogs bundled with the engine.
//!
//! The Kerala tour is the default catalog for interactive play when no CSV
//! file is supplied.

use log::warn;

use crate::{Catalog, PointOfInterest};

/// `(id, name, latitude, longitude, radius_m, points)` rows for the Kerala tour.
const KERALA_TOUR: [(u64, &str, f64, f64, f64, u32); 6] = [
    (1, "Munnar Hills", 10.0892, 77.0595, 1000.0, 50),
    (2, "Alleppey Backwaters", 9.4981, 76.3388, 1200.0, 40),
    (3, "Fort Kochi", 9.9669, 76.2406, 800.0, 30),
    (4, "Wayanad Wildlife Sanctuary", 11.6054, 76.1320, 1500.0, 60),
    (5, "Kovalam Beach", 8.4004, 76.9787, 500.0, 25),
    (6, "Thekkady", 9.5939, 77.1025, 1000.0, 45),
];

/// Six well-known Kerala destinations worth 250 points in total.
///
/// # Examples
/// ```
/// use trailmark_core::builtin::kerala_tour;
///
/// let catalog = kerala_tour();
/// assert_eq!(catalog.len(), 6);
/// assert_eq!(catalog.total_points(), 250);
/// ```
#[must_use]
pub fn kerala_tour() -> Catalog {
    let pois = KERALA_TOUR
        .iter()
        .filter_map(|&(id, name, lat, lon, radius, points)| {
            PointOfInterest::new(id, name, lat, lon, radius, points)
                .inspect_err(|err| warn!("skipping built-in target: {err}"))
                .ok()
        });
    Catalog::new(pois).unwrap_or_else(|err| {
        warn!("built-in catalog rejected: {err}");
        Catalog::empty()
    })
}

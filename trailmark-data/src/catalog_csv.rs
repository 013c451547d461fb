//! CSV catalog loading.
//!
//! A catalog file starts with a header row naming the columns in
//! [`CATALOG_COLUMNS`]; column order is free and extra columns are ignored.
//! Fields are trimmed and blank lines skipped.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::Deserialize;
use thiserror::Error;
use trailmark_core::{Catalog, CatalogError, PointOfInterest, PointOfInterestError};
use trailmark_fs::open_utf8_file;

/// Columns every catalog file must provide.
pub const CATALOG_COLUMNS: [&str; 6] = ["id", "name", "lat", "lon", "radius_m", "points"];

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be opened.
    #[error("failed to open catalog at {path:?}: {source}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The CSV was malformed or a field had the wrong type.
    #[error("failed to parse catalog CSV: {source}")]
    Parse {
        /// Error reported by the CSV reader.
        #[from]
        source: csv::Error,
    },
    /// A non-blank row had a different number of fields than the header.
    #[error("line {line} has {found} fields but the header names {expected}")]
    FieldCount {
        /// One-based line number of the row.
        line: u64,
        /// Fields in the header row.
        expected: usize,
        /// Fields in the offending row.
        found: usize,
    },
    /// A row parsed but described an invalid target.
    #[error("invalid target on line {line}: {source}")]
    InvalidRecord {
        /// One-based line number of the row.
        line: u64,
        /// Validation failure reported by the core.
        #[source]
        source: PointOfInterestError,
    },
    /// The targets could not form a catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: u64,
    name: String,
    lat: f64,
    lon: f64,
    radius_m: f64,
    points: u32,
}

impl CatalogRow {
    fn into_poi(self, line: u64) -> Result<PointOfInterest, CatalogLoadError> {
        PointOfInterest::new(
            self.id,
            self.name,
            self.lat,
            self.lon,
            self.radius_m,
            self.points,
        )
        .map_err(|source| CatalogLoadError::InvalidRecord { line, source })
    }
}

/// Load a catalog from the CSV file at `path`.
///
/// # Errors
/// [`CatalogLoadError::Open`] when the file is unreadable, otherwise the
/// errors documented on [`parse_catalog`].
pub fn load_catalog(path: &Utf8Path) -> Result<Catalog, CatalogLoadError> {
    let file = open_utf8_file(path).map_err(|source| CatalogLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(file)?;
    info!("loaded {} targets from {path}", catalog.len());
    Ok(catalog)
}

/// Parse a catalog from CSV text.
///
/// # Errors
/// - [`CatalogLoadError::Parse`] for malformed CSV, a missing column or a
///   field that does not parse as its type.
/// - [`CatalogLoadError::FieldCount`] for a row that is too short or too long.
/// - [`CatalogLoadError::InvalidRecord`] for a row with a blank name, an
///   out-of-range coordinate or a non-positive radius.
/// - [`CatalogLoadError::Catalog`] when two rows share an id.
///
/// # Examples
/// ```
/// use trailmark_data::parse_catalog;
///
/// let csv = "id,name,lat,lon,radius_m,points\n1, Fort Kochi ,9.9669,76.2406,800,30\n";
/// let catalog = parse_catalog(csv.as_bytes()).expect("valid catalog");
/// assert_eq!(catalog.get(1).map(|poi| poi.name()), Some("Fort Kochi"));
/// ```
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog, CatalogLoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut pois = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        // Whitespace-only lines trim down to a single empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        pois.push(row_from_record(&record, &headers)?);
    }
    Ok(Catalog::new(pois)?)
}

fn row_from_record(
    record: &StringRecord,
    headers: &StringRecord,
) -> Result<PointOfInterest, CatalogLoadError> {
    let line = record.position().map_or(0, csv::Position::line);
    if record.len() != headers.len() {
        return Err(CatalogLoadError::FieldCount {
            line,
            expected: headers.len(),
            found: record.len(),
        });
    }
    let row: CatalogRow = record.deserialize(Some(headers))?;
    row.into_poi(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "id,name,lat,lon,radius_m,points\n";

    fn parse(body: &str) -> Result<Catalog, CatalogLoadError> {
        parse_catalog(format!("{HEADER}{body}").as_bytes())
    }

    #[rstest]
    fn parses_rows_in_order() {
        let catalog = parse("1,Munnar Hills,10.0892,77.0595,1000,50\n3,Fort Kochi,9.9669,76.2406,800,30\n")
            .expect("valid catalog");
        let ids: Vec<u64> = catalog.iter().map(PointOfInterest::id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(catalog.total_points(), 80);
    }

    #[rstest]
    #[case::empty_lines("\n 2 ,  Alleppey Backwaters , 9.4981 , 76.3388 , 1200 , 40 \n\n")]
    #[case::whitespace_lines("   \n 2 ,  Alleppey Backwaters , 9.4981 , 76.3388 , 1200 , 40 \n \t \n")]
    fn trims_fields_and_skips_blank_lines(#[case] body: &str) {
        let catalog = parse(body).expect("valid catalog");
        assert_eq!(catalog.len(), 1);
        let poi = catalog.get(2).expect("row 2");
        assert_eq!(poi.name(), "Alleppey Backwaters");
        assert_eq!(poi.radius_meters(), 1200.0);
    }

    #[rstest]
    fn whitespace_line_between_rows_is_skipped() {
        let catalog = parse(
            "1,Munnar Hills,10.0892,77.0595,1000,50\n   \n3,Fort Kochi,9.9669,76.2406,800,30\n",
        )
        .expect("valid catalog");
        let ids: Vec<u64> = catalog.iter().map(PointOfInterest::id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[rstest]
    fn accepts_reordered_and_extra_columns() {
        let csv = "name,points,id,district,radius_m,lon,lat\nThekkady,45,6,Idukki,1000,77.1025,9.5939\n";
        let catalog = parse_catalog(csv.as_bytes()).expect("valid catalog");
        let poi = catalog.get(6).expect("row 6");
        assert_eq!(poi.points(), 45);
        assert_eq!(poi.latitude(), 9.5939);
    }

    #[rstest]
    fn header_only_yields_empty_catalog() {
        assert!(parse("").expect("valid catalog").is_empty());
    }

    #[rstest]
    #[case::not_a_number("1,Munnar,north,77.0,1000,50\n")]
    #[case::negative_points("1,Munnar,10.0,77.0,1000,-5\n")]
    fn malformed_rows_are_parse_errors(#[case] body: &str) {
        let err = parse(body).expect_err("malformed row");
        assert!(matches!(err, CatalogLoadError::Parse { .. }), "got {err:?}");
    }

    #[rstest]
    #[case::missing_field("1,Munnar,10.0,77.0,1000\n", 5)]
    #[case::extra_field("1,Munnar,10.0,77.0,1000,50,spare\n", 7)]
    fn rows_of_the_wrong_width_are_rejected(#[case] body: &str, #[case] width: usize) {
        match parse(body).expect_err("wrong width") {
            CatalogLoadError::FieldCount {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 6);
                assert_eq!(found, width);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn missing_column_is_a_parse_error() {
        let err = parse_catalog("id,name,lat,lon,points\n1,Munnar,10.0,77.0,50\n".as_bytes())
            .expect_err("no radius column");
        assert!(matches!(err, CatalogLoadError::Parse { .. }), "got {err:?}");
    }

    #[rstest]
    fn invalid_target_reports_line() {
        let err = parse("1,Munnar,10.0,77.0,1000,50\n2,Nowhere,95.0,77.0,1000,10\n")
            .expect_err("latitude out of range");
        match err {
            CatalogLoadError::InvalidRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let err = parse("1,Munnar,10.0,77.0,1000,50\n1,Kochi,9.9,76.2,800,30\n")
            .expect_err("duplicate id");
        assert!(matches!(
            err,
            CatalogLoadError::Catalog(CatalogError::DuplicateId { id: 1 })
        ));
    }
}

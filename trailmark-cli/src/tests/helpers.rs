//! Test helpers for driving CLI commands against temporary files.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use trailmark_core::{Catalog, PointOfInterest};

/// Temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(path.as_std_path(), contents).expect("write workspace file");
        path
    }
}

/// CSV for a two-target catalog: Munnar Hills (id 1) and Fort Kochi (id 3).
pub(super) const TWO_TARGET_CSV: &str = "id,name,lat,lon,radius_m,points\n\
    1,Munnar Hills,10.0892,77.0595,1000,50\n\
    3,Fort Kochi,9.9669,76.2406,800,30\n";

/// A catalog holding only Munnar Hills.
pub(super) fn munnar_only() -> Catalog {
    let munnar = PointOfInterest::new(1, "Munnar Hills", 10.0892, 77.0595, 1000.0, 50)
        .expect("valid target");
    Catalog::new([munnar]).expect("valid catalog")
}

/// Parse `args` as a full command line and run it with `stdin` as input.
///
/// Returns the command result and everything written to stdout.
pub(super) fn run_cli(args: &[&str], stdin: &str) -> (Result<(), CliError>, String) {
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = Cli::try_parse_from(std::iter::once("trailmark").chain(args.iter().copied()))
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| dispatch(cli.command, &mut input, &mut output));
    let stdout = String::from_utf8(output).expect("utf-8 output");
    (result, stdout)
}

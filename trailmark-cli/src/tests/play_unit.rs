//! Focused unit tests covering the interactive play loop.

use super::helpers::{TWO_TARGET_CSV, Workspace, munnar_only};
use crate::play::{InputError, PlayCommand, play_session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use std::io::Cursor;
use trailmark_core::{
    Catalog, FALLBACK_MESSAGE, MessageError, MessageProvider, PointOfInterest,
    TemplateMessageProvider, builtin,
};

struct Offline;

impl MessageProvider for Offline {
    fn describe(&self, _target: &PointOfInterest) -> Result<String, MessageError> {
        Err(MessageError::Unavailable {
            reason: "no network".into(),
        })
    }
}

fn play(catalog: Catalog, provider: &dyn MessageProvider, script: &str) -> (u64, String) {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let score = play_session(catalog, &mut rng, provider, &mut input, &mut output)
        .expect("session runs");
    (score, String::from_utf8(output).expect("utf-8 output"))
}

#[rstest]
#[case("10.0892,77.0595", 10.0892, 77.0595)]
#[case("  10.0892 77.0595 \n", 10.0892, 77.0595)]
#[case("-8.5, -76.25", -8.5, -76.25)]
#[case("9.9\t76.2", 9.9, 76.2)]
fn parses_positions(#[case] line: &str, #[case] latitude: f64, #[case] longitude: f64) {
    assert_eq!(
        PlayCommand::parse(line),
        Ok(PlayCommand::CheckIn {
            latitude,
            longitude
        })
    );
}

#[rstest]
#[case("exit", PlayCommand::Exit)]
#[case(" QUIT\n", PlayCommand::Exit)]
#[case("Reset", PlayCommand::Reset)]
fn parses_keywords(#[case] line: &str, #[case] expected: PlayCommand) {
    assert_eq!(PlayCommand::parse(line), Ok(expected));
}

#[rstest]
#[case("", InputError::Unrecognised)]
#[case("10.0", InputError::Unrecognised)]
#[case("1,2,3", InputError::Unrecognised)]
#[case("north,77", InputError::NotANumber { value: "north".into() })]
fn rejects_garbage(#[case] line: &str, #[case] expected: InputError) {
    assert_eq!(PlayCommand::parse(line), Err(expected));
}

#[rstest]
fn rejected_then_accepted_check_in_completes() {
    let (score, out) = play(
        munnar_only(),
        &TemplateMessageProvider,
        "9.9669,76.2406\n10.0892,77.0595\n",
    );

    assert_eq!(score, 50);
    assert!(out.contains("Target: Munnar Hills (50 points)"), "{out}");
    assert!(out.contains("Not there yet: 90691.7 m from Munnar Hills"), "{out}");
    assert!(out.contains("Checked in at Munnar Hills (0.0 m away). +50 points! Score: 50"), "{out}");
    assert!(out.contains("Congratulations, every target is visited!"), "{out}");
    assert!(out.ends_with("Final score: 50 (1 of 1 targets visited)\n"), "{out}");
}

#[rstest]
fn invalid_input_reprompts_without_changing_score() {
    let (score, out) = play(munnar_only(), &TemplateMessageProvider, "hello\n95,77\nexit\n");

    assert_eq!(score, 0);
    assert!(out.contains("enter a position as 'lat,lon'"), "{out}");
    assert!(out.contains("invalid check-in position"), "{out}");
    assert!(out.ends_with("Final score: 0 (0 of 1 targets visited)\n"), "{out}");
}

#[rstest]
fn end_of_input_stops_the_session() {
    let (score, out) = play(builtin::kerala_tour(), &TemplateMessageProvider, "");
    assert_eq!(score, 0);
    assert!(out.ends_with("Final score: 0 (0 of 6 targets visited)\n"), "{out}");
}

#[rstest]
fn reset_clears_the_score() {
    let catalog = trailmark_data::parse_catalog(TWO_TARGET_CSV.as_bytes()).expect("catalog");
    // Whichever target is offered first, the Munnar position either scores
    // or is rejected; the reset then returns the score to zero.
    let (score, out) = play(
        catalog,
        &TemplateMessageProvider,
        "10.0892,77.0595\nreset\nexit\n",
    );

    assert_eq!(score, 0);
    assert!(out.contains("Progress cleared. Score: 0"), "{out}");
    assert!(out.ends_with("Final score: 0 (0 of 2 targets visited)\n"), "{out}");
}

#[rstest]
fn empty_catalog_finishes_immediately() {
    let (score, out) = play(Catalog::empty(), &TemplateMessageProvider, "10,77\n");
    assert_eq!(score, 0);
    assert!(out.contains("Welcome! 0 targets to find."), "{out}");
    assert!(!out.contains("> "), "{out}");
}

#[rstest]
fn provider_failure_shows_fallback() {
    let (_, out) = play(munnar_only(), &Offline, "exit\n");
    assert!(out.contains(FALLBACK_MESSAGE), "{out}");
}

#[rstest]
fn missing_catalog_file_is_reported() {
    let workspace = Workspace::new();
    let path = workspace.path("absent.csv");
    let (result, _) = super::helpers::run_cli(&["play", "--catalog", path.as_str()], "");
    match result {
        Err(crate::CliError::MissingSourceFile { field, path: missing }) => {
            assert_eq!(field, crate::ARG_CATALOG);
            assert_eq!(missing, path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

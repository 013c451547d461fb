//! Focused unit tests covering layered CLI configuration.

use super::helpers::{Workspace, run_cli};
use super::*;
use crate::gems::store_from_layers_for_test;
use crate::play::config_from_layers_for_test;
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn play_layers_honour_precedence() {
    let workspace = Workspace::new();
    let file_catalog = workspace.path("from-file.csv");
    let env_catalog = workspace.path("from-env.csv");

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "catalog": file_catalog.as_str(), "seed": 1 }),
        None,
    );
    composer.push_environment(json!({ "catalog": env_catalog.as_str() }));
    composer.push_cli(json!({ "seed": 42 }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.catalog, Some(env_catalog));
    assert_eq!(config.seed, Some(42));
}

#[rstest]
fn play_defaults_to_builtin_tour_and_random_seed() {
    let composer = MergeComposer::new();
    let config = config_from_layers_for_test(composer.layers()).expect("empty layers");
    assert_eq!(config.catalog, None);
    assert_eq!(config.seed, None);
    let catalog = config.load_catalog().expect("built-in catalog");
    assert_eq!(catalog.len(), 6);
}

#[rstest]
fn play_layers_map_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "seed": "not a number" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should fail");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn store_path_defaults_when_unset() {
    let composer = MergeComposer::new();
    let path = store_from_layers_for_test(composer.layers()).expect("default store");
    assert_eq!(path, Utf8PathBuf::from(DEFAULT_STORE));
}

#[rstest]
fn store_path_prefers_cli_over_file() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "store": "from-file.json" }), None);
    composer.push_cli(json!({ "store": "from-cli.json" }));
    let path = store_from_layers_for_test(composer.layers()).expect("merged store");
    assert_eq!(path, Utf8PathBuf::from("from-cli.json"));
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let (result, _) = run_cli(&["play", "--catalog", workspace.root().as_str()], "");
    match result {
        Err(CliError::SourcePathNotFile { field, .. }) => assert_eq!(field, ARG_CATALOG),
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn malformed_catalog_is_a_load_error() {
    let workspace = Workspace::new();
    let path = workspace.write("broken.csv", "id,name,lat,lon,radius_m,points\n1,Nowhere,95,0,10,5\n");
    let (result, _) = run_cli(&["play", "--catalog", path.as_str()], "");
    match result {
        Err(CliError::LoadCatalog(_)) => {}
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn unknown_subcommand_is_an_argument_error() {
    let (result, out) = run_cli(&["teleport"], "");
    assert!(out.is_empty());
    match result {
        Err(CliError::ArgumentParsing(_)) => {}
        other => panic!("unexpected result {other:?}"),
    }
}

//! Hidden gem commands for the Trailmark CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use trailmark_core::{GemSubmission, HiddenGem};
use trailmark_data::GemStore;

use crate::{ARG_STORE, CliError, DEFAULT_STORE, say};

/// CLI arguments for the `gems` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct GemsArgs {
    #[command(subcommand)]
    pub(crate) command: GemsCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum GemsCommand {
    /// Submit a new hidden gem for review.
    Add(GemAddArgs),
    /// List gems, newest first, optionally filtered by a search term.
    List(GemListArgs),
}

/// Location of the gem store, layered from flags, environment and files.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[ortho_config(prefix = "TRAILMARK")]
pub(crate) struct StoreArgs {
    /// JSON file holding the gems; created with sample gems when missing.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl StoreArgs {
    pub(crate) fn into_path(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(merged.resolve())
    }

    fn resolve(self) -> Utf8PathBuf {
        self.store.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STORE))
    }
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub(crate) struct GemAddArgs {
    /// Name of the gem (at least 3 characters).
    #[arg(long)]
    pub(crate) name: String,
    /// What makes the place special (at least 10 characters).
    #[arg(long)]
    pub(crate) description: String,
    /// Latitude in decimal degrees.
    #[arg(long = "lat")]
    pub(crate) latitude: f64,
    /// Longitude in decimal degrees.
    #[arg(long = "lon")]
    pub(crate) longitude: f64,
    /// Who is submitting the gem; defaults to "anonymous".
    #[arg(long)]
    pub(crate) uploaded_by: Option<String>,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

impl GemAddArgs {
    fn submission(&self) -> GemSubmission {
        GemSubmission {
            name: self.name.clone(),
            description: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            uploaded_by: self.uploaded_by.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct GemListArgs {
    /// Only show gems whose name, description or uploader contains this text.
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

pub(crate) fn run_gems(args: GemsArgs, output: &mut dyn Write) -> Result<(), CliError> {
    match args.command {
        GemsCommand::Add(add) => run_add(add, Utc::now(), output),
        GemsCommand::List(list) => run_list(list, output),
    }
}

pub(crate) fn run_add(
    args: GemAddArgs,
    submitted_at: DateTime<Utc>,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let submission = args.submission();
    let path = args.store.into_path()?;
    let mut store = GemStore::open(&path)?;
    let gem = store.submit(submission, submitted_at)?;
    debug!("stored gem {} in {path}", gem.id);
    say(
        output,
        format_args!(
            "Added \"{}\" ({}), {} until reviewed.\n",
            gem.name, gem.id, gem.status
        ),
    )
}

pub(crate) fn run_list(args: GemListArgs, output: &mut dyn Write) -> Result<(), CliError> {
    let path = args.store.into_path()?;
    let store = GemStore::open(&path)?;
    let term = args.search.unwrap_or_default();
    let gems = store.registry().search(&term);
    if gems.is_empty() {
        return say(output, format_args!("No gems found.\n"));
    }
    for gem in gems {
        write_gem(gem, output)?;
    }
    Ok(())
}

fn write_gem(gem: &HiddenGem, output: &mut dyn Write) -> Result<(), CliError> {
    say(
        output,
        format_args!(
            "{} [{}] by {} on {}\n  {:.4}, {:.4}\n  {}\n",
            gem.name,
            gem.status,
            gem.uploaded_by,
            gem.submitted_at.format("%Y-%m-%d"),
            gem.latitude,
            gem.longitude,
            gem.description
        ),
    )
}

#[cfg(test)]
pub(crate) fn store_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<Utf8PathBuf, CliError> {
    let merged = StoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(merged.resolve())
}

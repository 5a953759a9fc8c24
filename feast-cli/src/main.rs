//! # Feast CLI Entry Point
//!
//! The main executable for the Feast CLI. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Sets up logging and parses command-line arguments using [`cli::Cli`].
//! 2. **Configuration**: Builds a `ClientConfig` from the flags, falling back to the environment.
//! 3. **Execution**: Delegates the command to the `feast_sdk` `Client`.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod entities;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands, FeatureSetCommands};
use feast_sdk::client::{Client, Retrieval, RetrievalMode};
use feast_sdk::config::ClientConfig;
use feast_sdk::feature_set::FeatureSet;
use feast_sdk::transport::Service;
use formatter::{FeatureSetList, FormattedString, GenericError};
use serde::Deserialize;
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A definition file holds either one feature set or many.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureSetFile {
    One(FeatureSet),
    Many(Vec<FeatureSet>),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = build_config(&args);
    debug!(
        core_url = config.url(Service::Core),
        serving_url = config.url(Service::Serving),
        "Resolved configuration"
    );
    let client = Client::new(config);

    match args.command {
        Commands::Version => version(&client).await,
        Commands::FeatureSets { sub } => match sub {
            FeatureSetCommands::List => list_feature_sets(&client).await,
            FeatureSetCommands::Describe { name, version } => {
                describe_feature_set(&client, &name, version).await
            }
        },
        Commands::Apply { file } => apply(&client, &file).await,
        Commands::Get {
            entities,
            features,
            batch,
        } => {
            let mode = if batch {
                RetrievalMode::Batch
            } else {
                RetrievalMode::Online
            };
            get(&client, &entities, features, mode).await
        }
    }
}

fn build_config(args: &Cli) -> ClientConfig {
    // clap already resolved the environment fallback
    let mut config = ClientConfig::default();

    if let Some(url) = &args.core_url {
        config = config.with_core_url(url);
    }
    if let Some(url) = &args.serving_url {
        config = config.with_serving_url(url);
    }
    if let Some(timeout) = args.timeout {
        config = config
            .with_connect_timeout(timeout)
            .with_call_timeout(timeout);
    }

    config
}

fn exit_with(err: impl Into<FormattedString>) -> ! {
    eprintln!("{}", err.into());
    process::exit(1);
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|err| exit_with(err))
}

async fn version(client: &Client) {
    println!("{}", FormattedString::from(client.version().await));
}

async fn list_feature_sets(client: &Client) {
    match client.feature_sets().await {
        Ok(feature_sets) => println!("{}", FormattedString::from(FeatureSetList(feature_sets))),
        Err(err) => exit_with(err),
    }
}

async fn describe_feature_set(client: &Client, name: &str, version: i32) {
    match client.get_feature_set(name, version).await {
        Ok(Some(feature_set)) => println!("{}", FormattedString::from(feature_set)),
        Ok(None) => exit_with(GenericError(
            "Feature set not found",
            format!("{name}:{version}"),
        )),
        Err(err) => exit_with(err),
    }
}

async fn apply(client: &Client, path: &Path) {
    let feature_sets = match serde_json::from_str(&read_file(path)) {
        Ok(FeatureSetFile::One(feature_set)) => vec![feature_set],
        Ok(FeatureSetFile::Many(feature_sets)) => feature_sets,
        Err(err) => exit_with(GenericError("Invalid feature set definition", err)),
    };

    match client.apply_all(&feature_sets).await {
        Ok(applied) => {
            for feature_set in applied {
                println!("{}", FormattedString::from(feature_set));
            }
        }
        Err(err) => exit_with(err),
    }
}

async fn get(client: &Client, path: &Path, features: Vec<String>, mode: RetrievalMode) {
    let entities = match entities::parse_entity_table(&read_file(path)) {
        Ok(entities) => entities,
        Err(err) => exit_with(GenericError("Invalid entity file", err)),
    };

    match client.get(&entities, features, mode).await {
        Ok(Retrieval::Online(table)) => {
            println!("{}", FormattedString::from(entities::table_to_json(&table)))
        }
        Ok(Retrieval::Batch(job)) => println!("{}", FormattedString::from(job)),
        Err(err) => exit_with(err),
    }
}

//! # CLI
//!
//! This module defines the command-line interface of `feast` using `clap`.
//!
//! Service URLs can be passed as flags or through the `FEAST_CORE_URL` and `FEAST_SERVING_URL`
//! environment variables.
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "feast", version, about = "Feast feature store CLI")]
pub struct Cli {
    /// Feast Core URL (e.g. localhost:6565)
    #[arg(long, global = true, env = "FEAST_CORE_URL")]
    pub core_url: Option<String>,

    /// Feast Serving URL (e.g. localhost:6566)
    #[arg(long, global = true, env = "FEAST_SERVING_URL")]
    pub serving_url: Option<String>,

    /// Deadline in seconds for connecting and for every call
    #[arg(long, global = true, value_parser = parse_seconds)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the URL and version of Feast Core and Feast Serving
    Version,

    /// Inspect registered feature sets
    #[command(name = "feature-sets")]
    FeatureSets {
        #[command(subcommand)]
        sub: FeatureSetCommands,
    },

    /// Register feature sets with Feast Core
    ///
    /// The file holds one feature set or an array of them.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// feast apply driver.json
    /// ```
    Apply {
        /// Path to the JSON feature set definition
        file: PathBuf,
    },

    /// Retrieve feature values for a set of entities
    ///
    /// Online identifiers look like `driver:1.city`, batch identifiers like `driver:1:city`.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// feast get --entities entities.json --feature driver:1.city --feature driver:1.rating
    /// feast get --entities entities.json --feature driver:1:city --batch
    /// ```
    Get {
        /// Path to the JSON entity table: an array of `{name, dtype, values}` columns
        #[arg(long)]
        entities: PathBuf,

        /// Feature identifier, may be repeated
        #[arg(short, long = "feature", required = true)]
        features: Vec<String>,

        /// Submit a batch retrieval job instead of an online lookup
        #[arg(long)]
        batch: bool,
    },
}

#[derive(Subcommand)]
pub enum FeatureSetCommands {
    /// List every registered feature set
    List,
    /// Show one version of a feature set
    Describe {
        name: String,
        version: i32,
    },
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| format!("Invalid number of seconds '{value}': {e}"))
}

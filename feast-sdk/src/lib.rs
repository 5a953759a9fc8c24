//! # Feast SDK
//!
//! `feast-sdk` is a client library for the Feast feature store. It registers feature sets with
//! **Feast Core** and retrieves feature values from **Feast Serving**, both over gRPC.
//!
//! ## Key Components
//!
//! * **[`Client`](client::Client):** The main entry point. Registration, lookups and both
//!   retrieval modes (online and batch).
//! * **[`marshal`]:** The pure conversion layer between caller tables and wire messages:
//!   feature identifier parsing, the typed value codec, request builders and the response
//!   assembler.
//! * **[`Session`](session::Session):** The gRPC [`Transport`](transport::Transport), holding
//!   one lazily opened channel per service.
//!
//! ## Tables
//!
//! Entity rows go in as an [`EntityTable`](marshal::EntityTable): a table whose first column is
//! a `datetime` timestamp followed by one column per entity key. Online results come back as a
//! [`Table`](marshal::Table) with one `<feature set>.<feature>` column per requested feature.
//! Absent values are explicit [`Cell`](marshal::Cell) states, never sentinels.
//!
//! ## Feature Flags (Internal use only)
//!
//! * `gen-proto`: Enables the binary that regenerates the Feast protocol bindings.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-types` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod client;
pub mod config;
pub mod feature_set;
pub mod grpc;
pub mod job;
pub mod marshal;
pub mod proto;
pub mod session;
pub mod transport;

// Re-exports
pub use prost;
pub use prost_types;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

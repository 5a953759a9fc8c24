//! # Wire Messages
//!
//! Protobuf messages exchanged with Feast Core and Feast Serving.
//!
//! The Rust sources under `generated/` are produced by `tonic-prost-build` from the
//! definitions in `proto/` and checked in, so that building the SDK does not require
//! `protoc`. Regenerate them with:
//!
//! ```bash
//! cargo run -p feast-sdk --features gen-proto --bin generate-feast-protos
//! ```
#![allow(clippy::all)]

pub mod feast {
    pub mod types {
        include!("proto/generated/feast.types.rs");
    }

    pub mod core {
        include!("proto/generated/feast.core.rs");
    }

    pub mod serving {
        include!("proto/generated/feast.serving.rs");
    }
}

pub use feast::types::{NullValue, Value, ValueType, value::Val};

//! # Marshalling
//!
//! Conversion between client-side tabular data and the Feast wire messages.
//!
//! The modules here are pure, synchronous functions of their inputs. They never touch the
//! network and hold no state across calls, so every operation can be retried freely.
//!
//! * [`table`]: The [`Table`] / [`EntityTable`] data model, with explicit [`Cell`] states.
//! * [`value`]: The codec between native [`Scalar`]s and the wire [`Value`](crate::proto::Value).
//! * [`feature_id`]: Parsing of `set:version:feature` identifiers and grouping per feature set.
//! * [`request`]: Builders for the online and batch retrieval requests.
//! * [`response`]: Reassembly of per feature set responses into a single [`Table`].
//!
//! Every error is raised before any partial result is produced.
pub mod feature_id;
pub mod request;
pub mod response;
pub mod table;
pub mod value;

pub use feature_id::{FeatureId, FeatureSetGroup, FeatureSetRequests, IdGrammar};
pub use request::{build_batch_request, build_online_request};
pub use response::{
    DtypeInference, ExplicitSchema, FirstObserved, FirstPresent, ResponseAssembler,
    UNTYPED_COLUMN_DTYPE,
};
pub use table::{Cell, Column, DATETIME_COLUMN, Dtype, EntityTable, Scalar, Table};
pub use value::ValueKind;

/// Errors raised while building requests or assembling responses.
///
/// None of them are retryable: they point at bad caller input or at a response that does not
/// match the request it answers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
    #[error("Malformed feature identifier '{id}': {reason}")]
    MalformedFeatureIdentifier { id: String, reason: &'static str },
    #[error("Unsupported value type '{0}'")]
    UnsupportedValueType(Dtype),
    #[error(
        "Feature data set '{feature_set}' has {actual} rows but the entity data set has {expected}"
    )]
    RowCountMismatch {
        feature_set: String,
        expected: usize,
        actual: usize,
    },
    #[error("Column '{column}' is declared as {expected} but holds a {found} value")]
    DtypeMismatch {
        column: String,
        expected: Dtype,
        found: Dtype,
    },
    #[error("Cannot encode a {found} value as {expected}")]
    ValueDtypeMismatch { expected: Dtype, found: Dtype },
    #[error("Unable to infer the type of column '{0}'")]
    UndeterminedDtype(String),
    #[error("Invalid entity table: {0}")]
    InvalidEntityTable(String),
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
}

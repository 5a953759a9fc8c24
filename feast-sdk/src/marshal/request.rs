//! # Request Builders
//!
//! Both retrieval requests are built from the same [`EntityTable`] and [`FeatureSetRequests`]:
//!
//! * **Online**: entity keys are sent as a dense dataset, one list of values per row in table
//!   column order. The timestamp is left out by position (it is always column 0).
//! * **Batch**: every row becomes an [`EntityRow`] with its own timestamp and a map of entity
//!   keys. The timestamp column is left out by name.
//!
//! The two exclusions agree for every valid [`EntityTable`], but they are kept as they are since
//! the serving side treats the two shapes independently.
use super::feature_id::FeatureSetRequests;
use super::table::{DATETIME_COLUMN, EntityTable};
use super::{MarshalError, value};
use crate::proto::feast::serving::{
    EntityDataset, EntityDatasetRow, EntityRow, FeatureSetRequest, GetBatchFeaturesRequest,
    GetOnlineFeaturesRequest,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Builds a `GetOnlineFeaturesRequest`.
pub fn build_online_request(
    entities: &EntityTable,
    features: &FeatureSetRequests,
) -> Result<GetOnlineFeaturesRequest, MarshalError> {
    let feature_sets = features
        .groups()
        .iter()
        .map(|group| FeatureSetRequest {
            name: group.name.clone(),
            version: group.version,
            feature_names: group.feature_names.clone(),
            max_age: None,
        })
        .collect();

    let entity_columns = &entities.columns()[1..];

    let rows = (0..entities.row_count())
        .map(|row| {
            let values = entity_columns
                .iter()
                .map(|column| value::encode(&column.cells()[row], column.dtype()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(EntityDatasetRow { values })
        })
        .collect::<Result<Vec<_>, MarshalError>>()?;

    debug!(
        feature_sets = features.len(),
        rows = rows.len(),
        "Built online features request"
    );

    Ok(GetOnlineFeaturesRequest {
        feature_sets,
        entity_dataset: Some(EntityDataset {
            entity_names: entity_columns.iter().map(|c| c.name().to_string()).collect(),
            rows,
        }),
    })
}

/// Builds a `GetBatchFeaturesRequest`, applying `max_age` to every feature set.
pub fn build_batch_request(
    entities: &EntityTable,
    features: &FeatureSetRequests,
    max_age: Duration,
) -> Result<GetBatchFeaturesRequest, MarshalError> {
    let max_age = to_proto_duration(max_age);

    let feature_sets = features
        .groups()
        .iter()
        .map(|group| FeatureSetRequest {
            name: group.name.clone(),
            version: group.version,
            feature_names: group.feature_names.clone(),
            max_age: Some(max_age.clone()),
        })
        .collect();

    let mut entity_rows = Vec::with_capacity(entities.row_count());

    for row in 0..entities.row_count() {
        let mut fields = HashMap::new();

        for column in entities.columns() {
            let cell = &column.cells()[row];

            if !cell.is_present() {
                fields.insert(column.name().to_string(), value::null());
                continue;
            }

            if column.name() == DATETIME_COLUMN {
                continue;
            }

            fields.insert(
                column.name().to_string(),
                value::encode(cell, column.dtype())?,
            );
        }

        entity_rows.push(EntityRow {
            entity_timestamp: entities.timestamp(row).map(to_proto_timestamp),
            fields,
        });
    }

    debug!(
        feature_sets = features.len(),
        rows = entity_rows.len(),
        "Built batch features request"
    );

    Ok(GetBatchFeaturesRequest {
        feature_sets,
        entity_rows,
    })
}

fn to_proto_timestamp(millis: i64) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: millis.div_euclid(1000),
        nanos: (millis.rem_euclid(1000) * 1_000_000) as i32,
    }
}

pub(crate) fn to_proto_duration(duration: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
        nanos: duration.subsec_nanos() as i32,
    }
}

//! # Response Assembly
//!
//! Serving answers an online request with one [`FeatureDataset`] per requested feature set. Row
//! `i` of every dataset answers row `i` of the [`EntityTable`] that was sent, so the datasets
//! are joined purely by position.
//!
//! The columns of a dataset are taken from its **first** row: every field of that row becomes a
//! `<feature set>.<field>` column, and fields that only show up on later rows are ignored. The
//! type of each column is decided by a [`DtypeInference`] strategy, [`FirstPresent`] by default.
//!
//! A column with no value on any row cannot be typed from the response. Unless the strategy
//! still names a type for it, it is typed [`UNTYPED_COLUMN_DTYPE`] and every cell is missing.
use super::MarshalError;
use super::table::{Cell, Column, Dtype, EntityTable, Table};
use super::value::{self, ValueKind};
use crate::proto::Value;
use crate::proto::feast::serving::FeatureDataset;
use std::collections::HashMap;
use tracing::debug;

/// The type given to a column that holds no value on any row.
pub const UNTYPED_COLUMN_DTYPE: Dtype = Dtype::Float64;

/// Decides the type of a response column.
///
/// `values` holds one entry per row: `None` when the row has no value for the column.
pub trait DtypeInference {
    fn infer_dtype(&self, column: &str, values: &[Option<&Value>]) -> Result<Dtype, MarshalError>;
}

/// Takes the type of the first row's value. A first row without a value fails the assembly,
/// unless no row has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstObserved;

impl DtypeInference for FirstObserved {
    fn infer_dtype(&self, column: &str, values: &[Option<&Value>]) -> Result<Dtype, MarshalError> {
        values
            .first()
            .copied()
            .flatten()
            .and_then(ValueKind::of)
            .and_then(ValueKind::dtype)
            .ok_or_else(|| MarshalError::UndeterminedDtype(column.to_string()))
    }
}

/// Takes the type of the first value that is neither unset nor `null`, scanning every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPresent;

impl DtypeInference for FirstPresent {
    fn infer_dtype(&self, column: &str, values: &[Option<&Value>]) -> Result<Dtype, MarshalError> {
        values
            .iter()
            .flatten()
            .find_map(|v| ValueKind::of(v).and_then(ValueKind::dtype))
            .ok_or_else(|| MarshalError::UndeterminedDtype(column.to_string()))
    }
}

/// Looks column types up in a caller supplied schema, keyed by `<feature set>.<field>`.
#[derive(Debug, Clone, Default)]
pub struct ExplicitSchema {
    dtypes: HashMap<String, Dtype>,
}

impl ExplicitSchema {
    pub fn new(dtypes: impl IntoIterator<Item = (String, Dtype)>) -> Self {
        Self {
            dtypes: dtypes.into_iter().collect(),
        }
    }
}

impl DtypeInference for ExplicitSchema {
    fn infer_dtype(&self, column: &str, _values: &[Option<&Value>]) -> Result<Dtype, MarshalError> {
        self.dtypes
            .get(column)
            .copied()
            .ok_or_else(|| MarshalError::UndeterminedDtype(column.to_string()))
    }
}

/// Joins feature datasets into one [`Table`].
pub struct ResponseAssembler {
    inference: Box<dyn DtypeInference + Send + Sync>,
}

impl Default for ResponseAssembler {
    fn default() -> Self {
        Self::new(FirstPresent)
    }
}

impl std::fmt::Debug for ResponseAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseAssembler").finish_non_exhaustive()
    }
}

impl ResponseAssembler {
    pub fn new(inference: impl DtypeInference + Send + Sync + 'static) -> Self {
        Self {
            inference: Box::new(inference),
        }
    }

    /// Builds the result table for `entities` out of `datasets`.
    ///
    /// Every dataset is checked against the entity row count before anything is joined. With
    /// no dataset at all the result is a table without columns spanning every entity row.
    pub fn assemble(
        &self,
        entities: &EntityTable,
        datasets: &[FeatureDataset],
    ) -> Result<Table, MarshalError> {
        let expected = entities.row_count();

        if let Some(dataset) = datasets.iter().find(|d| d.rows.len() != expected) {
            return Err(MarshalError::RowCountMismatch {
                feature_set: dataset.name.clone(),
                expected,
                actual: dataset.rows.len(),
            });
        }

        let mut result = Table::new(expected);
        for dataset in datasets {
            result.extend(self.dataset_table(dataset, expected)?)?;
        }

        debug!(
            datasets = datasets.len(),
            columns = result.columns().len(),
            rows = expected,
            "Assembled feature datasets"
        );

        Ok(result)
    }

    fn dataset_table(&self, dataset: &FeatureDataset, rows: usize) -> Result<Table, MarshalError> {
        let Some(first_row) = dataset.rows.first() else {
            return Ok(Table::new(rows));
        };

        let mut field_names: Vec<&str> = Vec::new();
        for field in &first_row.fields {
            if !field_names.contains(&field.name.as_str()) {
                field_names.push(&field.name);
            }
        }

        let mut table = Table::new(rows);

        for field_name in field_names {
            let column_name = format!("{}.{}", dataset.name, field_name);

            // Outer `None`: the row has no such field. Inner `None`: the field has no value.
            let observed: Vec<Option<Option<&Value>>> = dataset
                .rows
                .iter()
                .map(|row| {
                    row.fields
                        .iter()
                        .find(|f| f.name == field_name)
                        .map(|f| f.value.as_ref())
                })
                .collect();

            let values: Vec<Option<&Value>> = observed.iter().map(|o| o.flatten()).collect();
            let dtype = match self.inference.infer_dtype(&column_name, &values) {
                Ok(dtype) => dtype,
                Err(MarshalError::UndeterminedDtype(_)) if !has_typed_value(&values) => {
                    debug!(column = %column_name, "Column holds no value");
                    UNTYPED_COLUMN_DTYPE
                }
                Err(err) => return Err(err),
            };

            let cells = observed.into_iter().map(|o| match o {
                None => Cell::NotApplicable,
                Some(None) => Cell::Missing,
                Some(Some(value)) => value::decode(value),
            });

            table.push_column(Column::with_cells(column_name, dtype, cells)?)?;
        }

        Ok(table)
    }
}

fn has_typed_value(values: &[Option<&Value>]) -> bool {
    values
        .iter()
        .flatten()
        .any(|v| ValueKind::of(v).and_then(ValueKind::dtype).is_some())
}

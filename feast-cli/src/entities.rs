//! # Entity Files
//!
//! Conversion between the JSON documents the CLI reads and writes and SDK tables.
//!
//! An entity file is an array of columns; the first one must be the `datetime` column, in
//! epoch milliseconds:
//!
//! ```json
//! [
//!   { "name": "datetime", "dtype": "timestamp", "values": [1570000000000] },
//!   { "name": "driver_id", "dtype": "int64", "values": [1001] }
//! ]
//! ```
//!
//! `null` values become missing cells.
use feast_sdk::marshal::{Cell, Column, Dtype, EntityTable, MarshalError, Scalar, Table};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

#[derive(Debug, thiserror::Error)]
pub enum EntityFileError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Value {index} of column '{column}' is not a valid {dtype}")]
    InvalidValue {
        column: String,
        index: usize,
        dtype: Dtype,
    },
    #[error(transparent)]
    Table(#[from] MarshalError),
}

#[derive(Debug, Deserialize)]
struct ColumnFile {
    name: String,
    dtype: Dtype,
    values: Vec<Value>,
}

pub fn parse_entity_table(json: &str) -> Result<EntityTable, EntityFileError> {
    let columns: Vec<ColumnFile> = serde_json::from_str(json)?;

    let columns = columns
        .into_iter()
        .map(|column| {
            let cells = column
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    parse_cell(value, column.dtype).ok_or_else(|| EntityFileError::InvalidValue {
                        column: column.name.clone(),
                        index,
                        dtype: column.dtype,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Column::with_cells(column.name, column.dtype, cells)?)
        })
        .collect::<Result<Vec<_>, EntityFileError>>()?;

    Ok(EntityTable::new(Table::from_columns(columns)?)?)
}

fn parse_cell(value: &Value, dtype: Dtype) -> Option<Cell> {
    if value.is_null() {
        return Some(Cell::Missing);
    }

    let scalar = match dtype {
        Dtype::Int32 => Scalar::Int32(i32::try_from(value.as_i64()?).ok()?),
        Dtype::Int64 => Scalar::Int64(value.as_i64()?),
        Dtype::Float64 => Scalar::Float64(value.as_f64()?),
        Dtype::String => Scalar::String(value.as_str()?.to_string()),
        Dtype::Bool => Scalar::Bool(value.as_bool()?),
        Dtype::Timestamp => Scalar::Timestamp(value.as_i64()?),
        Dtype::Bytes => Scalar::Bytes(
            value
                .as_array()?
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<_>>>()?,
        ),
    };

    Some(Cell::Present(scalar))
}

/// Renders a table as an array of JSON objects, one per row. Keys follow the column order.
pub fn table_to_json(table: &Table) -> Value {
    let rows = (0..table.row_count())
        .map(|row| {
            let object: Map<String, Value> = table
                .columns()
                .iter()
                .map(|column| (column.name().to_string(), cell_to_json(&column.cells()[row])))
                .collect();
            Value::Object(object)
        })
        .collect();

    Value::Array(rows)
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell.as_scalar() {
        None => Value::Null,
        Some(Scalar::Int32(v)) => Value::from(*v),
        Some(Scalar::Int64(v)) | Some(Scalar::Timestamp(v)) => Value::from(*v),
        Some(Scalar::Float64(v)) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
        Some(Scalar::String(v)) => Value::from(v.as_str()),
        Some(Scalar::Bytes(v)) => Value::from(v.clone()),
        Some(Scalar::Bool(v)) => Value::from(*v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_entity_table() {
        let json = r#"[
            { "name": "datetime", "dtype": "timestamp", "values": [1570000000000, 1570000001000] },
            { "name": "driver_id", "dtype": "int64", "values": [1001, null] }
        ]"#;

        let table = parse_entity_table(json).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.timestamp(1), Some(1_570_000_001_000));
        assert_eq!(
            table.entity_columns()[0].cells(),
            &[Cell::present(1001i64), Cell::Missing]
        );
    }

    #[test]
    fn test_invalid_value() {
        let json = r#"[
            { "name": "datetime", "dtype": "timestamp", "values": [1570000000000] },
            { "name": "driver_id", "dtype": "int32", "values": ["1001"] }
        ]"#;

        let err = parse_entity_table(json).unwrap_err();

        assert!(matches!(
            err,
            EntityFileError::InvalidValue { index: 0, dtype: Dtype::Int32, .. }
        ));
    }

    #[test]
    fn test_missing_datetime_column() {
        let json = r#"[{ "name": "driver_id", "dtype": "int64", "values": [1001] }]"#;

        let err = parse_entity_table(json).unwrap_err();

        assert!(matches!(
            err,
            EntityFileError::Table(MarshalError::InvalidEntityTable(_))
        ));
    }

    #[test]
    fn test_table_to_json() {
        let table = Table::from_columns([
            Column::with_cells("driver.city", Dtype::String, [Cell::present("SF"), Cell::Missing])
                .unwrap(),
            Column::with_cells(
                "driver.rating",
                Dtype::Float64,
                [Cell::present(4.5), Cell::NotApplicable],
            )
            .unwrap(),
        ])
        .unwrap();

        assert_eq!(
            table_to_json(&table),
            json!([
                { "driver.city": "SF", "driver.rating": 4.5 },
                { "driver.city": null, "driver.rating": null }
            ])
        );
    }

    #[test]
    fn test_table_to_json_keeps_column_order() {
        let table = Table::from_columns([
            Column::with_cells("rider.trips", Dtype::Int64, [Cell::present(1i64)]).unwrap(),
            Column::with_cells("driver.city", Dtype::String, [Cell::present("SF")]).unwrap(),
        ])
        .unwrap();

        assert_eq!(
            table_to_json(&table).to_string(),
            r#"[{"rider.trips":1,"driver.city":"SF"}]"#
        );
    }
}

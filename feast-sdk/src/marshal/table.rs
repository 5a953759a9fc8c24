//! # Tables
//!
//! A minimal column-oriented table used both for the entity rows a caller sends and for the
//! feature values returned to them.
//!
//! Cells are never represented with sentinel values. A [`Cell`] is either present, explicitly
//! missing (the server or the caller had no value), or not applicable (the row does not carry
//! that column at all).
use super::MarshalError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of the timestamp column every [`EntityTable`] starts with.
pub const DATETIME_COLUMN: &str = "datetime";

/// The native type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Int32,
    Int64,
    Float64,
    String,
    Bytes,
    Bool,
    /// Epoch milliseconds.
    Timestamp,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::String => "string",
            Dtype::Bytes => "bytes",
            Dtype::Bool => "bool",
            Dtype::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A single native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Bool(bool),
    /// Epoch milliseconds.
    Timestamp(i64),
}

impl Scalar {
    pub fn dtype(&self) -> Dtype {
        match self {
            Scalar::Int32(_) => Dtype::Int32,
            Scalar::Int64(_) => Dtype::Int64,
            Scalar::Float64(_) => Dtype::Float64,
            Scalar::String(_) => Dtype::String,
            Scalar::Bytes(_) => Dtype::Bytes,
            Scalar::Bool(_) => Dtype::Bool,
            Scalar::Timestamp(_) => Dtype::Timestamp,
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int32(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int64(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float64(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// The content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Present(Scalar),
    /// The row carries this column but has no value for it.
    Missing,
    /// The row does not carry this column at all.
    NotApplicable,
}

impl Cell {
    pub fn present(value: impl Into<Scalar>) -> Self {
        Cell::Present(value.into())
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Cell::Present(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Cell::Present(scalar) => Some(scalar),
            Cell::Missing | Cell::NotApplicable => None,
        }
    }

    /// The type of the value, `None` for cells without one.
    pub fn dtype(&self) -> Option<Dtype> {
        self.as_scalar().map(Scalar::dtype)
    }
}

impl From<Scalar> for Cell {
    fn from(value: Scalar) -> Self {
        Cell::Present(value)
    }
}

impl From<Option<Scalar>> for Cell {
    fn from(value: Option<Scalar>) -> Self {
        value.map_or(Cell::Missing, Cell::Present)
    }
}

/// A named, typed column. Every present cell matches the column type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: Dtype,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: Dtype) -> Self {
        Self {
            name: name.into(),
            dtype,
            cells: Vec::new(),
        }
    }

    /// Builds a column from existing cells, rejecting any present cell of another type.
    pub fn with_cells(
        name: impl Into<String>,
        dtype: Dtype,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, MarshalError> {
        let mut column = Self::new(name, dtype);
        for cell in cells {
            column.push(cell)?;
        }
        Ok(column)
    }

    pub fn push(&mut self, cell: Cell) -> Result<(), MarshalError> {
        if let Some(found) = cell.dtype()
            && found != self.dtype
        {
            return Err(MarshalError::DtypeMismatch {
                column: self.name.clone(),
                expected: self.dtype,
                found,
            });
        }

        self.cells.push(cell);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered set of equally long columns with unique names.
///
/// The row count is tracked independently so that a table without columns still knows how
/// many rows it spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    row_count: usize,
    columns: Vec<Column>,
}

impl Table {
    /// An empty table spanning `row_count` rows.
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            columns: Vec::new(),
        }
    }

    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self, MarshalError> {
        let mut columns = columns.into_iter().peekable();
        let row_count = columns.peek().map_or(0, Column::len);

        let mut table = Self::new(row_count);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    pub fn push_column(&mut self, column: Column) -> Result<(), MarshalError> {
        if column.len() != self.row_count {
            return Err(MarshalError::RaggedColumn {
                column: column.name,
                expected: self.row_count,
                actual: column.cells.len(),
            });
        }

        if self.column(&column.name).is_some() {
            return Err(MarshalError::DuplicateColumn(column.name));
        }

        self.columns.push(column);
        Ok(())
    }

    /// Appends the columns of `other`, aligning rows purely by position.
    pub fn extend(&mut self, other: Table) -> Result<(), MarshalError> {
        if other.row_count != self.row_count {
            return Err(MarshalError::RaggedColumn {
                column: other.column_names().next().unwrap_or_default().to_string(),
                expected: self.row_count,
                actual: other.row_count,
            });
        }

        let mut seen: HashSet<&str> = self.columns.iter().map(Column::name).collect();
        if let Some(duplicate) = other.columns.iter().find(|c| !seen.insert(c.name())) {
            return Err(MarshalError::DuplicateColumn(duplicate.name.clone()));
        }

        for column in other.columns {
            self.push_column(column)?;
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// The cells of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        (index < self.row_count).then(|| self.columns.iter().map(|c| &c.cells[index]).collect())
    }
}

/// The entity rows of a retrieval request.
///
/// Column 0 is named [`DATETIME_COLUMN`], has type [`Dtype::Timestamp`] and a value on every
/// row. The remaining columns hold entity keys.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTable {
    table: Table,
    timestamps: Vec<i64>,
}

impl EntityTable {
    pub fn new(table: Table) -> Result<Self, MarshalError> {
        let datetime = table
            .columns()
            .first()
            .filter(|c| c.name() == DATETIME_COLUMN)
            .ok_or_else(|| {
                MarshalError::InvalidEntityTable(format!(
                    "the first column should be '{DATETIME_COLUMN}'"
                ))
            })?;

        if datetime.dtype() != Dtype::Timestamp {
            return Err(MarshalError::InvalidEntityTable(format!(
                "column '{DATETIME_COLUMN}' should hold timestamps, found {}",
                datetime.dtype()
            )));
        }

        let timestamps = datetime
            .cells()
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Present(Scalar::Timestamp(millis)) => Ok(*millis),
                _ => Err(MarshalError::InvalidEntityTable(format!(
                    "row {row} has no timestamp"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { table, timestamps })
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Epoch milliseconds of row `index`.
    pub fn timestamp(&self, index: usize) -> Option<i64> {
        self.timestamps.get(index).copied()
    }

    /// Every column, the timestamp column included.
    pub fn columns(&self) -> &[Column] {
        self.table.columns()
    }

    /// The entity key columns, i.e. every column after the timestamp.
    pub fn entity_columns(&self) -> &[Column] {
        &self.table.columns()[1..]
    }

    pub fn as_table(&self) -> &Table {
        &self.table
    }
}

impl TryFrom<Table> for EntityTable {
    type Error = MarshalError;

    fn try_from(table: Table) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

//! Error handling utilities for the filter module
//!
//! This module provides consistent error constructors for the filter module.

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{DemographyError, Result};

/// Create a column not found error
///
/// # Arguments
/// * `column_name` - The name of the column that was not found
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    Err(DemographyError::ColumnNotFound(column_name.to_string()))
}

/// Create a column type error
///
/// # Arguments
/// * `column_name` - The name of the column
/// * `expected_type` - The expected type
pub fn column_type_error<T>(column_name: &str, expected_type: &str) -> Result<T> {
    Err(DemographyError::ColumnType {
        column: column_name.to_string(),
        expected: expected_type.to_string(),
    })
}

/// Look up a column by name
pub fn column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    match batch.column_by_name(column_name) {
        Some(column) => Ok(column),
        None => column_not_found(column_name),
    }
}

/// Look up a Utf8 column by name
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    match column(batch, column_name)?.as_any().downcast_ref::<StringArray>() {
        Some(array) => Ok(array),
        None => column_type_error(column_name, "string"),
    }
}

/// Look up an Int32 column by name
pub fn int32_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int32Array> {
    match column(batch, column_name)?.as_any().downcast_ref::<Int32Array>() {
        Some(array) => Ok(array),
        None => column_type_error(column_name, "int32"),
    }
}

/// Look up an Int64 column by name
pub fn int64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int64Array> {
    match column(batch, column_name)?.as_any().downcast_ref::<Int64Array>() {
        Some(array) => Ok(array),
        None => column_type_error(column_name, "int64"),
    }
}

/// Look up a Float64 column by name
pub fn float64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Float64Array> {
    match column(batch, column_name)?.as_any().downcast_ref::<Float64Array>() {
        Some(array) => Ok(array),
        None => column_type_error(column_name, "float64"),
    }
}

/// Read a non-null string cell, or an empty string for nulls
#[must_use]
pub fn string_at(array: &StringArray, row: usize) -> &str {
    if array.is_null(row) { "" } else { array.value(row) }
}

//! Reshaping filtered tables into chart-ready data

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::filter::error::{column, int32_column, int64_column, string_column};
use crate::schema::{BIRTHS, CATEGORY, DEATHS, VALUE, YEAR};

/// Separator between the two parts of a composite label
pub const LABEL_SEPARATOR: &str = " - ";

/// One point of a line chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// One line of a line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub key: String,
    pub points: Vec<SeriesPoint>,
}

/// One row of the long births/deaths table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    pub year: i32,
    pub category: String,
    pub value: i64,
}

/// Append a Utf8 column `output` holding `"{left} - {right}"` for every row
///
/// Both source columns are rendered through their string representation, so
/// any column type works. Nulls render as empty strings.
pub fn with_composite_label(
    batch: &RecordBatch,
    left: &str,
    right: &str,
    output: &str,
) -> Result<RecordBatch> {
    let left_values = cast(column(batch, left)?, &DataType::Utf8)?;
    let right_values = cast(column(batch, right)?, &DataType::Utf8)?;
    let left_values = as_strings(&left_values, left)?;
    let right_values = as_strings(&right_values, right)?;

    let labels: StringArray = (0..batch.num_rows())
        .map(|i| {
            Some(format!(
                "{}{LABEL_SEPARATOR}{}",
                crate::filter::error::string_at(left_values, i),
                crate::filter::error::string_at(right_values, i)
            ))
        })
        .collect();

    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields.push(Field::new(output, DataType::Utf8, false));

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns.push(Arc::new(labels));

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn as_strings<'a>(array: &'a ArrayRef, name: &str) -> Result<&'a StringArray> {
    match array.as_any().downcast_ref::<StringArray>() {
        Some(strings) => Ok(strings),
        None => crate::filter::error::column_type_error(name, "string"),
    }
}

/// Schema of the long births/deaths table
#[must_use]
pub fn long_births_deaths_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(YEAR, DataType::Int32, false),
        Field::new(CATEGORY, DataType::Utf8, false),
        Field::new(VALUE, DataType::Int64, true),
    ]))
}

/// Reshape the wide births/deaths table into (`Year`, `Category`, `Value`)
///
/// All `Births` rows come first in table order, followed by all `Deaths`
/// rows.
pub fn melt_births_deaths(wide: &RecordBatch) -> Result<RecordBatch> {
    let years = int32_column(wide, YEAR)?;
    let births = int64_column(wide, BIRTHS)?;
    let deaths = int64_column(wide, DEATHS)?;

    let n = wide.num_rows();
    let long_years: Int32Array = years.iter().chain(years.iter()).collect();
    let categories = StringArray::from_iter_values(
        std::iter::repeat_n(BIRTHS, n).chain(std::iter::repeat_n(DEATHS, n)),
    );
    let values: Int64Array = births.iter().chain(deaths.iter()).collect();

    Ok(RecordBatch::try_new(
        long_births_deaths_schema(),
        vec![Arc::new(long_years), Arc::new(categories), Arc::new(values)],
    )?)
}

/// Rows of a long births/deaths table, skipping null values
pub fn category_values(long: &RecordBatch) -> Result<Vec<CategoryValue>> {
    let years = int32_column(long, YEAR)?;
    let categories = string_column(long, CATEGORY)?;
    let values = int64_column(long, VALUE)?;

    Ok((0..long.num_rows())
        .filter(|&i| !values.is_null(i))
        .map(|i| CategoryValue {
            year: years.value(i),
            category: categories.value(i).to_string(),
            value: values.value(i),
        })
        .collect())
}

/// Split a labelled batch into one line per distinct `key` value
///
/// Lines appear in order of first occurrence and points keep table order.
/// Rows with a null `value` are skipped.
pub fn group_series(batch: &RecordBatch, key: &str, value: &str) -> Result<Vec<Series>> {
    let keys = string_column(batch, key)?;
    let years = int32_column(batch, YEAR)?;
    let values = cast(column(batch, value)?, &DataType::Float64)?;
    let Some(values) = values.as_any().downcast_ref::<Float64Array>() else {
        return crate::filter::error::column_type_error(value, "numeric");
    };

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut series: Vec<Series> = Vec::new();

    for i in 0..batch.num_rows() {
        if values.is_null(i) || years.is_null(i) {
            continue;
        }
        let label = crate::filter::error::string_at(keys, i);
        let idx = *index.entry(label).or_insert_with(|| {
            series.push(Series {
                key: label.to_string(),
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[idx].points.push(SeriesPoint {
            year: years.value(i),
            value: values.value(i),
        });
    }

    Ok(series)
}

/// Distinct values of a Utf8 column in order of first occurrence
pub fn distinct_strings(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    Ok(string_column(batch, name)?
        .iter()
        .flatten()
        .unique()
        .map(str::to_string)
        .collect())
}

/// Distinct years in order of first occurrence
pub fn distinct_years(batch: &RecordBatch) -> Result<Vec<i32>> {
    Ok(int32_column(batch, YEAR)?.iter().flatten().unique().collect())
}

/// First and last year present, if any
pub fn year_span(batch: &RecordBatch) -> Result<Option<(i32, i32)>> {
    Ok(int32_column(batch, YEAR)?.iter().flatten().minmax().into_option())
}

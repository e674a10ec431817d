//! Adapting loaded batches to the table schemas.

use arrow::array::ArrayRef;
use arrow::compute::cast;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashSet;

use crate::error::{DemographyError, Result};
use crate::filter::error::string_column;
use crate::schema::{SEX, Sex, TableKind};

/// Adapt a record batch to the schema of `kind`
///
/// Columns are selected by name and reordered; extra columns are dropped.
/// Columns whose type differs from the target (for example an `Int64` year
/// or a float-typed count written by a CSV writer) are cast.
///
/// # Errors
/// Returns a schema error if a target column is missing, or an Arrow error
/// if a cast is impossible.
pub fn adapt_record_batch(batch: &RecordBatch, kind: TableKind) -> Result<RecordBatch> {
    let target_schema = kind.schema();
    let source_schema = batch.schema();
    let mut adapted_columns: Vec<ArrayRef> = Vec::with_capacity(target_schema.fields().len());

    for target_field in target_schema.fields() {
        let field_name = target_field.name();
        let target_type = target_field.data_type();

        let Ok(source_idx) = source_schema.index_of(field_name) else {
            let found = source_schema.fields().iter().map(|f| f.name()).join(", ");
            return Err(DemographyError::schema(
                kind.name(),
                format!("missing column '{field_name}' (found: {found})"),
            ));
        };

        let source_array = batch.column(source_idx);
        if source_array.data_type() == target_type {
            adapted_columns.push(source_array.clone());
        } else {
            debug!(
                "Casting {} column '{field_name}' from {} to {target_type}",
                kind.name(),
                source_array.data_type()
            );
            adapted_columns.push(cast(source_array, target_type)?);
        }
    }

    Ok(RecordBatch::try_new(target_schema, adapted_columns)?)
}

/// Check that no key combination appears twice
///
/// Tables without a unique key always pass.
pub fn check_unique_keys(batch: &RecordBatch, kind: TableKind) -> Result<()> {
    let Some(key_columns) = kind.unique_key() else {
        return Ok(());
    };

    let arrays = key_columns
        .iter()
        .map(|name| crate::filter::error::column(batch, name))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = FxHashSet::default();
    for row in 0..batch.num_rows() {
        let key = arrays
            .iter()
            .map(|array| array_value_to_string(array, row))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if !seen.insert(key.clone()) {
            return Err(DemographyError::DuplicateKey {
                table: kind.name().to_string(),
                key: key.join(" / "),
            });
        }
    }

    Ok(())
}

/// Check that every value of the `Sex` column belongs to [`Sex`]
pub fn check_sex_values(batch: &RecordBatch, kind: TableKind) -> Result<()> {
    if !kind.has_sex() {
        return Ok(());
    }

    let sexes = string_column(batch, SEX)?;
    for value in sexes.iter().flatten().unique() {
        value.parse::<Sex>()?;
    }
    Ok(())
}

//! Core filtering functionality for the demographic tables
//!
//! This module defines the filter trait and the mask application shared by
//! every filter in the crate.

use std::collections::HashSet;

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch as arrow_filter_record_batch;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;

/// Filter a record batch based on a boolean mask
///
/// Rows keep their relative order. Null mask entries drop the row.
///
/// # Errors
/// Returns an error if the mask length differs from the batch row count
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ))
        .into());
    }

    Ok(arrow_filter_record_batch(batch, mask)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    ///
    /// # Errors
    /// Returns an error if filtering fails
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<String>;
}

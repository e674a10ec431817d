//! Leading causes of death for one year, sex and age at death

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::error::Result;
use crate::filter::error::{int64_column, string_column};
use crate::filter::{BatchFilter, SelectionFilter};
use crate::schema::{AGE_AT_DEATH, CAUSE, DEATHS, SEX, Sex, TOTAL_ALL_CAUSES, YEAR};

/// Marker appended to truncated labels
pub const ELLIPSIS: &str = "...";

/// One bar of the causes-of-death chart
///
/// `cause` is the full name and `deaths` the sort key; `label` is only for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseOfDeath {
    pub cause: String,
    pub label: String,
    pub deaths: i64,
}

/// Shorten `label` to `width` characters plus [`ELLIPSIS`] if it is longer
#[must_use]
pub fn truncate_label(label: &str, width: usize) -> String {
    match label.char_indices().nth(width) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &label[..cut]),
        None => label.to_string(),
    }
}

/// The `limit` causes with the most deaths, excluding the all-causes total
///
/// Sorting is stable, so equal counts keep table order. Rows with a null
/// count are dropped. An empty selection yields an empty list.
pub fn top_causes(
    causes: &RecordBatch,
    year: i32,
    sex: Sex,
    age_at_death: &str,
    limit: usize,
    label_width: usize,
) -> Result<Vec<CauseOfDeath>> {
    let rows = SelectionFilter::requiring(&[YEAR, SEX, AGE_AT_DEATH])
        .eq(YEAR, year)
        .eq(SEX, sex)
        .eq(AGE_AT_DEATH, age_at_death)
        .excluding(CAUSE, [TOTAL_ALL_CAUSES])
        .filter(causes)?;
    let names = string_column(&rows, CAUSE)?;
    let deaths = int64_column(&rows, DEATHS)?;

    let mut ranked: Vec<(usize, i64)> = (0..rows.num_rows())
        .filter(|&i| !deaths.is_null(i) && !names.is_null(i))
        .map(|i| (i, deaths.value(i)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .into_iter()
        .take(limit)
        .map(|(i, count)| {
            let cause = names.value(i);
            CauseOfDeath {
                cause: cause.to_string(),
                label: truncate_label(cause, label_width),
                deaths: count,
            }
        })
        .collect())
}

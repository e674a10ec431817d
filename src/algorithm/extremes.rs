//! Nationwide total and provincial extremes for one year

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::error::{DemographyError, Result};
use crate::filter::error::{int64_column, string_column};
use crate::filter::{BatchFilter, SelectionFilter};
use crate::schema::{AGE, ALL, REGION, SEX, Sex, VALUE, YEAR};

/// A region paired with its population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionValue {
    pub region: String,
    pub value: i64,
}

/// Headline numbers shown next to the province map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionExtremes {
    pub year: i32,
    /// Population of the aggregate region
    pub total: i64,
    /// Most populous province or territory
    pub max: RegionValue,
    /// Least populous province or territory
    pub min: RegionValue,
}

/// Unstratified population rows (sex and age both `All`) for one year
pub fn unstratified_year(population: &RecordBatch, year: i32) -> Result<RecordBatch> {
    SelectionFilter::requiring(&[SEX, AGE, YEAR])
        .eq(SEX, Sex::All)
        .eq(AGE, ALL)
        .eq(YEAR, year)
        .filter(population)
}

/// Unstratified population of every region except the aggregate
pub fn provincial_values(
    population: &RecordBatch,
    year: i32,
    aggregate: &str,
) -> Result<RecordBatch> {
    SelectionFilter::requiring(&[SEX, AGE, YEAR])
        .eq(SEX, Sex::All)
        .eq(AGE, ALL)
        .eq(YEAR, year)
        .excluding(REGION, [aggregate])
        .filter(population)
}

/// Total for the aggregate region plus the largest and smallest provinces
///
/// Ties keep the first region in table order. Rows with a null value are
/// ignored.
///
/// # Errors
/// Returns `NoData` when the year has no aggregate row or no provincial rows
pub fn region_extremes(population: &RecordBatch, year: i32, aggregate: &str) -> Result<RegionExtremes> {
    let rows = unstratified_year(population, year)?;
    let regions = string_column(&rows, REGION)?;
    let values = int64_column(&rows, VALUE)?;

    let mut total = None;
    let mut max: Option<RegionValue> = None;
    let mut min: Option<RegionValue> = None;

    for i in 0..rows.num_rows() {
        if values.is_null(i) || regions.is_null(i) {
            continue;
        }
        let region = regions.value(i);
        let value = values.value(i);

        if region == aggregate {
            total.get_or_insert(value);
            continue;
        }
        if max.as_ref().is_none_or(|m| value > m.value) {
            max = Some(RegionValue { region: region.to_string(), value });
        }
        if min.as_ref().is_none_or(|m| value < m.value) {
            min = Some(RegionValue { region: region.to_string(), value });
        }
    }

    let selection = format!("year {year}, sex {ALL}, age {ALL}");
    let total = total.ok_or_else(|| {
        DemographyError::no_data(format!("{aggregate} population total"), selection.clone())
    })?;
    let (Some(max), Some(min)) = (max, min) else {
        return Err(DemographyError::no_data("provincial population", selection));
    };

    Ok(RegionExtremes { year, total, max, min })
}

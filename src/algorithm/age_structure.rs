//! Age structure of the nationwide population

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use bracket_sums::OrderedSums;
use serde::Serialize;

use crate::error::{DemographyError, Result};
use crate::filter::error::{float64_column, int64_column, string_column};
use crate::filter::{BatchFilter, SelectionFilter};
use crate::schema::{AGE, ALL, REGION, SEX, Sex, Statistic, VALUE, YEAR};

/// Population of one age bracket, split by sex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBracketTotal {
    pub bracket: String,
    pub women: i64,
    pub men: i64,
}

impl AgeBracketTotal {
    #[must_use]
    pub fn total(&self) -> i64 {
        self.women + self.men
    }
}

/// Age-structure bars and the most populous bracket for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeStructure {
    pub year: i32,
    pub most_populous: String,
    /// Brackets in table order
    pub brackets: Vec<AgeBracketTotal>,
}

/// Per-bracket population of the aggregate region, women and men only
pub fn age_brackets_by_sex(
    population: &RecordBatch,
    year: i32,
    aggregate: &str,
) -> Result<RecordBatch> {
    SelectionFilter::requiring(&[REGION, SEX, YEAR])
        .eq(REGION, aggregate)
        .is_in(SEX, Sex::BOTH)
        .eq(YEAR, year)
        .excluding(AGE, [ALL])
        .filter(population)
}

/// The bracket holding the most people, summed over both sexes
///
/// Ties keep the bracket that appears first in the table.
///
/// # Errors
/// Returns `NoData` when the year has no stratified rows for the aggregate
pub fn most_populous_age_bracket(
    population: &RecordBatch,
    year: i32,
    aggregate: &str,
) -> Result<AgeStructure> {
    let rows = age_brackets_by_sex(population, year, aggregate)?;
    let brackets = string_column(&rows, AGE)?;
    let sexes = string_column(&rows, SEX)?;
    let values = int64_column(&rows, VALUE)?;

    let mut sums = OrderedSums::default();
    for i in 0..rows.num_rows() {
        if brackets.is_null(i) || values.is_null(i) {
            continue;
        }
        let entry = sums.entry(brackets.value(i));
        match sexes.value(i).parse::<Sex>()? {
            Sex::Women => entry.women += values.value(i),
            Sex::Men => entry.men += values.value(i),
            Sex::All => {}
        }
    }

    let brackets = sums.into_vec();
    let most_populous = brackets
        .iter()
        .fold(None::<&AgeBracketTotal>, |best, b| match best {
            Some(best) if best.total() >= b.total() => Some(best),
            _ => Some(b),
        })
        .map(|b| b.bracket.clone())
        .ok_or_else(|| {
            DemographyError::no_data(
                "age structure",
                format!("region {aggregate}, year {year}, sexes Women/Men"),
            )
        })?;

    Ok(AgeStructure {
        year,
        most_populous,
        brackets,
    })
}

/// Mean or median age of one sex in the aggregate region
///
/// # Errors
/// Returns `NoData` when the averages table has no matching row
pub fn average_age(
    averages: &RecordBatch,
    year: i32,
    sex: Sex,
    statistic: Statistic,
    aggregate: &str,
) -> Result<f64> {
    let rows = SelectionFilter::requiring(&[REGION, SEX, AGE, YEAR])
        .eq(REGION, aggregate)
        .eq(SEX, sex)
        .eq(AGE, statistic)
        .eq(YEAR, year)
        .filter(averages)?;
    let values = float64_column(&rows, VALUE)?;

    values
        .iter()
        .flatten()
        .next()
        .ok_or_else(|| {
            DemographyError::no_data(
                format!("{} age", statistic.as_str().to_lowercase()),
                format!("region {aggregate}, sex {sex}, year {year}"),
            )
        })
}

mod bracket_sums {
    use rustc_hash::FxHashMap;

    use super::AgeBracketTotal;

    /// Per-bracket sums that remember first-seen order
    #[derive(Default)]
    pub(super) struct OrderedSums {
        index: FxHashMap<String, usize>,
        totals: Vec<AgeBracketTotal>,
    }

    impl OrderedSums {
        pub(super) fn entry(&mut self, bracket: &str) -> &mut AgeBracketTotal {
            let next = self.totals.len();
            let idx = *self.index.entry(bracket.to_string()).or_insert(next);
            if idx == next {
                self.totals.push(AgeBracketTotal {
                    bracket: bracket.to_string(),
                    women: 0,
                    men: 0,
                });
            }
            &mut self.totals[idx]
        }

        pub(super) fn into_vec(self) -> Vec<AgeBracketTotal> {
            self.totals
        }
    }
}

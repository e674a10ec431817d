//! Column layout of the four demographic tables.
//!
//! Every table is held as a single Arrow `RecordBatch`. The loader adapts
//! whatever it reads to the schemas defined here, so the rest of the crate
//! can rely on exact column names and types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use serde::{Deserialize, Serialize};

use crate::error::DemographyError;

pub mod adapt;

pub use adapt::{adapt_record_batch, check_unique_keys, check_sex_values};

/// Region name, or the nationwide aggregate
pub const REGION: &str = "Region";
/// Sex, one of [`Sex`]
pub const SEX: &str = "Sex";
/// Age bracket; in the averages table this holds the [`Statistic`] name
pub const AGE: &str = "Age";
/// Calendar year
pub const YEAR: &str = "Year";
/// Population count or average age
pub const VALUE: &str = "Value";
/// Births per year
pub const BIRTHS: &str = "Births";
/// Deaths per year, or deaths per cause in the causes table
pub const DEATHS: &str = "Deaths";
/// Age bracket at death
pub const AGE_AT_DEATH: &str = "AgeAtDeath";
/// Cause of death
pub const CAUSE: &str = "Cause";
/// Births/deaths category after reshaping to long form
pub const CATEGORY: &str = "Category";

/// Sentinel meaning "not stratified" in the age and sex columns
pub const ALL: &str = "All";
/// Sentinel cause holding the total over every cause
pub const TOTAL_ALL_CAUSES: &str = "Total, all causes of death";

/// Sex categories used by every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    All,
    Women,
    Men,
}

impl Sex {
    /// Both sexes, excluding the `All` sentinel
    pub const BOTH: [Sex; 2] = [Sex::Women, Sex::Men];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Women => "Women",
            Self::Men => "Men",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = DemographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(Self::All),
            "Women" => Ok(Self::Women),
            "Men" => Ok(Self::Men),
            other => Err(DemographyError::InvalidValue {
                field: SEX.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Location statistic stored in the averages table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Median => "Median",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = DemographyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mean" => Ok(Self::Mean),
            "Median" => Ok(Self::Median),
            other => Err(DemographyError::InvalidValue {
                field: "statistic".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// The four input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Population,
    PopulationAverages,
    BirthsDeaths,
    CausesOfDeath,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Population,
        TableKind::PopulationAverages,
        TableKind::BirthsDeaths,
        TableKind::CausesOfDeath,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::PopulationAverages => "population averages",
            Self::BirthsDeaths => "births/deaths",
            Self::CausesOfDeath => "causes of death",
        }
    }

    /// The schema every loaded batch of this table is adapted to
    #[must_use]
    pub fn schema(self) -> SchemaRef {
        let fields = match self {
            Self::Population => vec![
                Field::new(REGION, DataType::Utf8, false),
                Field::new(SEX, DataType::Utf8, false),
                Field::new(AGE, DataType::Utf8, false),
                Field::new(YEAR, DataType::Int32, false),
                Field::new(VALUE, DataType::Int64, true),
            ],
            Self::PopulationAverages => vec![
                Field::new(REGION, DataType::Utf8, false),
                Field::new(SEX, DataType::Utf8, false),
                Field::new(AGE, DataType::Utf8, false),
                Field::new(YEAR, DataType::Int32, false),
                Field::new(VALUE, DataType::Float64, true),
            ],
            Self::BirthsDeaths => vec![
                Field::new(YEAR, DataType::Int32, false),
                Field::new(BIRTHS, DataType::Int64, true),
                Field::new(DEATHS, DataType::Int64, true),
            ],
            Self::CausesOfDeath => vec![
                Field::new(YEAR, DataType::Int32, false),
                Field::new(SEX, DataType::Utf8, false),
                Field::new(AGE_AT_DEATH, DataType::Utf8, false),
                Field::new(CAUSE, DataType::Utf8, false),
                Field::new(DEATHS, DataType::Int64, true),
            ],
        };
        Arc::new(Schema::new(fields))
    }

    /// Columns that must identify a row uniquely, if the table enforces it
    #[must_use]
    pub fn unique_key(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Population => Some(&[REGION, SEX, AGE, YEAR]),
            _ => None,
        }
    }

    /// Whether the table carries a `Sex` column
    #[must_use]
    pub fn has_sex(self) -> bool {
        !matches!(self, Self::BirthsDeaths)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

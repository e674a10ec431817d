//! Aggregations and reshaping behind the dashboard panels
//!
//! Every function here is a pure computation over an immutable table. Where
//! a single value is expected and the selection is empty, the functions
//! return [`crate::DemographyError::NoData`] instead of a default.

pub mod age_structure;
pub mod causes;
pub mod extremes;
pub mod shaping;

pub use age_structure::{AgeBracketTotal, AgeStructure, average_age, most_populous_age_bracket};
pub use causes::{CauseOfDeath, top_causes, truncate_label};
pub use extremes::{RegionExtremes, RegionValue, provincial_values, region_extremes};
pub use shaping::{
    CategoryValue, Series, SeriesPoint, group_series, melt_births_deaths, with_composite_label,
};

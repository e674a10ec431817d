//! Dashboard session: loaded tables, current selections and panel recompute
//!
//! A [`DashboardSession`] owns the immutable tables for its lifetime. Each
//! selection change is followed by an explicit [`DashboardSession::recompute`],
//! which re-runs filter, aggregation and shaping for every panel and returns a
//! fresh [`DashboardView`].

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::algorithm::shaping::{category_values, distinct_strings, distinct_years, year_span};
use crate::algorithm::{
    AgeStructure, CategoryValue, CauseOfDeath, RegionExtremes, Series, average_age, group_series,
    melt_births_deaths, most_populous_age_bracket, provincial_values, region_extremes, top_causes,
    with_composite_label,
};
use crate::config::DashboardConfig;
use crate::error::{DemographyError, Result};
use crate::filter::{BatchFilter, SelectionFilter};
use crate::geo::{Boundaries, RegionShape, join_regions};
use crate::loader::DemographyTables;
use crate::schema::{AGE, AGE_AT_DEATH, ALL, REGION, SEX, Sex, Statistic, TableKind, VALUE, YEAR};

const TREND_LABEL: &str = "Label";

/// Everything the user can pick on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selections {
    /// Region for both trend charts
    pub region: String,
    /// Sexes for both trend charts
    pub sexes: Vec<Sex>,
    /// Age brackets for the population trend
    pub age_brackets: Vec<String>,
    /// Statistics for the average-age trend
    pub statistics: Vec<Statistic>,
    /// Year of the province map and the age structure
    pub map_year: i32,
    pub causes_year: i32,
    pub causes_sex: Sex,
    pub causes_age: String,
}

impl Selections {
    /// Initial selections derived from the tables
    ///
    /// Single-choice selectors start at the first value in table order.
    ///
    /// # Errors
    /// Returns `NoData` if a table has no value to start a selector from
    pub fn defaults(tables: &DemographyTables) -> Result<Self> {
        let population = TableKind::Population;
        let causes = TableKind::CausesOfDeath;
        let region = first(distinct_strings(&tables.population, REGION)?, population, REGION)?;
        let map_year = first(distinct_years(&tables.population)?, population, YEAR)?;
        let causes_year = first(distinct_years(&tables.causes)?, causes, YEAR)?;
        let causes_sex = first(distinct_strings(&tables.causes, SEX)?, causes, SEX)?.parse()?;
        let causes_age = first(
            distinct_strings(&tables.causes, AGE_AT_DEATH)?,
            causes,
            AGE_AT_DEATH,
        )?;

        Ok(Self {
            region,
            sexes: vec![Sex::All],
            age_brackets: vec![ALL.to_string()],
            statistics: vec![Statistic::Mean],
            map_year,
            causes_year,
            causes_sex,
            causes_age,
        })
    }
}

fn first<T>(values: Vec<T>, kind: TableKind, column: &str) -> Result<T> {
    values.into_iter().next().ok_or_else(|| {
        DemographyError::no_data(format!("default {column}"), format!("{} table", kind.name()))
    })
}

/// A titled set of line series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPanel {
    pub title: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceMapPanel {
    pub title: String,
    pub extremes: RegionExtremes,
    pub shapes: Vec<RegionShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStructurePanel {
    pub title: String,
    pub structure: AgeStructure,
    pub mean_age_women: f64,
    pub mean_age_men: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthsDeathsPanel {
    pub title: String,
    pub rows: Vec<CategoryValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausesPanel {
    pub title: String,
    pub causes: Vec<CauseOfDeath>,
}

/// Result of one recompute, one field per panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selections: Selections,
    pub population_trend: TrendPanel,
    pub average_age_trend: TrendPanel,
    pub province_map: ProvinceMapPanel,
    pub age_structure: AgeStructurePanel,
    pub births_deaths: BirthsDeathsPanel,
    pub causes_of_death: CausesPanel,
}

/// Loaded tables plus the current selections
#[derive(Debug)]
pub struct DashboardSession {
    tables: DemographyTables,
    boundaries: Boundaries,
    config: DashboardConfig,
    selections: Selections,
}

impl DashboardSession {
    /// Create a session with default selections
    pub fn new(
        tables: DemographyTables,
        boundaries: Boundaries,
        config: DashboardConfig,
    ) -> Result<Self> {
        let selections = Selections::defaults(&tables)?;
        log::debug!("Initial selections: {selections:?}");
        Ok(Self {
            tables,
            boundaries,
            config,
            selections,
        })
    }

    #[must_use]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    #[must_use]
    pub fn tables(&self) -> &DemographyTables {
        &self.tables
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.selections.region = region.into();
    }

    pub fn set_sexes(&mut self, sexes: impl IntoIterator<Item = Sex>) {
        self.selections.sexes = sexes.into_iter().collect();
    }

    pub fn set_age_brackets<S: Into<String>>(&mut self, brackets: impl IntoIterator<Item = S>) {
        self.selections.age_brackets = brackets.into_iter().map(Into::into).collect();
    }

    pub fn set_statistics(&mut self, statistics: impl IntoIterator<Item = Statistic>) {
        self.selections.statistics = statistics.into_iter().collect();
    }

    pub fn set_map_year(&mut self, year: i32) {
        self.selections.map_year = year;
    }

    pub fn set_causes_year(&mut self, year: i32) {
        self.selections.causes_year = year;
    }

    pub fn set_causes_sex(&mut self, sex: Sex) {
        self.selections.causes_sex = sex;
    }

    pub fn set_causes_age(&mut self, age: impl Into<String>) {
        self.selections.causes_age = age.into();
    }

    /// Re-run every panel against the current selections
    ///
    /// # Errors
    /// Fails if any panel fails; single-value panels report `NoData` for
    /// empty selections, trend panels return empty series instead.
    pub fn recompute(&self) -> Result<DashboardView> {
        log::debug!("Recomputing dashboard for {:?}", self.selections);

        Ok(DashboardView {
            selections: self.selections.clone(),
            population_trend: self.population_trend()?,
            average_age_trend: self.average_age_trend()?,
            province_map: self.province_map()?,
            age_structure: self.age_structure()?,
            births_deaths: self.births_deaths()?,
            causes_of_death: self.causes_of_death()?,
        })
    }

    fn aggregate(&self) -> &str {
        &self.config.aggregate_region
    }

    /// Selected region as it reads in a title
    ///
    /// The aggregate stands on its own; a province is qualified by it.
    fn place(&self) -> String {
        let region = &self.selections.region;
        if region == self.aggregate() {
            region.clone()
        } else {
            format!("{region} ({})", self.aggregate())
        }
    }

    fn population_trend(&self) -> Result<TrendPanel> {
        let s = &self.selections;
        let rows = SelectionFilter::requiring(&[REGION, SEX, AGE])
            .eq(REGION, s.region.as_str())
            .is_in(SEX, s.sexes.iter().copied())
            .is_in(AGE, &s.age_brackets)
            .filter(&self.tables.population)?;

        let title = format!(
            "Population of {}{}",
            self.place(),
            span_suffix(&self.tables.population)?
        );
        Ok(TrendPanel {
            title,
            series: labelled_series(&rows)?,
        })
    }

    fn average_age_trend(&self) -> Result<TrendPanel> {
        let s = &self.selections;
        let rows = SelectionFilter::requiring(&[REGION, SEX, AGE])
            .eq(REGION, s.region.as_str())
            .is_in(SEX, s.sexes.iter().copied())
            .is_in(AGE, s.statistics.iter().copied())
            .filter(&self.tables.averages)?;

        let measure = match s.statistics.as_slice() {
            [only] => only.as_str().to_string(),
            _ => "Mean and median".to_string(),
        };
        let title = format!(
            "{measure} age in {}{}",
            self.place(),
            span_suffix(&self.tables.averages)?
        );
        Ok(TrendPanel {
            title,
            series: labelled_series(&rows)?,
        })
    }

    fn province_map(&self) -> Result<ProvinceMapPanel> {
        let year = self.selections.map_year;
        let population = &self.tables.population;
        let extremes = region_extremes(population, year, self.aggregate())?;
        let provinces = provincial_values(population, year, self.aggregate())?;
        let shapes = join_regions(&provinces, &self.boundaries)?;

        Ok(ProvinceMapPanel {
            title: format!("Population of the provinces of {} in {year}", self.aggregate()),
            extremes,
            shapes,
        })
    }

    fn age_structure(&self) -> Result<AgeStructurePanel> {
        let year = self.selections.map_year;
        let aggregate = self.aggregate();
        let structure = most_populous_age_bracket(&self.tables.population, year, aggregate)?;
        let averages = &self.tables.averages;

        Ok(AgeStructurePanel {
            title: format!("Age structure of {aggregate} in {year}"),
            mean_age_women: average_age(averages, year, Sex::Women, Statistic::Mean, aggregate)?,
            mean_age_men: average_age(averages, year, Sex::Men, Statistic::Mean, aggregate)?,
            structure,
        })
    }

    fn births_deaths(&self) -> Result<BirthsDeathsPanel> {
        let wide = &self.tables.births_deaths;
        let rows = category_values(&melt_births_deaths(wide)?)?;
        Ok(BirthsDeathsPanel {
            title: format!("Births and deaths in {}{}", self.aggregate(), span_suffix(wide)?),
            rows,
        })
    }

    fn causes_of_death(&self) -> Result<CausesPanel> {
        let s = &self.selections;
        let causes = top_causes(
            &self.tables.causes,
            s.causes_year,
            s.causes_sex,
            &s.causes_age,
            self.config.top_causes,
            self.config.label_width,
        )?;
        Ok(CausesPanel {
            title: format!(
                "Leading causes of death in {} in {} (Sex: {}, Age: {})",
                self.aggregate(),
                s.causes_year,
                s.causes_sex,
                s.causes_age
            ),
            causes,
        })
    }
}

fn labelled_series(rows: &RecordBatch) -> Result<Vec<Series>> {
    let labelled = with_composite_label(rows, AGE, SEX, TREND_LABEL)?;
    group_series(&labelled, TREND_LABEL, VALUE)
}

fn span_suffix(table: &RecordBatch) -> Result<String> {
    Ok(match year_span(table)? {
        Some((start, end)) => format!(", {start}-{end}"),
        None => String::new(),
    })
}

//! Configuration for loading and summarising the dashboard tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::logging::log_operation_start;

/// Default directory holding the input tables
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration for the dashboard
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Population by region, sex, age bracket and year
    pub population_path: PathBuf,
    /// Mean/median age by region, sex and year
    pub averages_path: PathBuf,
    /// Births and deaths per year, wide format
    pub births_deaths_path: PathBuf,
    /// Deaths by year, sex, age at death and cause
    pub causes_path: PathBuf,
    /// GeoJSON `FeatureCollection` of province boundaries
    pub boundaries_path: PathBuf,
    /// Feature property holding the region name in the boundary file
    pub boundary_name_property: String,
    /// Region name of the nationwide aggregate
    pub aggregate_region: String,
    /// Number of causes shown in the causes-of-death chart
    pub top_causes: usize,
    /// Longest cause label shown before truncation
    pub label_width: usize,
    /// Reject population tables with duplicate keys
    pub check_unique_keys: bool,
    /// Show a progress bar while loading
    pub show_progress: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl DashboardConfig {
    /// Default configuration with every input file under `dir`
    #[must_use]
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            population_path: dir.join("population.parquet"),
            averages_path: dir.join("population_averages.parquet"),
            births_deaths_path: dir.join("deaths_births.parquet"),
            causes_path: dir.join("causes_of_death.parquet"),
            boundaries_path: dir.join("canada_provinces.geo.json"),
            boundary_name_property: "name".to_string(),
            aggregate_region: "Canada".to_string(),
            top_causes: 15,
            label_width: 30,
            check_unique_keys: true,
            show_progress: true,
        }
    }

    /// Read a configuration from a JSON file
    ///
    /// Relative input paths are resolved against the directory of the file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log_operation_start("Reading configuration from", path);

        let text = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&text)?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.population_path,
            &mut self.averages_path,
            &mut self.births_deaths_path,
            &mut self.causes_path,
            &mut self.boundaries_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::schema::{Sex, Statistic};
use crate::session::DashboardSession;

#[derive(Parser, Debug)]
#[command(name = "demography")]
#[command(version, about = "Summarise Canadian demographic tables for the dashboard")]
pub struct Cli {
    /// JSON configuration file; defaults to inputs under `data/`
    pub config: Option<PathBuf>,

    /// Print the view as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,

    /// Region for the trend charts
    #[arg(long, env = "DEMOGRAPHY_REGION")]
    pub region: Option<String>,

    /// Sexes for the trend charts (comma-separated)
    #[arg(long, env = "DEMOGRAPHY_SEXES", value_delimiter = ',')]
    pub sexes: Option<Vec<Sex>>,

    /// Age brackets for the population trend (comma-separated)
    #[arg(long, env = "DEMOGRAPHY_AGES", value_delimiter = ',')]
    pub ages: Option<Vec<String>>,

    /// Mean and/or Median for the average-age trend (comma-separated)
    #[arg(long, env = "DEMOGRAPHY_STATISTICS", value_delimiter = ',')]
    pub statistics: Option<Vec<Statistic>>,

    /// Year of the province map and age structure
    #[arg(long, env = "DEMOGRAPHY_YEAR")]
    pub year: Option<i32>,

    #[arg(long, env = "DEMOGRAPHY_CAUSES_YEAR")]
    pub causes_year: Option<i32>,

    #[arg(long, env = "DEMOGRAPHY_CAUSES_SEX")]
    pub causes_sex: Option<Sex>,

    #[arg(long, env = "DEMOGRAPHY_CAUSES_AGE")]
    pub causes_age: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Replace the session's default selections with the ones given
    pub fn apply_selections(&self, session: &mut DashboardSession) {
        if let Some(region) = &self.region {
            session.set_region(region.as_str());
        }
        if let Some(sexes) = &self.sexes {
            session.set_sexes(sexes.iter().copied());
        }
        if let Some(ages) = &self.ages {
            session.set_age_brackets(ages.iter().map(String::as_str));
        }
        if let Some(statistics) = &self.statistics {
            session.set_statistics(statistics.iter().copied());
        }
        if let Some(year) = self.year {
            session.set_map_year(year);
        }
        if let Some(year) = self.causes_year {
            session.set_causes_year(year);
        }
        if let Some(sex) = self.causes_sex {
            session.set_causes_sex(sex);
        }
        if let Some(age) = &self.causes_age {
            session.set_causes_age(age.as_str());
        }
    }
}

use std::sync::Arc;

use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use demography::{Boundaries, DemographyTables, TableKind};

/// Population rows as (region, sex, age, year, value)
pub type PopulationRow<'a> = (&'a str, &'a str, &'a str, i32, i64);

/// Build a population table
#[must_use]
pub fn population(rows: &[PopulationRow<'_>]) -> RecordBatch {
    RecordBatch::try_new(
        TableKind::Population.schema(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.0))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.3))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.4))),
        ],
    )
    .unwrap()
}

/// Build an averages table from (region, sex, statistic, year, value)
#[must_use]
pub fn averages(rows: &[(&str, &str, &str, i32, f64)]) -> RecordBatch {
    RecordBatch::try_new(
        TableKind::PopulationAverages.schema(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.0))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.3))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.4))),
        ],
    )
    .unwrap()
}

/// Build a wide births/deaths table from (year, births, deaths)
#[must_use]
pub fn births_deaths(rows: &[(i32, i64, i64)]) -> RecordBatch {
    RecordBatch::try_new(
        TableKind::BirthsDeaths.schema(),
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.0))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.1))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.2))),
        ],
    )
    .unwrap()
}

/// Build a causes table from (year, sex, age at death, cause, deaths)
#[must_use]
pub fn causes(rows: &[(i32, &str, &str, &str, i64)]) -> RecordBatch {
    RecordBatch::try_new(
        TableKind::CausesOfDeath.schema(),
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.0))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.2))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.3))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.4))),
        ],
    )
    .unwrap()
}

/// Canada, Ontario and Quebec in 2023 plus a few stratified rows
#[must_use]
pub fn canada_2023() -> RecordBatch {
    population(&[
        ("Canada", "All", "All", 2022, 37_500_000),
        ("Ontario", "All", "All", 2022, 14_800_000),
        ("Quebec", "All", "All", 2022, 8_900_000),
        ("Canada", "All", "All", 2023, 38_000_000),
        ("Ontario", "All", "All", 2023, 15_000_000),
        ("Quebec", "All", "All", 2023, 9_000_000),
        ("Canada", "Women", "0 to 14 years", 2023, 3_100_000),
        ("Canada", "Men", "0 to 14 years", 2023, 3_300_000),
        ("Canada", "Women", "15 to 64 years", 2023, 12_600_000),
        ("Canada", "Men", "15 to 64 years", 2023, 12_900_000),
        ("Canada", "Women", "65 years and older", 2023, 3_300_000),
        ("Canada", "Men", "65 years and older", 2023, 2_800_000),
        ("Canada", "All", "0 to 14 years", 2023, 6_400_000),
        ("Ontario", "Women", "15 to 64 years", 2023, 5_000_000),
    ])
}

/// Twenty causes for women of all ages in 2010, plus the all-causes total
#[must_use]
pub fn twenty_causes() -> RecordBatch {
    let names: Vec<String> = (0..20)
        .map(|i| format!("Cause number {i:02} of a fairly long name"))
        .collect();
    let mut rows: Vec<(i32, &str, &str, &str, i64)> =
        vec![(2010, "Women", "All", "Total, all causes of death", 120_000)];
    rows.extend(
        names
            .iter()
            .zip(0_i64..)
            .map(|(n, i)| (2010, "Women", "All", n.as_str(), (i % 7) * 100)),
    );
    rows.push((2010, "Men", "All", "Cause number 99", 1_000_000));
    causes(&rows)
}

/// Complete in-memory session tables around [`canada_2023`]
#[must_use]
pub fn dashboard_tables() -> DemographyTables {
    DemographyTables::from_batches(
        canada_2023(),
        averages(&[
            ("Canada", "All", "Mean", 2022, 41.6),
            ("Canada", "All", "Mean", 2023, 41.7),
            ("Canada", "Women", "Mean", 2023, 42.6),
            ("Canada", "Men", "Mean", 2023, 40.8),
            ("Canada", "All", "Median", 2023, 41.1),
            ("Ontario", "All", "Mean", 2023, 41.4),
        ]),
        births_deaths(&[(2020, 350_000, 300_000), (2021, 360_000, 310_000)]),
        twenty_causes(),
        true,
    )
    .unwrap()
}

pub const BOUNDARIES_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "Quebec"},
         "geometry": {"type": "Polygon", "coordinates": [[[-79.5, 45.0], [-57.1, 51.4], [-79.5, 62.6], [-79.5, 45.0]]]}},
        {"type": "Feature", "properties": {"name": "Ontario"},
         "geometry": {"type": "Polygon", "coordinates": [[[-95.2, 49.0], [-74.3, 45.0], [-89.0, 56.9], [-95.2, 49.0]]]}}
    ]
}"#;

#[must_use]
pub fn boundaries() -> Boundaries {
    Boundaries::from_geojson_str(BOUNDARIES_GEOJSON, "name").unwrap()
}

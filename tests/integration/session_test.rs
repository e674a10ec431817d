use demography::{DashboardConfig, DashboardSession, DemographyError, Sex, Statistic};

use crate::utils::{boundaries, dashboard_tables};

fn session() -> DashboardSession {
    DashboardSession::new(dashboard_tables(), boundaries(), DashboardConfig::default()).unwrap()
}

#[test]
fn test_default_selections() {
    let session = session();
    let selections = session.selections();
    assert_eq!(selections.region, "Canada");
    assert_eq!(selections.sexes, vec![Sex::All]);
    assert_eq!(selections.age_brackets, vec!["All".to_string()]);
    assert_eq!(selections.map_year, 2022);
    assert_eq!(selections.causes_year, 2010);
    assert_eq!(selections.causes_sex, Sex::Women);
    assert_eq!(selections.causes_age, "All");
}

#[test]
fn test_recompute_for_2023() -> demography::Result<()> {
    let mut session = session();
    session.set_map_year(2023);
    let view = session.recompute()?;

    assert_eq!(view.population_trend.title, "Population of Canada, 2022-2023");
    assert_eq!(view.population_trend.series.len(), 1);

    let map = &view.province_map;
    assert_eq!(map.extremes.total, 38_000_000);
    assert_eq!(map.extremes.max.region, "Ontario");
    assert_eq!(map.extremes.min.region, "Quebec");
    assert!(map.extremes.max.value + map.extremes.min.value <= map.extremes.total);
    let shaped: Vec<&str> = map.shapes.iter().map(|s| s.region.as_str()).collect();
    assert_eq!(shaped, vec!["Quebec", "Ontario"]);

    assert_eq!(view.age_structure.structure.most_populous, "15 to 64 years");
    assert_eq!(view.age_structure.structure.brackets.len(), 3);

    let births: Vec<(i32, &str)> =
        view.births_deaths.rows.iter().map(|r| (r.year, r.category.as_str())).collect();
    assert_eq!(
        births,
        vec![(2020, "Births"), (2021, "Births"), (2020, "Deaths"), (2021, "Deaths")]
    );
    assert_eq!(view.births_deaths.title, "Births and deaths in Canada, 2020-2021");

    assert_eq!(view.causes_of_death.causes.len(), 15);
    assert_eq!(
        view.causes_of_death.title,
        "Leading causes of death in Canada in 2010 (Sex: Women, Age: All)"
    );
    Ok(())
}

#[test]
fn test_province_trends() -> demography::Result<()> {
    let mut session = session();
    session.set_map_year(2023);
    session.set_region("Ontario");
    session.set_sexes([Sex::All, Sex::Women]);
    session.set_age_brackets(["All", "15 to 64 years"]);
    session.set_statistics([Statistic::Mean, Statistic::Median]);
    let view = session.recompute()?;

    let keys: Vec<&str> = view.population_trend.series.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["All - All", "15 to 64 years - Women"]);
    assert_eq!(view.population_trend.title, "Population of Ontario (Canada), 2022-2023");

    assert!(view.average_age_trend.title.starts_with("Mean and median age in Ontario (Canada)"));
    assert_eq!(view.average_age_trend.series.len(), 1);
    assert_eq!(view.average_age_trend.series[0].key, "Mean - All");
    Ok(())
}

#[test]
fn test_view_serializes_to_json() -> demography::Result<()> {
    let mut session = session();
    session.set_map_year(2023);
    let view = session.recompute()?;

    let json = serde_json::to_value(&view)?;
    assert_eq!(json["province_map"]["extremes"]["total"], 38_000_000);
    assert_eq!(json["selections"]["causes_sex"], "Women");
    assert_eq!(json["province_map"]["shapes"][0]["geometry"]["type"], "Polygon");
    Ok(())
}

#[test]
fn test_missing_age_data_is_no_data() {
    let mut session = session();
    session.set_map_year(2023);
    session.set_causes_year(1900);
    // causes are a list, so an empty year is fine
    assert!(session.recompute().is_ok());

    // the map year has an aggregate but no stratified rows
    session.set_map_year(2022);
    let err = session.recompute().unwrap_err();
    assert!(err.is_no_data());
}

#[test]
fn test_unmatched_boundary_names() {
    let mut session = DashboardSession::new(
        dashboard_tables(),
        demography::Boundaries::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"name": "Ontario"}, "geometry": null}
            ]}"#,
            "name",
        )
        .unwrap(),
        DashboardConfig::default(),
    )
    .unwrap();
    session.set_map_year(2023);

    match session.recompute().unwrap_err() {
        DemographyError::GeometryJoinMismatch { missing, .. } => {
            assert_eq!(missing, vec!["Quebec".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

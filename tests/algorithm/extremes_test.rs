//! Tests for the headline numbers of the province map and age structure

use demography::algorithm::{most_populous_age_bracket, region_extremes};

use crate::utils::{canada_2023, population};

#[test]
fn test_canada_2023_scenario() -> demography::Result<()> {
    let extremes = region_extremes(&canada_2023(), 2023, "Canada")?;
    assert_eq!(extremes.year, 2023);
    assert_eq!(extremes.total, 38_000_000);
    assert_eq!(extremes.max.region, "Ontario");
    assert_eq!(extremes.max.value, 15_000_000);
    assert_eq!(extremes.min.region, "Quebec");
    assert_eq!(extremes.min.value, 9_000_000);
    Ok(())
}

#[test]
fn test_extremes_within_total() -> demography::Result<()> {
    for year in [2022, 2023] {
        let e = region_extremes(&canada_2023(), year, "Canada")?;
        assert!(e.max.value >= e.min.value);
        assert!(e.max.value + e.min.value <= e.total);
    }
    Ok(())
}

#[test]
fn test_aggregate_found_by_name_not_position() -> demography::Result<()> {
    let batch = population(&[
        ("Yukon", "All", "All", 2023, 45_000),
        ("Alberta", "All", "All", 2023, 4_700_000),
        ("Canada", "All", "All", 2023, 40_000_000),
        ("Nunavut", "All", "All", 2023, 40_000),
    ]);
    let e = region_extremes(&batch, 2023, "Canada")?;
    assert_eq!(e.total, 40_000_000);
    assert_eq!(e.max.region, "Alberta");
    assert_eq!(e.min.region, "Nunavut");
    Ok(())
}

#[test]
fn test_ties_keep_table_order() -> demography::Result<()> {
    let batch = population(&[
        ("Canada", "All", "All", 2023, 30),
        ("New Brunswick", "All", "All", 2023, 10),
        ("Nova Scotia", "All", "All", 2023, 10),
    ]);
    let e = region_extremes(&batch, 2023, "Canada")?;
    assert_eq!(e.max.region, "New Brunswick");
    assert_eq!(e.min.region, "New Brunswick");
    Ok(())
}

#[test]
fn test_missing_year_is_no_data() {
    let err = region_extremes(&canada_2023(), 1850, "Canada").unwrap_err();
    assert!(err.is_no_data());

    let only_total = population(&[("Canada", "All", "All", 2023, 38)]);
    assert!(region_extremes(&only_total, 2023, "Canada").unwrap_err().is_no_data());
}

#[test]
fn test_most_populous_bracket_dominates() -> demography::Result<()> {
    let structure = most_populous_age_bracket(&canada_2023(), 2023, "Canada")?;
    let best = structure
        .brackets
        .iter()
        .find(|b| b.bracket == structure.most_populous)
        .map(|b| b.total())
        .unwrap();
    assert!(structure.brackets.iter().all(|b| best >= b.total()));
    assert_eq!(structure.most_populous, "15 to 64 years");
    // Ontario rows are not part of the nationwide structure
    assert_eq!(structure.brackets[1].women, 12_600_000);
    Ok(())
}

use crate::utils::canada_2023;
use demography::filter::error::{int32_column, string_column};
use demography::schema::{AGE, REGION, SEX, YEAR};
use demography::{BatchFilter, DemographyError, SelectionFilter, Sex};

fn rows_of(batch: &demography::RecordBatch) -> Vec<String> {
    let regions = string_column(batch, REGION).unwrap();
    let sexes = string_column(batch, SEX).unwrap();
    let ages = string_column(batch, AGE).unwrap();
    let years = int32_column(batch, YEAR).unwrap();
    (0..batch.num_rows())
        .map(|i| {
            format!(
                "{}|{}|{}|{}",
                regions.value(i),
                sexes.value(i),
                ages.value(i),
                years.value(i)
            )
        })
        .collect()
}

/// Filter output is a subset of the input and every row satisfies every predicate
#[test]
fn test_output_is_satisfying_subset() -> demography::Result<()> {
    let population = canada_2023();
    let filter = SelectionFilter::requiring(&[REGION, SEX, AGE])
        .is_in(REGION, ["Canada", "Ontario"])
        .is_in(SEX, [Sex::Women, Sex::All])
        .is_in(AGE, ["All", "15 to 64 years"]);

    let filtered = filter.filter(&population)?;
    assert!(filtered.num_rows() <= population.num_rows());
    assert_eq!(filtered.num_rows(), 6);

    let all_rows = rows_of(&population);
    for row in rows_of(&filtered) {
        assert!(all_rows.contains(&row));
        let parts: Vec<&str> = row.split('|').collect();
        assert!(["Canada", "Ontario"].contains(&parts[0]));
        assert!(["Women", "All"].contains(&parts[1]));
        assert!(["All", "15 to 64 years"].contains(&parts[2]));
    }
    Ok(())
}

/// Output keeps the input order
#[test]
fn test_filter_is_stable() -> demography::Result<()> {
    let population = canada_2023();
    let filtered = SelectionFilter::requiring(&[REGION])
        .eq(REGION, "Ontario")
        .filter(&population)?;
    let years = int32_column(&filtered, YEAR)?;
    assert_eq!(years.values().to_vec(), vec![2022, 2023, 2023]);
    Ok(())
}

/// Filtering twice gives the same result as filtering once
#[test]
fn test_filter_is_idempotent() -> demography::Result<()> {
    let population = canada_2023();
    let filter = SelectionFilter::requiring(&[SEX, YEAR])
        .eq(SEX, Sex::All)
        .eq(YEAR, 2023);

    let once = filter.filter(&population)?;
    let twice = filter.filter(&once)?;
    assert_eq!(once, twice);
    Ok(())
}

/// An empty selection or an unknown value gives zero rows, not an error
#[test]
fn test_empty_and_unknown_values() -> demography::Result<()> {
    let population = canada_2023();

    let empty = SelectionFilter::requiring(&[SEX])
        .is_in(SEX, Vec::<Sex>::new())
        .filter(&population)?;
    assert_eq!(empty.num_rows(), 0);
    assert_eq!(empty.schema(), population.schema());

    let unknown = SelectionFilter::requiring(&[REGION])
        .eq(REGION, "Atlantis")
        .filter(&population)?;
    assert_eq!(unknown.num_rows(), 0);
    Ok(())
}

/// Leaving out a required dimension fails loudly
#[test]
fn test_missing_dimension() {
    let population = canada_2023();
    let err = SelectionFilter::requiring(&[REGION, SEX])
        .eq(REGION, "Canada")
        .filter(&population)
        .unwrap_err();
    assert!(matches!(err, DemographyError::MissingDimension(ref d) if d == SEX));
}

/// Predicates on absent columns are reported
#[test]
fn test_unknown_column() {
    let population = canada_2023();
    let err = SelectionFilter::requiring(&[])
        .eq("Province", "Ontario")
        .filter(&population)
        .unwrap_err();
    assert!(matches!(err, DemographyError::ColumnNotFound(ref c) if c == "Province"));
}

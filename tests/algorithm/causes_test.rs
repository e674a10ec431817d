use demography::algorithm::causes::ELLIPSIS;
use demography::algorithm::{top_causes, truncate_label};
use demography::schema::TOTAL_ALL_CAUSES;
use demography::Sex;

use crate::utils::twenty_causes;

#[test]
fn test_top_fifteen() -> demography::Result<()> {
    let top = top_causes(&twenty_causes(), 2010, Sex::Women, "All", 15, 30)?;

    assert_eq!(top.len(), 15);
    assert!(top.iter().all(|c| c.cause != TOTAL_ALL_CAUSES));
    assert!(top.windows(2).all(|w| w[0].deaths >= w[1].deaths));
    assert_eq!(top[0].deaths, 600);
    // Men's causes are not mixed in
    assert!(top.iter().all(|c| c.cause != "Cause number 99"));
    Ok(())
}

#[test]
fn test_equal_counts_keep_table_order() -> demography::Result<()> {
    let top = top_causes(&twenty_causes(), 2010, Sex::Women, "All", 15, 30)?;
    // causes 06 and 13 both have 600 deaths
    assert_eq!(top[0].cause, "Cause number 06 of a fairly long name");
    assert_eq!(top[1].cause, "Cause number 13 of a fairly long name");
    Ok(())
}

#[test]
fn test_labels_are_truncated() -> demography::Result<()> {
    let top = top_causes(&twenty_causes(), 2010, Sex::Women, "All", 15, 30)?;
    for cause in &top {
        assert_eq!(cause.label.chars().count(), 33);
        assert!(cause.label.ends_with(ELLIPSIS));
        assert!(cause.cause.starts_with(cause.label.trim_end_matches(ELLIPSIS)));
    }
    Ok(())
}

#[test]
fn test_no_matching_rows() -> demography::Result<()> {
    assert!(top_causes(&twenty_causes(), 1999, Sex::Women, "All", 15, 30)?.is_empty());
    assert!(top_causes(&twenty_causes(), 2010, Sex::All, "All", 15, 30)?.is_empty());
    Ok(())
}

#[test]
fn test_truncate_label_width() {
    assert_eq!(truncate_label("Accidents", 30), "Accidents");
    assert_eq!(truncate_label("Diseases of heart", 8), "Diseases...");
}

//! Console output utilities
//!
//! Human-readable rendering of a recomputed dashboard.

use crate::algorithm::Series;
use crate::session::DashboardView;

/// Print every panel of a view
pub fn print_dashboard(view: &DashboardView) {
    print_trend(&view.population_trend.title, &view.population_trend.series);
    print_trend(&view.average_age_trend.title, &view.average_age_trend.series);

    let map = &view.province_map;
    println!("{}:", map.title);
    println!("  * {} inhabitants in total", map.extremes.total);
    println!(
        "  * {} is the most populous ({} inhabitants)",
        map.extremes.max.region, map.extremes.max.value
    );
    println!(
        "  * {} is the least populous ({} inhabitants)",
        map.extremes.min.region, map.extremes.min.value
    );
    println!("  {} regions on the map", map.shapes.len());
    println!();

    let age = &view.age_structure;
    println!("{}:", age.title);
    println!("  * Most people were in the {} bracket", age.structure.most_populous);
    println!("  * Mean age of women: {:.1}", age.mean_age_women);
    println!("  * Mean age of men: {:.1}", age.mean_age_men);
    for bracket in &age.structure.brackets {
        println!(
            "    {:<12} women {:>10}  men {:>10}",
            bracket.bracket, bracket.women, bracket.men
        );
    }
    println!();

    println!("{}:", view.births_deaths.title);
    for row in &view.births_deaths.rows {
        println!("    {} {:<7} {:>10}", row.year, row.category, row.value);
    }
    println!();

    println!("{}:", view.causes_of_death.title);
    for cause in &view.causes_of_death.causes {
        println!("    {:<33} {:>8}", cause.label, cause.deaths);
    }
}

fn print_trend(title: &str, series: &[Series]) {
    println!("{title}:");
    if series.is_empty() {
        println!("  (nothing selected)");
    }
    for line in series {
        let first = line.points.first();
        let last = line.points.last();
        match (first, last) {
            (Some(first), Some(last)) => println!(
                "  {:<20} {} points, {}: {} .. {}: {}",
                line.key,
                line.points.len(),
                first.year,
                first.value,
                last.year,
                last.value
            ),
            _ => println!("  {:<20} no points", line.key),
        }
    }
    println!();
}

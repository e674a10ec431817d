//! Core of the Canadian demography dashboard: loading the population,
//! average-age, births/deaths and causes-of-death tables, filtering them by
//! the user's selections, and aggregating and reshaping the result into
//! chart-ready panels.

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod schema;
pub mod session;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DashboardConfig;
pub use error::{DemographyError, Result};
pub use loader::{DemographyTables, TableFormat, read_table};
pub use schema::{Sex, Statistic, TableKind};
pub use session::{DashboardSession, DashboardView, Selections};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Filtering capabilities
pub use filter::{BatchFilter, Expr, LiteralValue, SelectionFilter};
pub use filter::{evaluate_expr, filter_record_batch};

// Geography
pub use geo::{Boundaries, RegionShape, join_regions};

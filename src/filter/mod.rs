//! Filtering capabilities for the demographic tables
//!
//! Filters are conjunctions of column membership tests evaluated against a
//! whole table at once. Output rows keep their input order.

pub mod core;
pub mod error;
pub mod expr;

pub use self::core::{BatchFilter, filter_record_batch};
pub use self::expr::{Expr, LiteralValue, SelectionFilter, evaluate_expr};

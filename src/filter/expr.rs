//! Membership-based selection filters
//!
//! A [`SelectionFilter`] is the conjunction of column membership tests that
//! the dashboard's widgets describe: "region is one of ...", "sex is one of
//! ...". Each filter declares which dimensions it must constrain, and
//! refuses to run if one of them was left out.

use std::collections::HashSet;
use std::fmt;

use arrow::array::{Array, ArrayRef, BooleanArray, Int32Array, Int64Array, StringArray};
use arrow::compute::and;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::{DemographyError, Result};
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::filter::error::{column, column_type_error};
use crate::schema::{Sex, Statistic};

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// Integer value, matched against Int32 and Int64 columns
    Int(i64),

    /// String value, matched against Utf8 columns
    String(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&String> for LiteralValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Sex> for LiteralValue {
    fn from(value: Sex) -> Self {
        Self::String(value.as_str().to_string())
    }
}

impl From<Statistic> for LiteralValue {
    fn from(value: Statistic) -> Self {
        Self::String(value.as_str().to_string())
    }
}

/// Represents a filter expression over one table
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column is in a set of values; an empty set matches nothing
    In(String, Vec<LiteralValue>),

    /// Column is not in a set of values; used to drop sentinel rows
    NotIn(String, Vec<LiteralValue>),

    /// Logical AND of expressions
    And(Vec<Expr>),
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::In(col, _) | Self::NotIn(col, _) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
        }
    }

    /// Column names constrained by a membership test, ignoring exclusions
    fn collect_selected_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::In(col, _) => {
                columns.insert(col.clone());
            }
            Self::NotIn(_, _) => {}
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_selected_columns(columns);
                }
            }
        }
    }
}

/// Evaluate an expression against a record batch
///
/// # Returns
/// A boolean array indicating which rows match the expression
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::In(col_name, values) => evaluate_membership(batch, col_name, values, false),
        Expr::NotIn(col_name, values) => evaluate_membership(batch, col_name, values, true),
        Expr::And(exprs) => {
            let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
            for expr in exprs {
                let mask = evaluate_expr(batch, expr)?;
                result = and(&result, &mask)?;
            }
            Ok(result)
        }
    }
}

/// Evaluates IN / NOT IN against a single column
///
/// Nulls never belong to the set.
fn evaluate_membership(
    batch: &RecordBatch,
    col_name: &str,
    values: &[LiteralValue],
    negate: bool,
) -> Result<BooleanArray> {
    let array = column(batch, col_name)?;
    let in_set = membership_mask(array, col_name, values)?;

    Ok(if negate {
        in_set.into_iter().map(|member| !member).collect::<Vec<_>>().into()
    } else {
        in_set.into()
    })
}

fn membership_mask(array: &ArrayRef, col_name: &str, values: &[LiteralValue]) -> Result<Vec<bool>> {
    if values.is_empty() {
        return Ok(vec![false; array.len()]);
    }

    if let Some(str_array) = array.as_any().downcast_ref::<StringArray>() {
        let mut str_values = FxHashSet::default();
        for value in values {
            match value {
                LiteralValue::String(s) => {
                    str_values.insert(s.as_str());
                }
                LiteralValue::Int(_) => return column_type_error(col_name, "integer"),
            }
        }
        return Ok((0..str_array.len())
            .map(|i| !str_array.is_null(i) && str_values.contains(str_array.value(i)))
            .collect());
    }

    let mut int_values = FxHashSet::default();
    for value in values {
        match value {
            LiteralValue::Int(n) => {
                int_values.insert(*n);
            }
            LiteralValue::String(_) => return column_type_error(col_name, "string"),
        }
    }

    if let Some(int_array) = array.as_any().downcast_ref::<Int32Array>() {
        Ok((0..int_array.len())
            .map(|i| !int_array.is_null(i) && int_values.contains(&i64::from(int_array.value(i))))
            .collect())
    } else if let Some(int_array) = array.as_any().downcast_ref::<Int64Array>() {
        Ok((0..int_array.len())
            .map(|i| !int_array.is_null(i) && int_values.contains(&int_array.value(i)))
            .collect())
    } else {
        column_type_error(col_name, "string or integer")
    }
}

/// Conjunction of membership predicates with explicitly required dimensions
///
/// ```
/// use demography::filter::SelectionFilter;
/// use demography::schema::{REGION, SEX, Sex};
///
/// let filter = SelectionFilter::requiring(&[REGION, SEX])
///     .is_in(REGION, ["Ontario"])
///     .is_in(SEX, [Sex::All]);
/// assert!(filter.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionFilter {
    required: Vec<String>,
    exprs: Vec<Expr>,
}

impl SelectionFilter {
    /// Create a filter that must constrain each of `dimensions`
    #[must_use]
    pub fn requiring(dimensions: &[&str]) -> Self {
        Self {
            required: dimensions.iter().map(|d| (*d).to_string()).collect(),
            exprs: Vec::new(),
        }
    }

    /// Keep rows whose `column` value is one of `values`
    #[must_use]
    pub fn is_in<V, I>(mut self, column: &str, values: I) -> Self
    where
        V: Into<LiteralValue>,
        I: IntoIterator<Item = V>,
    {
        self.exprs.push(Expr::In(
            column.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Keep rows whose `column` value equals `value`
    #[must_use]
    pub fn eq(self, column: &str, value: impl Into<LiteralValue>) -> Self {
        self.is_in(column, [value.into()])
    }

    /// Drop rows whose `column` value is one of `values`
    #[must_use]
    pub fn excluding<V, I>(mut self, column: &str, values: I) -> Self
    where
        V: Into<LiteralValue>,
        I: IntoIterator<Item = V>,
    {
        self.exprs.push(Expr::NotIn(
            column.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// The combined expression
    #[must_use]
    pub fn expr(&self) -> Expr {
        Expr::And(self.exprs.clone())
    }

    /// Check that every required dimension carries a membership predicate
    ///
    /// # Errors
    /// Returns `MissingDimension` naming the first dimension left out
    pub fn validate(&self) -> Result<()> {
        let mut selected = HashSet::new();
        for expr in &self.exprs {
            expr.collect_selected_columns(&mut selected);
        }

        match self.required.iter().find(|d| !selected.contains(*d)) {
            Some(missing) => Err(DemographyError::MissingDimension(missing.clone())),
            None => Ok(()),
        }
    }
}

impl BatchFilter for SelectionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        self.validate()?;
        let mask = evaluate_expr(batch, &self.expr())?;
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        let mut columns = self.expr().required_columns();
        columns.extend(self.required.iter().cloned());
        columns
    }
}

//! Bracket tables shared by the tax and HECS calculations.
//!
//! Both tables are sorted by ascending upper bound and end with a sentinel bound that is
//! effectively unbounded. They are scanned the same way but priced differently: income tax
//! is marginal (only the slice above the previous bound attracts the bracket rate), while
//! HECS is a step function (the whole income attracts the rate of the bracket it falls in).

use serde::{Deserialize, Serialize};

use super::RateTableError;

/// Smallest upper bound accepted as the closing "effectively unbounded" bracket.
pub const SENTINEL_UPPER_BOUND: f64 = 999_999_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: f64,
    pub rate: f64,
    /// Cumulative tax payable on all income up to the previous bracket's bound.
    pub base_tax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HecsBracket {
    pub upper_bound: f64,
    pub rate: f64,
}

/// Progressive income-tax brackets plus a flat levy on gross income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxTable {
    levy_rate: f64,
    brackets: Vec<TaxBracket>,
}

impl TaxTable {
    pub fn new(brackets: Vec<TaxBracket>, levy_rate: f64) -> Result<Self, RateTableError> {
        check_rate("tax levy", levy_rate)?;
        let bounds: Vec<(f64, f64)> = brackets
            .iter()
            .map(|bracket| (bracket.upper_bound, bracket.rate))
            .collect();
        check_brackets("tax", &bounds)?;

        Ok(Self {
            levy_rate,
            brackets,
        })
    }

    pub fn levy_rate(&self) -> f64 {
        self.levy_rate
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Marginal lookup: `(income - previous bound) * rate + base_tax`, plus the levy on
    /// the full income.
    pub fn tax(&self, income: f64) -> f64 {
        let index = bracket_index(self.brackets.iter().map(|b| b.upper_bound), income);
        let bracket = &self.brackets[index];
        let floor = match index {
            0 => 0.0,
            _ => self.brackets[index - 1].upper_bound,
        };

        let income_tax = (income - floor) * bracket.rate + bracket.base_tax;
        income_tax + income * self.levy_rate
    }
}

/// Stepped student-loan repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HecsSchedule {
    brackets: Vec<HecsBracket>,
}

impl HecsSchedule {
    pub fn new(brackets: Vec<HecsBracket>) -> Result<Self, RateTableError> {
        let bounds: Vec<(f64, f64)> = brackets
            .iter()
            .map(|bracket| (bracket.upper_bound, bracket.rate))
            .collect();
        check_brackets("hecs", &bounds)?;
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[HecsBracket] {
        &self.brackets
    }

    /// Step lookup: the entire income is multiplied by the matching bracket's rate.
    pub fn repayment(&self, income: f64) -> f64 {
        let index = bracket_index(self.brackets.iter().map(|b| b.upper_bound), income);
        income * self.brackets[index].rate
    }
}

/// First bracket whose upper bound is at least `income`; the last bracket catches
/// anything beyond the sentinel. Callers guarantee a non-empty table.
fn bracket_index(bounds: impl Iterator<Item = f64>, income: f64) -> usize {
    let mut last = 0;
    for (index, upper_bound) in bounds.enumerate() {
        if income <= upper_bound {
            return index;
        }
        last = index;
    }
    last
}

pub(crate) fn check_rate(table: &'static str, rate: f64) -> Result<(), RateTableError> {
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(RateTableError::RateOutOfRange { table, rate })
    }
}

fn check_brackets(table: &'static str, brackets: &[(f64, f64)]) -> Result<(), RateTableError> {
    let Some(&(last_bound, _)) = brackets.last() else {
        return Err(RateTableError::EmptyTable { table });
    };

    let mut previous = 0.0_f64;
    for &(upper_bound, rate) in brackets {
        if !upper_bound.is_finite() || upper_bound <= previous {
            return Err(RateTableError::UnsortedBrackets { table, upper_bound });
        }
        check_rate(table, rate)?;
        previous = upper_bound;
    }

    if last_bound < SENTINEL_UPPER_BOUND {
        return Err(RateTableError::MissingSentinel {
            table,
            upper_bound: last_bound,
        });
    }

    Ok(())
}

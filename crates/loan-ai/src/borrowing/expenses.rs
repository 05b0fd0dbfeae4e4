use serde::{Deserialize, Serialize};

use super::domain::{FinancialProfile, Frequency};
use super::income::annualize;
use crate::rates::{RateTableError, RateTables};

/// Annual servicing allowance charged against the full limit of revolving credit.
pub const CREDIT_LIMIT_SERVICING_RATE: f64 = 0.04;

/// Annualized expenses and the figures behind them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub rent_board: f64,
    /// Declared living expenses before the HEM floor.
    pub stated_living_expenses: f64,
    /// `max(stated, hem_benchmark)`; the figure used for servicing.
    pub living_expenses: f64,
    pub hem_benchmark: f64,
    pub credit_card_servicing: f64,
    pub loan_repayments: f64,
    pub hecs_repayment: f64,
    pub total: f64,
}

impl ExpenseBreakdown {
    pub fn monthly_hem_benchmark(&self) -> f64 {
        self.hem_benchmark / Frequency::Monthly.multiplier()
    }
}

/// Aggregate yearly expenses. HECS is looked up on after-tax household income and only
/// when the profile declares a liability.
pub fn aggregate(
    profile: &FinancialProfile,
    tables: &RateTables,
    after_tax_income: f64,
) -> Result<ExpenseBreakdown, RateTableError> {
    let hem_benchmark = tables
        .hem
        .annual(profile.household_type, profile.dependents)?;

    let rent_board = annualize(profile.monthly_rent_board, Frequency::Monthly);
    let stated_living_expenses = annualize(profile.monthly_living_expenses, Frequency::Monthly);
    let living_expenses = stated_living_expenses.max(hem_benchmark);
    let credit_card_servicing = profile.credit_card_limits * CREDIT_LIMIT_SERVICING_RATE;
    let loan_repayments = annualize(profile.monthly_loan_repayment, Frequency::Monthly);
    let hecs_repayment = if profile.has_hecs {
        tables.hecs.repayment(after_tax_income)
    } else {
        0.0
    };

    let total =
        rent_board + living_expenses + loan_repayments + credit_card_servicing + hecs_repayment;

    Ok(ExpenseBreakdown {
        rent_board,
        stated_living_expenses,
        living_expenses,
        hem_benchmark,
        credit_card_servicing,
        loan_repayments,
        hecs_repayment,
        total,
    })
}

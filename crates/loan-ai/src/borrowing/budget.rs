use serde::{Deserialize, Serialize};

/// Smallest deposit accepted, as a share of the purchase price.
pub const MINIMUM_DEPOSIT_PCT: f64 = 5.0;

/// How the buyer expresses their deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DepositInput {
    /// Share of the total purchase price, in percent.
    Percentage(f64),
    /// Cash amount on top of the borrowing power.
    Amount(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseBudget {
    pub total_budget: f64,
    pub deposit_amount: f64,
    pub loan_amount: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BudgetError {
    #[error("deposit of {0}% is below the 5% minimum")]
    PercentageBelowMinimum(f64),
    #[error("deposit of {deposit:.2} is below the minimum of {minimum:.2}")]
    AmountBelowMinimum { deposit: f64, minimum: f64 },
    #[error("deposit percentage must be below 100 (found {0})")]
    PercentageOutOfRange(f64),
    #[error("deposit must be a finite, non-negative number")]
    InvalidDeposit,
}

/// Purchase price reachable with `borrowing_power` plus the given deposit.
pub fn purchase_budget(
    borrowing_power: f64,
    deposit: DepositInput,
) -> Result<PurchaseBudget, BudgetError> {
    let (total_budget, deposit_amount) = match deposit {
        DepositInput::Percentage(pct) => {
            if !pct.is_finite() || pct < 0.0 {
                return Err(BudgetError::InvalidDeposit);
            }
            if pct >= 100.0 {
                return Err(BudgetError::PercentageOutOfRange(pct));
            }
            if pct < MINIMUM_DEPOSIT_PCT {
                return Err(BudgetError::PercentageBelowMinimum(pct));
            }
            let share = pct / 100.0;
            let total = (borrowing_power / (1.0 - share)).round();
            (total, (total * share).round())
        }
        DepositInput::Amount(amount) => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(BudgetError::InvalidDeposit);
            }
            let minimum = borrowing_power * MINIMUM_DEPOSIT_PCT / 100.0;
            if amount < minimum {
                return Err(BudgetError::AmountBelowMinimum {
                    deposit: amount,
                    minimum,
                });
            }
            ((borrowing_power + amount).round(), amount)
        }
    };

    Ok(PurchaseBudget {
        total_budget,
        deposit_amount,
        loan_amount: total_budget - deposit_amount,
    })
}

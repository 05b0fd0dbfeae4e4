use serde::{Deserialize, Serialize};

/// Percentage points added on top of the nominal rate when stress-testing serviceability.
pub const SERVICING_BUFFER: f64 = 0.03;

/// Net serviceable income together with the capacity and repayment it supports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityOutcome {
    pub net_income: f64,
    pub borrowing_power: f64,
    pub monthly_repayment: f64,
}

/// Borrowing capacity at the buffered rate and the indicative repayment at the nominal rate.
///
/// Negative net income and a zero term both short-circuit to a zero outcome. A net income that is
/// not finite carries no capacity either and is reported as zero.
pub fn assess(
    after_tax_income: f64,
    total_expenses: f64,
    interest_rate_pct: f64,
    term_years: u8,
) -> CapacityOutcome {
    let net_income = after_tax_income - total_expenses;
    if !net_income.is_finite() {
        return CapacityOutcome::default();
    }
    if net_income < 0.0 || term_years == 0 {
        return CapacityOutcome {
            net_income,
            borrowing_power: 0.0,
            monthly_repayment: 0.0,
        };
    }

    let buffered_rate = interest_rate_pct / 100.0 + SERVICING_BUFFER;
    let borrowing_power = annuity_present_value(net_income, buffered_rate, term_years).round();
    let monthly_repayment = monthly_repayment(borrowing_power, interest_rate_pct, term_years);

    CapacityOutcome {
        net_income,
        borrowing_power,
        monthly_repayment,
    }
}

/// Present value of `payment` received yearly for `term_years` at `rate`.
/// A zero rate is the undiscounted sum.
pub fn annuity_present_value(payment: f64, rate: f64, term_years: u8) -> f64 {
    let periods = f64::from(term_years);
    if rate == 0.0 {
        return payment * periods;
    }
    payment * (1.0 - (1.0 + rate).powf(-periods)) / rate
}

/// Fixed monthly payment amortizing `principal` at the nominal annual rate, rounded to cents.
pub fn monthly_repayment(principal: f64, interest_rate_pct: f64, term_years: u8) -> f64 {
    let months = f64::from(term_years) * 12.0;
    if months == 0.0 || principal <= 0.0 {
        return 0.0;
    }

    let monthly_rate = interest_rate_pct / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        principal * monthly_rate * growth / (growth - 1.0)
    };
    round_cents(payment)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::capacity::{self, CapacityOutcome};
use super::domain::{EmploymentType, FinancialProfile, LoanPurpose};
use super::expenses::{self, ExpenseBreakdown};
use super::income::IncomeBreakdown;
use super::tax::{household_tax, HouseholdTax};
use crate::rates::{RateTableError, RateTables};

/// Stateless calculator that derives a `CalculationResult` from a profile.
#[derive(Debug, Clone)]
pub struct BorrowingEngine {
    tables: Arc<RateTables>,
}

impl BorrowingEngine {
    pub fn new(tables: Arc<RateTables>) -> Self {
        Self { tables }
    }

    /// Compute a complete result. Only table gaps can fail; numeric degeneracies fall back
    /// to zero capacity.
    pub fn assess(&self, profile: &FinancialProfile) -> Result<CalculationResult, RateTableError> {
        let income = IncomeBreakdown::from_profile(profile);
        let tax = household_tax(&self.tables.tax, &income, profile.household_type);
        let expenses = expenses::aggregate(profile, &self.tables, tax.after_tax_income)?;
        let outcome = capacity::assess(
            tax.after_tax_income,
            expenses.total,
            profile.interest_rate_pct,
            profile.loan_term_years,
        );

        debug!(
            household_gross = income.household_gross(),
            after_tax = tax.after_tax_income,
            total_expenses = expenses.total,
            net_income = outcome.net_income,
            borrowing_power = outcome.borrowing_power,
            "borrowing capacity assessed"
        );

        Ok(CalculationResult::assemble(
            profile, income, tax, expenses, outcome,
        ))
    }
}

/// Everything derived from one profile submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub household_gross_income: f64,
    pub household_income_after_tax: f64,
    pub total_expenses: f64,
    pub stated_living_expenses: f64,
    pub living_expenses: f64,
    pub hem_benchmark: f64,
    pub monthly_hem_benchmark: f64,
    pub has_hecs: bool,
    pub yearly_hecs_repayment: f64,
    pub net_income: f64,
    pub borrowing_power: f64,
    pub loan_repayment: f64,
    pub employment_type: EmploymentType,
    pub loan_purpose: LoanPurpose,
    pub income: IncomeBreakdown,
    pub tax: HouseholdTax,
    pub expenses: ExpenseBreakdown,
}

impl CalculationResult {
    fn assemble(
        profile: &FinancialProfile,
        income: IncomeBreakdown,
        tax: HouseholdTax,
        expenses: ExpenseBreakdown,
        outcome: CapacityOutcome,
    ) -> Self {
        Self {
            household_gross_income: income.household_gross(),
            household_income_after_tax: tax.after_tax_income,
            total_expenses: expenses.total,
            stated_living_expenses: expenses.stated_living_expenses,
            living_expenses: expenses.living_expenses,
            hem_benchmark: expenses.hem_benchmark,
            monthly_hem_benchmark: expenses.monthly_hem_benchmark(),
            has_hecs: profile.has_hecs,
            yearly_hecs_repayment: expenses.hecs_repayment,
            net_income: outcome.net_income,
            borrowing_power: outcome.borrowing_power,
            loan_repayment: outcome.monthly_repayment,
            employment_type: profile.employment_type,
            loan_purpose: profile.loan_purpose,
            income,
            tax,
            expenses,
        }
    }

    /// Multi-line plain-text summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Household gross income:   {:>12.2}", self.household_gross_income),
            format!("After-tax income:         {:>12.2}", self.household_income_after_tax),
            format!(
                "Living expenses:          {:>12.2} (stated {:.2}, HEM {:.2})",
                self.living_expenses, self.stated_living_expenses, self.hem_benchmark
            ),
        ];
        if self.has_hecs {
            lines.push(format!(
                "HECS repayment:           {:>12.2}",
                self.yearly_hecs_repayment
            ));
        }
        lines.push(format!("Total expenses:           {:>12.2}", self.total_expenses));
        lines.push(format!("Net serviceable income:   {:>12.2}", self.net_income));
        lines.push(format!("Borrowing power:          {:>12.0}", self.borrowing_power));
        lines.push(format!("Monthly repayment:        {:>12.2}", self.loan_repayment));
        lines.push(format!(
            "Employment / purpose:     {} / {}",
            self.employment_type.label(),
            self.loan_purpose.label()
        ));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borrowing::domain::{
        BorrowerIncome, Frequency, HouseholdType, IncomeStream, Jurisdiction,
    };
    use crate::borrowing::ProfileGuard;
    use crate::borrowing::ProfileSubmission;

    fn engine() -> BorrowingEngine {
        BorrowingEngine::new(Arc::new(RateTables::standard().expect("standard tables")))
    }

    fn scenario() -> FinancialProfile {
        FinancialProfile {
            primary: BorrowerIncome {
                salary: IncomeStream::new(8_000.0, Frequency::Monthly),
                other: IncomeStream::none(),
            },
            secondary: BorrowerIncome::none(),
            weekly_rental_income: 0.0,
            monthly_living_expenses: 2_000.0,
            monthly_rent_board: 0.0,
            dependents: 0,
            credit_card_limits: 5_000.0,
            monthly_loan_repayment: 0.0,
            has_hecs: false,
            age: 30,
            employment_type: EmploymentType::FullTime,
            loan_purpose: LoanPurpose::OwnerOccupied,
            loan_term_years: 30,
            interest_rate_pct: 6.0,
            household_type: HouseholdType::Individual,
            first_time_buyer: true,
            jurisdiction: Jurisdiction::Nsw,
        }
    }

    #[test]
    fn salaried_individual_matches_recomputed_figures() {
        let result = engine().assess(&scenario()).expect("assesses");

        let gross = 8_000.0 * 12.0;
        let tax = (gross - 45_000.0) * 0.30 + 4_288.0 + gross * 0.02;
        let after_tax = gross - tax;
        let expenses = f64::max(2_000.0 * 12.0, 21_600.0) + 5_000.0 * 0.04;
        let net = after_tax - expenses;
        let buffered = 0.06 + 0.03;
        let power = (net * (1.0 - (1.0f64 + buffered).powf(-30.0)) / buffered).round();
        let i = 0.06 / 12.0;
        let growth = (1.0f64 + i).powf(360.0);
        let repayment = ((power * i * growth / (growth - 1.0)) * 100.0).round() / 100.0;

        assert_eq!(result.household_gross_income, gross);
        assert!((result.household_income_after_tax - after_tax).abs() < 1e-6);
        assert!((result.total_expenses - expenses).abs() < 1e-9);
        assert_eq!(result.stated_living_expenses, 24_000.0);
        assert_eq!(result.living_expenses, 24_000.0);
        assert_eq!(result.hem_benchmark, 21_600.0);
        assert_eq!(result.monthly_hem_benchmark, 1_800.0);
        assert!((result.net_income - net).abs() < 1e-6);
        assert_eq!(result.borrowing_power, power);
        assert_eq!(result.loan_repayment, repayment);
        assert!(!result.has_hecs);
        assert_eq!(result.yearly_hecs_repayment, 0.0);
    }

    #[test]
    fn net_income_of_exactly_zero_borrows_nothing() {
        let mut profile = scenario();
        profile.monthly_living_expenses = 0.0;
        profile.credit_card_limits = 0.0;
        // In the 16% bracket after-tax income is 0.82 * gross + 2_912; solve for the
        // individual HEM floor of 21_600.
        let gross = (21_600.0 - 2_912.0) / 0.82;
        profile.primary.salary = IncomeStream::new(gross, Frequency::Yearly);

        let result = engine().assess(&profile).expect("assesses");
        assert_eq!(result.total_expenses, 21_600.0);
        assert!(result.net_income.abs() < 1e-6);
        assert_eq!(result.borrowing_power, 0.0);
        assert_eq!(result.loan_repayment, 0.0);
    }

    #[test]
    fn repeated_assessment_is_identical() {
        let engine = engine();
        let profile = scenario();
        let first = engine.assess(&profile).expect("assesses");
        let second = engine.assess(&profile).expect("assesses");
        assert_eq!(first, second);
    }

    #[test]
    fn expenses_beyond_income_never_produce_negative_capacity() {
        let mut profile = scenario();
        profile.monthly_rent_board = 9_000.0;
        let result = engine().assess(&profile).expect("assesses");
        assert!(result.net_income < 0.0);
        assert_eq!(result.borrowing_power, 0.0);
        assert_eq!(result.loan_repayment, 0.0);
    }

    #[test]
    fn guarded_submission_round_trips_through_engine() {
        let submission: ProfileSubmission = serde_json::from_value(serde_json::json!({
            "gross_income": 8000.0,
            "income_frequency": "monthly",
            "living_expenses": 2000.0,
            "credit_card_limits": 5000.0,
            "age": 30,
            "employment_type": "Full-time",
            "loan_purpose": "Owner-occupied",
            "loan_term": 30,
            "interest_rate": 6.0,
            "household_type": "Individual",
            "jurisdiction": "NSW"
        }))
        .expect("submission deserializes");
        let profile = ProfileGuard
            .profile_from_submission(submission)
            .expect("valid submission");

        let engine = engine();
        assert_eq!(
            engine.assess(&profile).expect("assesses"),
            engine.assess(&scenario()).expect("assesses")
        );
    }

    #[test]
    fn summary_mentions_capacity() {
        let result = engine().assess(&scenario()).expect("assesses");
        let summary = result.summary();
        assert!(summary.contains("Borrowing power"));
        assert!(summary.contains("full_time / owner_occupied"));
    }
}

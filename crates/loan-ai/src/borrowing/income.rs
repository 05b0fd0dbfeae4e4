use serde::{Deserialize, Serialize};

use super::domain::{FinancialProfile, Frequency, HouseholdType, IncomeStream, LoanPurpose};

/// Share of gross rent kept after maintenance and vacancy allowances.
pub const RENTAL_INCOME_RETAINED: f64 = 0.85;

pub fn annualize(amount: f64, frequency: Frequency) -> f64 {
    amount * frequency.multiplier()
}

fn annualize_stream(stream: IncomeStream) -> f64 {
    annualize(stream.amount, stream.frequency)
}

/// Yearly gross income per borrower and stream.
///
/// Rental income is already folded into `primary_other` / `secondary_other`; `rental` is kept
/// for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub primary_salary: f64,
    pub primary_other: f64,
    pub secondary_salary: f64,
    pub secondary_other: f64,
    pub rental: f64,
}

impl IncomeBreakdown {
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        let rental = annual_rental_income(profile);

        let primary_salary = annualize_stream(profile.primary.salary);
        let primary_other = annualize_stream(profile.primary.other);

        match profile.household_type {
            HouseholdType::Individual => Self {
                primary_salary,
                primary_other: primary_other + rental,
                secondary_salary: 0.0,
                secondary_other: 0.0,
                rental,
            },
            HouseholdType::Couple => {
                let half = rental / 2.0;
                Self {
                    primary_salary,
                    primary_other: primary_other + half,
                    secondary_salary: annualize_stream(profile.secondary.salary),
                    secondary_other: annualize_stream(profile.secondary.other) + half,
                    rental,
                }
            }
        }
    }

    pub fn primary_taxable(&self) -> f64 {
        self.primary_salary + self.primary_other
    }

    pub fn secondary_taxable(&self) -> f64 {
        self.secondary_salary + self.secondary_other
    }

    /// Gross household income across all four streams, as used for scheme income caps.
    pub fn household_gross(&self) -> f64 {
        self.primary_taxable() + self.secondary_taxable()
    }
}

/// Weekly rent annualized and haircut; zero unless the loan is for an investment.
pub fn annual_rental_income(profile: &FinancialProfile) -> f64 {
    match profile.loan_purpose {
        LoanPurpose::Investor => {
            annualize(profile.weekly_rental_income, Frequency::Weekly) * RENTAL_INCOME_RETAINED
        }
        LoanPurpose::OwnerOccupied => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borrowing::domain::{
        BorrowerIncome, EmploymentType, FinancialProfile, Jurisdiction,
    };
    use proptest::prelude::*;

    fn profile(household_type: HouseholdType, loan_purpose: LoanPurpose) -> FinancialProfile {
        FinancialProfile {
            primary: BorrowerIncome {
                salary: IncomeStream::new(2_000.0, Frequency::Weekly),
                other: IncomeStream::new(500.0, Frequency::Monthly),
            },
            secondary: BorrowerIncome {
                salary: IncomeStream::new(60_000.0, Frequency::Yearly),
                other: IncomeStream::new(100.0, Frequency::Weekly),
            },
            weekly_rental_income: 600.0,
            monthly_living_expenses: 3_000.0,
            monthly_rent_board: 0.0,
            dependents: 1,
            credit_card_limits: 0.0,
            monthly_loan_repayment: 0.0,
            has_hecs: false,
            age: 40,
            employment_type: EmploymentType::FullTime,
            loan_purpose,
            loan_term_years: 30,
            interest_rate_pct: 6.0,
            household_type,
            first_time_buyer: false,
            jurisdiction: Jurisdiction::Vic,
        }
    }

    #[test]
    fn individual_ignores_secondary_borrower() {
        let income = IncomeBreakdown::from_profile(&profile(
            HouseholdType::Individual,
            LoanPurpose::OwnerOccupied,
        ));

        assert_eq!(income.primary_salary, 104_000.0);
        assert_eq!(income.primary_other, 6_000.0);
        assert_eq!(income.secondary_salary, 0.0);
        assert_eq!(income.secondary_other, 0.0);
        assert_eq!(income.rental, 0.0);
        assert_eq!(income.household_gross(), 110_000.0);
    }

    #[test]
    fn investor_rent_goes_to_primary_for_individuals() {
        let income =
            IncomeBreakdown::from_profile(&profile(HouseholdType::Individual, LoanPurpose::Investor));

        let rental = 600.0 * 52.0 * 0.85;
        assert!((income.rental - rental).abs() < 1e-9);
        assert!((income.primary_other - (6_000.0 + rental)).abs() < 1e-9);
        assert_eq!(income.secondary_other, 0.0);
    }

    #[test]
    fn investor_rent_splits_evenly_for_couples() {
        let income =
            IncomeBreakdown::from_profile(&profile(HouseholdType::Couple, LoanPurpose::Investor));

        let half = 600.0 * 52.0 * 0.85 / 2.0;
        assert!((income.primary_other - (6_000.0 + half)).abs() < 1e-9);
        assert!((income.secondary_other - (5_200.0 + half)).abs() < 1e-9);
        assert_eq!(income.secondary_salary, 60_000.0);
    }

    #[test]
    fn owner_occupied_rent_contributes_nothing() {
        let couple = profile(HouseholdType::Couple, LoanPurpose::OwnerOccupied);
        assert_eq!(annual_rental_income(&couple), 0.0);
        let income = IncomeBreakdown::from_profile(&couple);
        assert_eq!(income.primary_other, 6_000.0);
        assert_eq!(income.secondary_other, 5_200.0);
    }

    fn frequency() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Weekly),
            Just(Frequency::Monthly),
            Just(Frequency::Yearly),
        ]
    }

    proptest! {
        #[test]
        fn annualize_is_linear(amount in 0.0f64..1_000_000.0, scale in 0.0f64..10.0, frequency in frequency()) {
            let scaled = annualize(amount * scale, frequency);
            let expected = annualize(amount, frequency) * scale;
            prop_assert!((scaled - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }

        #[test]
        fn annualize_orders_by_multiplier(amount in 0.0f64..1_000_000.0) {
            let weekly = annualize(amount, Frequency::Weekly);
            let monthly = annualize(amount, Frequency::Monthly);
            let yearly = annualize(amount, Frequency::Yearly);
            prop_assert!(weekly >= monthly && monthly >= yearly);
        }

        #[test]
        fn individual_secondary_streams_are_zero(salary in 0.0f64..500_000.0, other in 0.0f64..100_000.0) {
            let mut individual = profile(HouseholdType::Individual, LoanPurpose::Investor);
            individual.secondary.salary = IncomeStream::new(salary, Frequency::Yearly);
            individual.secondary.other = IncomeStream::new(other, Frequency::Monthly);
            let income = IncomeBreakdown::from_profile(&individual);
            prop_assert_eq!(income.secondary_salary, 0.0);
            prop_assert_eq!(income.secondary_other, 0.0);
        }

        #[test]
        fn couple_rental_halves_sum_to_total(weekly_rent in 0.0f64..5_000.0) {
            let mut couple = profile(HouseholdType::Couple, LoanPurpose::Investor);
            couple.weekly_rental_income = weekly_rent;
            let income = IncomeBreakdown::from_profile(&couple);
            let primary_share = income.primary_other - 6_000.0;
            let secondary_share = income.secondary_other - 5_200.0;
            prop_assert!((primary_share - secondary_share).abs() < 1e-6);
            prop_assert!((primary_share + secondary_share - income.rental).abs() < 1e-6);
        }
    }
}

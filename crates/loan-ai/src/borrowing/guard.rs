use std::str::FromStr;

use super::domain::{
    BorrowerIncome, FinancialProfile, Frequency, IncomeStream, ProfileSubmission, UnrecognizedValue,
};

/// Largest amount accepted for any monetary field, whatever its frequency.
pub const MAX_AMOUNT: f64 = 1.0e12;

/// Highest nominal interest rate accepted, in percent.
pub const MAX_INTEREST_RATE_PCT: f64 = 100.0;

/// Validation errors raised before a submission reaches the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("{field} must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("{field} exceeds the accepted maximum of {maximum} (found {value})")]
    AmountTooLarge {
        field: &'static str,
        value: f64,
        maximum: f64,
    },
    #[error("{field} has unrecognized frequency '{value}' (expected weekly, monthly or yearly)")]
    UnknownFrequency { field: &'static str, value: String },
    #[error("unrecognized household type '{0}' (expected individual or couple)")]
    UnknownHouseholdType(String),
    #[error("unrecognized loan purpose '{0}' (expected owner_occupied or investor)")]
    UnknownLoanPurpose(String),
    #[error("unrecognized employment type '{0}'")]
    UnknownEmploymentType(String),
    #[error("unrecognized jurisdiction '{0}'")]
    UnknownJurisdiction(String),
}

/// Guard responsible for producing `FinancialProfile` instances from raw submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGuard;

impl ProfileGuard {
    /// Convert an inbound submission into a validated profile.
    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<FinancialProfile, ProfileViolation> {
        let household_type = parse(
            &submission.household_type,
            ProfileViolation::UnknownHouseholdType,
        )?;
        let loan_purpose = parse(&submission.loan_purpose, ProfileViolation::UnknownLoanPurpose)?;
        let employment_type = parse(
            &submission.employment_type,
            ProfileViolation::UnknownEmploymentType,
        )?;
        let jurisdiction = parse(&submission.jurisdiction, ProfileViolation::UnknownJurisdiction)?;

        let primary = BorrowerIncome {
            salary: stream(
                "gross_income",
                submission.gross_income,
                "income_frequency",
                &submission.income_frequency,
            )?,
            other: stream(
                "other_income",
                submission.other_income,
                "other_income_frequency",
                &submission.other_income_frequency,
            )?,
        };
        let secondary = BorrowerIncome {
            salary: stream(
                "second_person_income",
                submission.second_person_income,
                "second_person_income_frequency",
                &submission.second_person_income_frequency,
            )?,
            other: stream(
                "second_person_other_income",
                submission.second_person_other_income,
                "second_person_other_income_frequency",
                &submission.second_person_other_income_frequency,
            )?,
        };

        Ok(FinancialProfile {
            primary,
            secondary,
            weekly_rental_income: amount("rental_income", submission.rental_income)?,
            monthly_living_expenses: amount("living_expenses", submission.living_expenses)?,
            monthly_rent_board: amount("rent_board", submission.rent_board)?,
            dependents: submission.dependents,
            credit_card_limits: amount("credit_card_limits", submission.credit_card_limits)?,
            monthly_loan_repayment: amount("loan_repayment", submission.loan_repayment)?,
            has_hecs: submission.has_hecs,
            age: submission.age,
            employment_type,
            loan_purpose,
            loan_term_years: submission.loan_term,
            interest_rate_pct: interest_rate(submission.interest_rate)?,
            household_type,
            first_time_buyer: submission.first_time_buyer,
            jurisdiction,
        })
    }
}

fn parse<T>(raw: &str, reject: fn(String) -> ProfileViolation) -> Result<T, ProfileViolation>
where
    T: FromStr<Err = UnrecognizedValue>,
{
    raw.parse::<T>()
        .map_err(|UnrecognizedValue(value)| reject(value))
}

fn amount(field: &'static str, value: f64) -> Result<f64, ProfileViolation> {
    if !value.is_finite() {
        return Err(ProfileViolation::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(ProfileViolation::NegativeAmount { field, value });
    }
    capped(field, value, MAX_AMOUNT)
}

fn interest_rate(value: f64) -> Result<f64, ProfileViolation> {
    let rate = amount("interest_rate", value)?;
    capped("interest_rate", rate, MAX_INTEREST_RATE_PCT)
}

fn capped(field: &'static str, value: f64, maximum: f64) -> Result<f64, ProfileViolation> {
    if value > maximum {
        return Err(ProfileViolation::AmountTooLarge {
            field,
            value,
            maximum,
        });
    }
    Ok(value)
}

fn stream(
    field: &'static str,
    value: f64,
    frequency_field: &'static str,
    frequency: &str,
) -> Result<IncomeStream, ProfileViolation> {
    let amount = amount(field, value)?;
    let frequency = frequency
        .parse::<Frequency>()
        .map_err(|UnrecognizedValue(value)| ProfileViolation::UnknownFrequency {
            field: frequency_field,
            value,
        })?;
    Ok(IncomeStream::new(amount, frequency))
}

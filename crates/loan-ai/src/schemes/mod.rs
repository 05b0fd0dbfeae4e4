//! Government home-buyer scheme eligibility.
//!
//! Schemes come from the rate-table registry; each one lists the requirement keys it checks.
//! Every registered scheme is reported with a per-requirement verdict so callers can show
//! partial eligibility.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::borrowing::{FinancialProfile, Jurisdiction, LoanPurpose};
use crate::rates::{RateTableError, RateTables, RequirementKey, SchemeRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequirementCheck {
    pub key: RequirementKey,
    pub label: &'static str,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeEligibility {
    pub name: String,
    pub eligibility_description: String,
    pub offer: String,
    pub requirements: Vec<RequirementCheck>,
}

impl SchemeEligibility {
    /// True when every requirement is met.
    pub fn is_eligible(&self) -> bool {
        self.requirements.iter().all(|check| check.satisfied)
    }
}

#[derive(Debug, Clone)]
pub struct SchemeEvaluator {
    tables: Arc<RateTables>,
}

impl SchemeEvaluator {
    pub fn new(tables: Arc<RateTables>) -> Self {
        Self { tables }
    }

    /// Evaluate every scheme registered under `jurisdiction`, in registry order.
    pub fn eligible_schemes(
        &self,
        jurisdiction: Jurisdiction,
        profile: &FinancialProfile,
        household_income: f64,
    ) -> Result<Vec<SchemeEligibility>, RateTableError> {
        let schemes = self.tables.schemes.schemes_for(jurisdiction)?;
        let evaluated = schemes
            .iter()
            .map(|scheme| evaluate(scheme, profile, household_income))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            jurisdiction = %jurisdiction,
            schemes = evaluated.len(),
            eligible = evaluated.iter().filter(|scheme| scheme.is_eligible()).count(),
            "schemes evaluated"
        );
        Ok(evaluated)
    }
}

fn evaluate(
    scheme: &SchemeRule,
    profile: &FinancialProfile,
    household_income: f64,
) -> Result<SchemeEligibility, RateTableError> {
    let requirements = scheme
        .requirements
        .iter()
        .map(|&key| {
            let satisfied = match key {
                RequirementKey::FirstTimeBuyer => profile.first_time_buyer,
                RequirementKey::HouseholdIncomeCeiling => {
                    household_income <= scheme.income_ceiling_for(profile.household_type)?
                }
                RequirementKey::OwnerOccupied => {
                    profile.loan_purpose == LoanPurpose::OwnerOccupied
                }
            };
            Ok(RequirementCheck {
                key,
                label: key.label(),
                satisfied,
            })
        })
        .collect::<Result<Vec<_>, RateTableError>>()?;

    Ok(SchemeEligibility {
        name: scheme.name.clone(),
        eligibility_description: scheme.eligibility_description.clone(),
        offer: scheme.offer.clone(),
        requirements,
    })
}

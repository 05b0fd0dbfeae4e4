use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RateTableError;
use crate::borrowing::{HouseholdType, Jurisdiction};

/// Eligibility checks a scheme can require, evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKey {
    FirstTimeBuyer,
    HouseholdIncomeCeiling,
    OwnerOccupied,
}

impl RequirementKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstTimeBuyer => "First home buyer",
            Self::HouseholdIncomeCeiling => "Household income within the scheme cap",
            Self::OwnerOccupied => "Buying a home to live in",
        }
    }
}

/// Household income caps, one per household type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeCeiling {
    #[serde(default)]
    pub individual: Option<f64>,
    #[serde(default)]
    pub couple: Option<f64>,
}

impl IncomeCeiling {
    pub fn for_household(&self, household: HouseholdType) -> Option<f64> {
        match household {
            HouseholdType::Individual => self.individual,
            HouseholdType::Couple => self.couple,
        }
    }
}

/// A government assistance scheme and the rule data used to assess it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRule {
    pub name: String,
    pub eligibility_description: String,
    pub offer: String,
    pub requirements: Vec<RequirementKey>,
    #[serde(default)]
    pub income_ceiling: Option<IncomeCeiling>,
}

impl SchemeRule {
    pub fn income_ceiling_for(&self, household: HouseholdType) -> Result<f64, RateTableError> {
        self.income_ceiling
            .as_ref()
            .and_then(|ceiling| ceiling.for_household(household))
            .ok_or_else(|| RateTableError::MissingIncomeCeiling {
                scheme: self.name.clone(),
                household,
            })
    }
}

/// Registry rows as they appear in the table document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionSchemes {
    pub jurisdiction: Jurisdiction,
    pub schemes: Vec<SchemeRule>,
}

/// Schemes available per jurisdiction, in registry declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemeRegistry {
    by_jurisdiction: BTreeMap<Jurisdiction, Vec<SchemeRule>>,
}

impl SchemeRegistry {
    /// Every scheme that checks the income ceiling must declare one for both household types.
    pub fn new(rows: Vec<JurisdictionSchemes>) -> Result<Self, RateTableError> {
        let mut by_jurisdiction: BTreeMap<Jurisdiction, Vec<SchemeRule>> = BTreeMap::new();

        for row in rows {
            for scheme in &row.schemes {
                if scheme
                    .requirements
                    .contains(&RequirementKey::HouseholdIncomeCeiling)
                {
                    for household in HouseholdType::ordered() {
                        let ceiling = scheme.income_ceiling_for(household)?;
                        if !ceiling.is_finite() || ceiling < 0.0 {
                            return Err(RateTableError::InvalidIncomeCeiling {
                                scheme: scheme.name.clone(),
                                household,
                                ceiling,
                            });
                        }
                    }
                }
            }
            by_jurisdiction
                .entry(row.jurisdiction)
                .or_default()
                .extend(row.schemes);
        }

        Ok(Self { by_jurisdiction })
    }

    pub fn schemes_for(&self, jurisdiction: Jurisdiction) -> Result<&[SchemeRule], RateTableError> {
        self.by_jurisdiction
            .get(&jurisdiction)
            .map(Vec::as_slice)
            .ok_or(RateTableError::MissingJurisdiction(jurisdiction))
    }

    pub fn jurisdictions(&self) -> impl Iterator<Item = Jurisdiction> + '_ {
        self.by_jurisdiction.keys().copied()
    }
}

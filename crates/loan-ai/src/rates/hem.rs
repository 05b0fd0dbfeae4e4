use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RateTableError;
use crate::borrowing::HouseholdType;

/// Dependent counts above this share the top benchmark.
pub const MAX_HEM_DEPENDENTS: u8 = 3;

/// One row of the household expenditure measure table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HemEntry {
    pub household: HouseholdType,
    pub dependents: u8,
    pub annual: f64,
}

/// Annual living-expense floor keyed by household type and clamped dependent count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HemBenchmarks {
    entries: BTreeMap<(HouseholdType, u8), f64>,
}

impl HemBenchmarks {
    /// Build the table, requiring a finite non-negative benchmark for every household type
    /// at every dependent count up to [`MAX_HEM_DEPENDENTS`].
    pub fn new(entries: Vec<HemEntry>) -> Result<Self, RateTableError> {
        let mut table = BTreeMap::new();
        for entry in entries {
            if !entry.annual.is_finite() || entry.annual < 0.0 {
                return Err(RateTableError::InvalidHemBenchmark {
                    household: entry.household,
                    dependents: entry.dependents,
                    annual: entry.annual,
                });
            }
            table.insert((entry.household, entry.dependents), entry.annual);
        }

        let benchmarks = Self { entries: table };
        for household in HouseholdType::ordered() {
            for dependents in 0..=MAX_HEM_DEPENDENTS {
                benchmarks.annual(household, dependents)?;
            }
        }

        Ok(benchmarks)
    }

    /// Annual benchmark; dependent counts above [`MAX_HEM_DEPENDENTS`] are clamped.
    pub fn annual(&self, household: HouseholdType, dependents: u8) -> Result<f64, RateTableError> {
        let clamped = dependents.min(MAX_HEM_DEPENDENTS);
        self.entries
            .get(&(household, clamped))
            .copied()
            .ok_or(RateTableError::MissingHemBenchmark {
                household,
                dependents: clamped,
            })
    }
}

//! Process-wide lookup data: tax brackets, HECS schedule, HEM benchmarks and the scheme
//! registry. Loaded once at startup and shared read-only behind an `Arc`.

mod brackets;
mod hem;
mod registry;

pub use brackets::{HecsBracket, HecsSchedule, TaxBracket, TaxTable, SENTINEL_UPPER_BOUND};
pub use hem::{HemBenchmarks, HemEntry, MAX_HEM_DEPENDENTS};
pub use registry::{
    IncomeCeiling, JurisdictionSchemes, RequirementKey, SchemeRegistry, SchemeRule,
};

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::borrowing::{HouseholdType, Jurisdiction};
use crate::config::RatesConfig;

const STANDARD_TABLES: &str = include_str!("default_tables.json");

/// Defects in the lookup data. These indicate a broken table file, never bad user input.
#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("failed to read rate tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("rate tables are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{table} table has no brackets")]
    EmptyTable { table: &'static str },
    #[error("{table} brackets must ascend strictly (found bound {upper_bound})")]
    UnsortedBrackets {
        table: &'static str,
        upper_bound: f64,
    },
    #[error("{table} table must end with an unbounded sentinel bracket (last bound {upper_bound})")]
    MissingSentinel {
        table: &'static str,
        upper_bound: f64,
    },
    #[error("{table} rate {rate} is outside 0..=1")]
    RateOutOfRange { table: &'static str, rate: f64 },
    #[error("no HEM benchmark for {household:?} household with {dependents} dependent(s)")]
    MissingHemBenchmark {
        household: HouseholdType,
        dependents: u8,
    },
    #[error("HEM benchmark for {household:?} household with {dependents} dependent(s) is invalid ({annual})")]
    InvalidHemBenchmark {
        household: HouseholdType,
        dependents: u8,
        annual: f64,
    },
    #[error("no scheme registry entry for jurisdiction {0}")]
    MissingJurisdiction(Jurisdiction),
    #[error("scheme '{scheme}' has no income ceiling for {household:?} households")]
    MissingIncomeCeiling {
        scheme: String,
        household: HouseholdType,
    },
    #[error("scheme '{scheme}' income ceiling for {household:?} households is invalid ({ceiling})")]
    InvalidIncomeCeiling {
        scheme: String,
        household: HouseholdType,
        ceiling: f64,
    },
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    tax: TaxSection,
    hecs: HecsSection,
    hem: Vec<HemEntry>,
    schemes: Vec<JurisdictionSchemes>,
}

#[derive(Debug, Deserialize)]
struct TaxSection {
    levy_rate: f64,
    brackets: Vec<TaxBracket>,
}

#[derive(Debug, Deserialize)]
struct HecsSection {
    brackets: Vec<HecsBracket>,
}

/// Validated lookup tables consumed by the borrowing engine and scheme evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    pub tax: TaxTable,
    pub hecs: HecsSchedule,
    pub hem: HemBenchmarks,
    pub schemes: SchemeRegistry,
}

impl RateTables {
    /// The compiled-in resident tables.
    pub fn standard() -> Result<Self, RateTableError> {
        Self::from_json_str(STANDARD_TABLES)
    }

    /// Resolve tables from configuration: an explicit file when configured, otherwise the
    /// compiled-in set.
    pub fn load(config: &RatesConfig) -> Result<Self, RateTableError> {
        match &config.tables_path {
            Some(path) => {
                let tables = Self::from_path(path)?;
                info!(path = %path.display(), "loaded rate tables from file");
                Ok(tables)
            }
            None => Self::standard(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let document: TableDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RateTableError> {
        let document: TableDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    fn from_document(document: TableDocument) -> Result<Self, RateTableError> {
        Ok(Self {
            tax: TaxTable::new(document.tax.brackets, document.tax.levy_rate)?,
            hecs: HecsSchedule::new(document.hecs.brackets)?,
            hem: HemBenchmarks::new(document.hem)?,
            schemes: SchemeRegistry::new(document.schemes)?,
        })
    }
}

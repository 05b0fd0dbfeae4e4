use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Normalise a free-form enumeration value: `Owner-occupied`, `owner occupied` and
/// `OWNER_OCCUPIED` all become `owner_occupied`.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Marker error for enumeration parsing; the guard attaches field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedValue(pub String);

/// How often a declared amount is received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Periods per year.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
            Self::Yearly => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annually" | "annual" => Ok(Self::Yearly),
            _ => Err(UnrecognizedValue(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    Individual,
    Couple,
}

impl HouseholdType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Individual, Self::Couple]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Couple => "couple",
        }
    }
}

impl FromStr for HouseholdType {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "individual" | "single" => Ok(Self::Individual),
            "couple" | "joint" => Ok(Self::Couple),
            _ => Err(UnrecognizedValue(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    OwnerOccupied,
    Investor,
}

impl LoanPurpose {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OwnerOccupied => "owner_occupied",
            Self::Investor => "investor",
        }
    }
}

impl FromStr for LoanPurpose {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "owner_occupied" | "owner_occupier" => Ok(Self::OwnerOccupied),
            "investor" | "investment" => Ok(Self::Investor),
            _ => Err(UnrecognizedValue(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Casual,
    Contract,
    SelfEmployed,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Casual => "casual",
            Self::Contract => "contract",
            Self::SelfEmployed => "self_employed",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "full_time" | "fulltime" => Ok(Self::FullTime),
            "part_time" | "parttime" => Ok(Self::PartTime),
            "casual" => Ok(Self::Casual),
            "contract" | "contractor" => Ok(Self::Contract),
            "self_employed" => Ok(Self::SelfEmployed),
            _ => Err(UnrecognizedValue(raw.to_string())),
        }
    }
}

/// Australian state or territory code; selects the scheme registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl Jurisdiction {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Nsw => "NSW",
            Self::Vic => "VIC",
            Self::Qld => "QLD",
            Self::Wa => "WA",
            Self::Sa => "SA",
            Self::Tas => "TAS",
            Self::Act => "ACT",
            Self::Nt => "NT",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "nsw" => Ok(Self::Nsw),
            "vic" => Ok(Self::Vic),
            "qld" => Ok(Self::Qld),
            "wa" => Ok(Self::Wa),
            "sa" => Ok(Self::Sa),
            "tas" => Ok(Self::Tas),
            "act" => Ok(Self::Act),
            "nt" => Ok(Self::Nt),
            _ => Err(UnrecognizedValue(raw.to_string())),
        }
    }
}

/// A declared amount together with how often it is received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub amount: f64,
    pub frequency: Frequency,
}

impl IncomeStream {
    pub const fn new(amount: f64, frequency: Frequency) -> Self {
        Self { amount, frequency }
    }

    pub const fn none() -> Self {
        Self::new(0.0, Frequency::Yearly)
    }
}

/// Salary and other income declared for one borrower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorrowerIncome {
    pub salary: IncomeStream,
    pub other: IncomeStream,
}

impl BorrowerIncome {
    pub const fn none() -> Self {
        Self {
            salary: IncomeStream::none(),
            other: IncomeStream::none(),
        }
    }
}

/// Validated financial details for one borrowing application. Immutable once accepted.
///
/// All monetary fields are finite and non-negative; every enumeration is a closed variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub primary: BorrowerIncome,
    /// Ignored unless `household_type` is [`HouseholdType::Couple`].
    pub secondary: BorrowerIncome,
    /// Only counted for [`LoanPurpose::Investor`].
    pub weekly_rental_income: f64,
    pub monthly_living_expenses: f64,
    pub monthly_rent_board: f64,
    pub dependents: u8,
    pub credit_card_limits: f64,
    pub monthly_loan_repayment: f64,
    pub has_hecs: bool,
    pub age: u8,
    pub employment_type: EmploymentType,
    pub loan_purpose: LoanPurpose,
    pub loan_term_years: u8,
    pub interest_rate_pct: f64,
    pub household_type: HouseholdType,
    pub first_time_buyer: bool,
    pub jurisdiction: Jurisdiction,
}

fn default_frequency() -> String {
    Frequency::Yearly.label().to_string()
}

/// Inbound, loosely-typed profile as submitted by callers (JSON body or CSV row).
///
/// Enumerations arrive as strings and are only trusted after
/// [`ProfileGuard`](super::guard::ProfileGuard) has converted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub gross_income: f64,
    pub income_frequency: String,
    #[serde(default)]
    pub other_income: f64,
    #[serde(default = "default_frequency")]
    pub other_income_frequency: String,
    #[serde(default)]
    pub second_person_income: f64,
    #[serde(default = "default_frequency")]
    pub second_person_income_frequency: String,
    #[serde(default)]
    pub second_person_other_income: f64,
    #[serde(default = "default_frequency")]
    pub second_person_other_income_frequency: String,
    /// Weekly rent received from the investment property.
    #[serde(default)]
    pub rental_income: f64,
    pub living_expenses: f64,
    #[serde(default)]
    pub rent_board: f64,
    #[serde(default)]
    pub dependents: u8,
    #[serde(default)]
    pub credit_card_limits: f64,
    #[serde(default)]
    pub loan_repayment: f64,
    #[serde(default)]
    pub has_hecs: bool,
    pub age: u8,
    pub employment_type: String,
    pub loan_purpose: String,
    pub loan_term: u8,
    pub interest_rate: f64,
    pub household_type: String,
    #[serde(default)]
    pub first_time_buyer: bool,
    pub jurisdiction: String,
}

//! Borrowing power calculation: income annualization and tax, expense floors, debt
//! servicing, annuity capacity and the indicative repayment.

pub mod budget;
pub mod capacity;
pub mod domain;
mod engine;
pub mod expenses;
pub mod guard;
pub mod import;
pub mod income;
pub mod tax;

pub use budget::{purchase_budget, BudgetError, DepositInput, PurchaseBudget};
pub use capacity::CapacityOutcome;
pub use domain::{
    BorrowerIncome, EmploymentType, FinancialProfile, Frequency, HouseholdType, IncomeStream,
    Jurisdiction, LoanPurpose, ProfileSubmission,
};
pub use engine::{BorrowingEngine, CalculationResult};
pub use expenses::ExpenseBreakdown;
pub use guard::{ProfileGuard, ProfileViolation};
pub use import::{ProfileImportError, ProfileImporter};
pub use income::IncomeBreakdown;

use serde::{Deserialize, Serialize};

use super::domain::HouseholdType;
use super::income::IncomeBreakdown;
use crate::rates::TaxTable;

/// Tax and after-tax income per borrower.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HouseholdTax {
    pub primary_tax: f64,
    pub secondary_tax: f64,
    pub after_tax_income: f64,
}

/// Tax each borrower independently on salary plus other income. The secondary borrower is
/// only taxed for couples.
pub fn household_tax(
    table: &TaxTable,
    income: &IncomeBreakdown,
    household: HouseholdType,
) -> HouseholdTax {
    let primary_income = income.primary_taxable();
    let primary_tax = table.tax(primary_income);
    let mut after_tax_income = primary_income - primary_tax;

    let secondary_tax = match household {
        HouseholdType::Couple => {
            let secondary_income = income.secondary_taxable();
            let tax = table.tax(secondary_income);
            after_tax_income += secondary_income - tax;
            tax
        }
        HouseholdType::Individual => 0.0,
    };

    HouseholdTax {
        primary_tax,
        secondary_tax,
        after_tax_income,
    }
}

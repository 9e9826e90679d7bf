use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, Expense, NonSalaryIncome};

/// Body of `POST /api/calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Gross monthly salary in `currency`.
    pub salary: Decimal,
    #[serde(default)]
    pub currency: Currency,
    /// USD to COP rate; zero means "use the default rate".
    #[serde(default)]
    pub dollar_rate: Decimal,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub non_salary_income: Vec<NonSalaryIncome>,
}

/// An amount shown in both pesos and dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualCurrency {
    pub cop: Decimal,
    pub usd: Decimal,
}

/// Mandatory deductions on the salary, all in COP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub health: Decimal,
    pub pension: Decimal,
    pub fsp: Decimal,
    pub withholding: Decimal,
    pub total: Decimal,
}

/// The items a user entered together with their COP total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedTotal<T> {
    pub items: Vec<T>,
    pub total: Decimal,
}

/// Shares of total income, in percent.
///
/// `taxes + expenses + remaining` is 100 whenever total income is positive;
/// `non_salary_income` overlaps with `remaining`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPercentages {
    pub taxes: Decimal,
    pub expenses: Decimal,
    pub non_salary_income: Decimal,
    pub remaining: Decimal,
}

/// Net pay split by pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub monthly: DualCurrency,
    pub biweekly: DualCurrency,
    pub weekly: DualCurrency,
    pub hourly: DualCurrency,
}

/// Body returned by `POST /api/calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    /// Gross salary plus non-salary income.
    pub total_income: DualCurrency,
    /// Salary converted to COP; the contribution base.
    pub gross_salary: DualCurrency,
    pub non_salary_income: ItemizedTotal<NonSalaryIncome>,
    pub taxes: TaxBreakdown,
    pub expenses: ItemizedTotal<Expense>,
    pub net_salary: DualCurrency,
    pub period_breakdown: PeriodBreakdown,
    pub percentages: SalaryPercentages,
}

//! Net salary calculation.
//!
//! [`SalaryCalculator::calculate`] is the single entry point used by the HTTP
//! layer. It runs the pipeline below on a validated [`CalculationRequest`]:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Normalize the salary to COP ([`Salary`]) |
//! | 2    | Deductions on the COP salary only ([`Taxes`]) |
//! | 3    | Sum expenses ([`Expenses`]) |
//! | 4    | Sum non-salary income, converting USD items at the salary's rate |
//! | 5    | Net = salary − taxes − expenses + non-salary income |
//! | 6    | Total income = salary + non-salary income |
//! | 7    | Shares of total income (zero when total income is zero) |
//! | 8    | Pay-period views of the net amount |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{CalculationRequest, Currency, Expense, SalaryCalculator, TaxConstants};
//!
//! let calculator = SalaryCalculator::new(TaxConstants::current());
//! let request = CalculationRequest {
//!     salary: dec!(2000),
//!     currency: Currency::Usd,
//!     dollar_rate: dec!(4000),
//!     expenses: vec![Expense::new("Rent", dec!(1500000))],
//!     non_salary_income: vec![],
//! };
//!
//! let response = calculator.calculate(&request).unwrap();
//!
//! assert_eq!(response.gross_salary.cop, dec!(8000000));
//! assert_eq!(response.gross_salary.usd, dec!(2000));
//! assert_eq!(response.expenses.total, dec!(1500000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::percent_of;
use crate::calculations::{Expenses, Salary, Taxes};
use crate::{
    CalculationRequest, CalculationResponse, ItemizedTotal, NonSalaryIncome, SalaryPercentages,
    TaxConstants,
};

/// Reasons a [`CalculationRequest`] cannot be calculated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("salary must not be negative, got {0}")]
    NegativeSalary(Decimal),

    #[error("dollar rate must not be negative, got {0}")]
    NegativeExchangeRate(Decimal),

    #[error("expense '{name}' must not be negative, got {value}")]
    NegativeExpense { name: String, value: Decimal },

    #[error("non-salary income '{name}' must not be negative, got {value}")]
    NegativeNonSalaryIncome { name: String, value: Decimal },

    #[error("amounts are too large to calculate")]
    AmountOverflow,
}

/// Computes the full salary breakdown against one set of tax constants.
#[derive(Debug, Clone, Copy)]
pub struct SalaryCalculator<'a> {
    constants: &'a TaxConstants,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(constants: &'a TaxConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &'a TaxConstants {
        self.constants
    }

    /// Calculates taxes, net pay, period views and income shares.
    ///
    /// Non-salary income is added to net pay and total income but never to
    /// the contribution base.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the salary, the dollar rate or any
    /// item value is negative, or if the amounts overflow a `Decimal`.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError> {
        validate(request)
            .and_then(|()| self.breakdown(request))
            .inspect_err(|error| {
                warn!(%error, "Rejected salary calculation request");
            })
    }

    fn breakdown(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError> {
        let salary = Salary::new(request.salary, request.currency, Some(request.dollar_rate))
            .ok_or(CalculationError::AmountOverflow)?;

        let mut taxes = Taxes::new(salary.cop_salary(), self.constants);
        let tax_total = taxes.calculate_taxes();

        let expenses: Expenses = request.expenses.iter().cloned().collect();
        let expense_total = expenses.total().ok_or(CalculationError::AmountOverflow)?;

        let non_salary_total = self.non_salary_total(&salary, &request.non_salary_income)?;

        let net_cop = salary
            .net_salary(expense_total, tax_total)
            .and_then(|net| net.checked_add(non_salary_total))
            .ok_or(CalculationError::AmountOverflow)?;
        let total_income = salary
            .cop_salary()
            .checked_add(non_salary_total)
            .ok_or(CalculationError::AmountOverflow)?;

        debug!(
            gross = %salary.cop_salary(),
            taxes = %tax_total,
            expenses = %expense_total,
            non_salary_income = %non_salary_total,
            net = %net_cop,
            "Calculated salary breakdown"
        );

        let dual = |cop| salary.dual(cop).ok_or(CalculationError::AmountOverflow);
        let share = |part| percent_of(part, total_income).ok_or(CalculationError::AmountOverflow);

        Ok(CalculationResponse {
            total_income: dual(total_income)?,
            gross_salary: dual(salary.cop_salary())?,
            non_salary_income: ItemizedTotal {
                items: request.non_salary_income.clone(),
                total: non_salary_total,
            },
            taxes: taxes.breakdown(),
            expenses: ItemizedTotal {
                items: expenses.expenses().cloned().collect(),
                total: expense_total,
            },
            net_salary: dual(net_cop)?,
            period_breakdown: salary
                .period_breakdown(net_cop)
                .ok_or(CalculationError::AmountOverflow)?,
            percentages: SalaryPercentages {
                taxes: share(tax_total)?,
                expenses: share(expense_total)?,
                non_salary_income: share(non_salary_total)?,
                remaining: share(net_cop)?,
            },
        })
    }

    /// Sums non-salary income in COP.
    fn non_salary_total(
        &self,
        salary: &Salary,
        items: &[NonSalaryIncome],
    ) -> Result<Decimal, CalculationError> {
        items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| {
                salary
                    .to_cop(item.value, item.currency)
                    .and_then(|cop| total.checked_add(cop))
            })
            .ok_or(CalculationError::AmountOverflow)
    }
}

fn validate(request: &CalculationRequest) -> Result<(), CalculationError> {
    if request.salary < Decimal::ZERO {
        return Err(CalculationError::NegativeSalary(request.salary));
    }
    if request.dollar_rate < Decimal::ZERO {
        return Err(CalculationError::NegativeExchangeRate(request.dollar_rate));
    }
    if let Some(expense) = request.expenses.iter().find(|e| e.value < Decimal::ZERO) {
        return Err(CalculationError::NegativeExpense {
            name: expense.name.clone(),
            value: expense.value,
        });
    }
    if let Some(item) = request
        .non_salary_income
        .iter()
        .find(|i| i.value < Decimal::ZERO)
    {
        return Err(CalculationError::NegativeNonSalaryIncome {
            name: item.name.clone(),
            value: item.value,
        });
    }
    Ok(())
}

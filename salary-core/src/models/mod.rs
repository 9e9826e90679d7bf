mod calculation;
mod currency;
mod exchange_rate;
mod expense;
mod tax_bracket;
mod tax_constants;

pub use calculation::{
    CalculationRequest, CalculationResponse, DualCurrency, ItemizedTotal, PeriodBreakdown,
    SalaryPercentages, TaxBreakdown,
};
pub use currency::Currency;
pub use exchange_rate::{ExchangeRate, RateSource};
pub use expense::{Expense, NonSalaryIncome};
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_constants::{TaxConstants, TaxConstantsError};

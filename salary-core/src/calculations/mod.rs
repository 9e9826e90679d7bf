//! Salary calculations for Colombian payroll.
//!
//! Each step of the net-salary pipeline lives in its own module and is
//! composed by [`SalaryCalculator`].

pub mod calculator;
pub mod common;
pub mod expenses;
pub mod salary;
pub mod taxes;

pub use calculator::{CalculationError, SalaryCalculator};
pub use expenses::{ExpenseId, Expenses};
pub use salary::{DEFAULT_DOLLAR_RATE, MONTHLY_WORK_HOURS, Salary};
pub use taxes::Taxes;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// A user-entered monthly expense, always in COP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub value: Decimal,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Income paid outside the salary (bonuses, allowances).
///
/// It is never part of the contribution base, so it adds to net pay untaxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonSalaryIncome {
    pub name: String,
    pub value: Decimal,
    #[serde(default)]
    pub currency: Currency,
}

impl NonSalaryIncome {
    pub fn new(
        name: impl Into<String>,
        value: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            currency,
        }
    }
}

use rust_decimal::Decimal;

use crate::{Currency, DualCurrency, PeriodBreakdown};

/// USD to COP rate used when the caller supplies none (or zero).
pub const DEFAULT_DOLLAR_RATE: Decimal = Decimal::from_parts(4200, 0, 0, false, 0);

/// Working hours in a month: 48 hours a week over 4 weeks.
pub const MONTHLY_WORK_HOURS: Decimal = Decimal::from_parts(192, 0, 0, false, 0);

const BIWEEKLY_PERIODS: Decimal = Decimal::TWO;
const WEEKLY_PERIODS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// A gross monthly salary normalized to COP.
///
/// The dollar rate is kept for USD display even when the salary was entered
/// in pesos. It is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salary {
    cop_salary: Decimal,
    dollar_rate: Decimal,
}

impl Salary {
    /// Normalizes `amount` given in `currency`.
    ///
    /// `dollar_rate` of `None` or zero falls back to [`DEFAULT_DOLLAR_RATE`].
    /// USD amounts are converted with the resulting rate; COP amounts are
    /// stored as given. Returns `None` if the conversion overflows.
    pub fn new(
        amount: Decimal,
        currency: Currency,
        dollar_rate: Option<Decimal>,
    ) -> Option<Self> {
        let dollar_rate = dollar_rate
            .filter(|rate| !rate.is_zero())
            .unwrap_or(DEFAULT_DOLLAR_RATE);

        let cop_salary = match currency {
            Currency::Cop => amount,
            Currency::Usd => amount.checked_mul(dollar_rate)?,
        };

        Some(Self {
            cop_salary,
            dollar_rate,
        })
    }

    pub fn cop_salary(&self) -> Decimal {
        self.cop_salary
    }

    pub fn dollar_rate(&self) -> Decimal {
        self.dollar_rate
    }

    /// Converts a COP amount to USD at the stored rate.
    pub fn to_usd(
        &self,
        cop: Decimal,
    ) -> Option<Decimal> {
        cop.checked_div(self.dollar_rate)
    }

    /// Converts an amount in `currency` to COP at the stored rate.
    pub fn to_cop(
        &self,
        amount: Decimal,
        currency: Currency,
    ) -> Option<Decimal> {
        match currency {
            Currency::Cop => Some(amount),
            Currency::Usd => amount.checked_mul(self.dollar_rate),
        }
    }

    /// Pairs a COP amount with its USD equivalent.
    pub fn dual(
        &self,
        cop: Decimal,
    ) -> Option<DualCurrency> {
        Some(DualCurrency {
            cop,
            usd: self.to_usd(cop)?,
        })
    }

    /// Salary left after taxes and expenses. May be negative.
    pub fn net_salary(
        &self,
        expenses: Decimal,
        taxes: Decimal,
    ) -> Option<Decimal> {
        self.cop_salary.checked_sub(taxes)?.checked_sub(expenses)
    }

    /// Splits a monthly net amount into biweekly, weekly and hourly pay.
    pub fn period_breakdown(
        &self,
        net_cop: Decimal,
    ) -> Option<PeriodBreakdown> {
        Some(PeriodBreakdown {
            monthly: self.dual(net_cop)?,
            biweekly: self.dual(net_cop / BIWEEKLY_PERIODS)?,
            weekly: self.dual(net_cop / WEEKLY_PERIODS)?,
            hourly: self.dual(net_cop / MONTHLY_WORK_HOURS)?,
        })
    }
}

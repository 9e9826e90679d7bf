//! Payroll deductions on a contribution base (IBC).
//!
//! | Component   | Rule |
//! |-------------|------|
//! | Health      | IBC × health rate |
//! | Pension     | IBC × pension rate |
//! | FSP         | IBC × rate of the tier containing IBC / SMLMV (zero below 4 SMLMV) |
//! | Withholding | Progressive UVT brackets over (IBC − health − pension − FSP) × (1 − exempt share), truncated |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::TaxConstants;
//! use salary_core::calculations::Taxes;
//!
//! let mut taxes = Taxes::new(dec!(10000000), TaxConstants::current());
//! let total = taxes.calculate_taxes();
//!
//! assert_eq!(taxes.health(), dec!(400000));
//! assert_eq!(taxes.fsp(), dec!(100000));
//! assert_eq!(taxes.withholding(), dec!(351399));
//! assert_eq!(total, dec!(1251399));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::truncate;
use crate::{TaxBreakdown, TaxConstants};

/// Deductions owed on one contribution base.
///
/// Health and pension are known as soon as the value is built; FSP and
/// withholding are filled in by [`calculate_taxes`](Self::calculate_taxes)
/// and read as zero until then.
#[derive(Debug, Clone)]
pub struct Taxes<'a> {
    constants: &'a TaxConstants,
    ibc: Decimal,
    health: Decimal,
    pension: Decimal,
    fsp: Decimal,
    withholding: Decimal,
}

impl<'a> Taxes<'a> {
    /// Creates the deductions for `ibc`, computing health and pension.
    ///
    /// A negative `ibc` is not rejected; it yields negative contributions and
    /// no FSP or withholding.
    pub fn new(
        ibc: Decimal,
        constants: &'a TaxConstants,
    ) -> Self {
        Self {
            constants,
            ibc,
            health: ibc * constants.health_rate,
            pension: ibc * constants.pension_rate,
            fsp: Decimal::ZERO,
            withholding: Decimal::ZERO,
        }
    }

    /// Computes FSP and withholding, stores them and returns the total of all
    /// four components.
    pub fn calculate_taxes(&mut self) -> Decimal {
        self.fsp = self.calculate_fsp();
        self.withholding = self.calculate_withholding(self.base_uvt());

        self.health + self.pension + self.fsp + self.withholding
    }

    /// FSP for the tier containing IBC expressed in SMLMV.
    fn calculate_fsp(&self) -> Decimal {
        let smlmv_factor = self.ibc / self.constants.smlmv;

        self.constants
            .fsp_brackets
            .locate(smlmv_factor)
            .map_or(Decimal::ZERO, |bracket| self.ibc * bracket.rate)
    }

    /// Taxable base in UVT after contributions and the exempt share.
    fn base_uvt(&self) -> Decimal {
        let base_income = self.ibc - self.health - self.pension - self.fsp;
        let exempt_income = base_income * self.constants.exempt_income_percentage;
        let tax_base = base_income - exempt_income;

        tax_base / self.constants.uvt
    }

    /// Withholding in COP for a base expressed in UVT.
    fn calculate_withholding(
        &self,
        base_uvt: Decimal,
    ) -> Decimal {
        let tax_uvt = self.constants.withholding_brackets.accumulate(base_uvt);

        truncate(tax_uvt * self.constants.uvt)
    }

    pub fn health(&self) -> Decimal {
        self.health
    }

    pub fn pension(&self) -> Decimal {
        self.pension
    }

    pub fn fsp(&self) -> Decimal {
        self.fsp
    }

    pub fn withholding(&self) -> Decimal {
        self.withholding
    }

    /// Current component values with their sum.
    pub fn breakdown(&self) -> TaxBreakdown {
        TaxBreakdown {
            health: self.health,
            pension: self.pension,
            fsp: self.fsp,
            withholding: self.withholding,
            total: self.health + self.pension + self.fsp + self.withholding,
        }
    }
}

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketTable, TaxBracket};

static CURRENT: LazyLock<TaxConstants> = LazyLock::new(TaxConstants::colombia_2026);

/// Errors reported by [`TaxConstants::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConstantsError {
    #[error("UVT must be positive, got {0}")]
    InvalidUvt(Decimal),

    #[error("SMLMV must be positive, got {0}")]
    InvalidSmlmv(Decimal),

    #[error("{name} must be between 0 and 1, got {rate}")]
    InvalidRate { name: &'static str, rate: Decimal },

    #[error("{table} bracket table is empty")]
    EmptyTable { table: &'static str },

    #[error("{table} bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidBracketRate {
        table: &'static str,
        index: usize,
        rate: Decimal,
    },

    #[error("{table} bracket {index} has a max that is not above its min")]
    EmptyBracket { table: &'static str, index: usize },

    #[error("{table} bracket {index} does not start where the previous bracket ends")]
    NonContiguous { table: &'static str, index: usize },

    #[error("{table} bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { table: &'static str, index: usize },

    #[error("last {table} bracket must be unbounded")]
    BoundedLastBracket { table: &'static str },
}

/// Contribution and withholding parameters for one fiscal year.
///
/// Loaded once at startup and shared read-only. Changing fiscal year means
/// replacing the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConstants {
    /// Fiscal year these values apply to.
    pub year: i32,

    /// Unidad de Valor Tributario, the unit withholding brackets are expressed in.
    pub uvt: Decimal,

    /// Salario Mínimo Legal Mensual Vigente, the unit FSP brackets are expressed in.
    pub smlmv: Decimal,

    /// Employee health contribution rate.
    pub health_rate: Decimal,

    /// Employee pension contribution rate.
    pub pension_rate: Decimal,

    /// Share of base income exempt from withholding.
    pub exempt_income_percentage: Decimal,

    /// Fondo de Solidaridad Pensional tiers, in multiples of SMLMV.
    pub fsp_brackets: BracketTable,

    /// Retención en la fuente progressive brackets, in UVT.
    pub withholding_brackets: BracketTable,
}

impl TaxConstants {
    /// Reference values for 2026.
    ///
    /// UVT per DIAN Resolución 000238 (Dec 2025). FSP tiers follow Ley 100 de
    /// 1993 while the Ley 2381 reform remains suspended.
    pub fn colombia_2026() -> Self {
        Self {
            year: 2026,
            uvt: Decimal::from(52_374),
            smlmv: Decimal::from(1_750_905),
            health_rate: Decimal::new(4, 2),
            pension_rate: Decimal::new(4, 2),
            exempt_income_percentage: Decimal::new(25, 2),
            fsp_brackets: BracketTable::new(vec![
                bracket(4, Some(16), Decimal::new(10, 3)),
                bracket(16, Some(17), Decimal::new(12, 3)),
                bracket(17, Some(18), Decimal::new(14, 3)),
                bracket(18, Some(19), Decimal::new(16, 3)),
                bracket(19, Some(20), Decimal::new(18, 3)),
                bracket(20, None, Decimal::new(20, 3)),
            ]),
            withholding_brackets: BracketTable::new(vec![
                bracket(0, Some(95), Decimal::ZERO),
                bracket(95, Some(150), Decimal::new(19, 2)),
                bracket(150, Some(360), Decimal::new(28, 2)),
                bracket(360, Some(640), Decimal::new(33, 2)),
                bracket(640, Some(945), Decimal::new(35, 2)),
                bracket(945, Some(2300), Decimal::new(37, 2)),
                bracket(2300, None, Decimal::new(39, 2)),
            ]),
        }
    }

    /// The process-wide table used when no override is configured.
    pub fn current() -> &'static TaxConstants {
        &CURRENT
    }

    /// Validates scalar parameters and both bracket tables.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxConstantsError`] found.
    pub fn validate(&self) -> Result<(), TaxConstantsError> {
        if self.uvt <= Decimal::ZERO {
            return Err(TaxConstantsError::InvalidUvt(self.uvt));
        }
        if self.smlmv <= Decimal::ZERO {
            return Err(TaxConstantsError::InvalidSmlmv(self.smlmv));
        }
        for (name, rate) in [
            ("health rate", self.health_rate),
            ("pension rate", self.pension_rate),
            ("exempt income percentage", self.exempt_income_percentage),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(TaxConstantsError::InvalidRate { name, rate });
            }
        }
        self.fsp_brackets.validate("fsp")?;
        self.withholding_brackets.validate("withholding")
    }
}

impl Default for TaxConstants {
    fn default() -> Self {
        Self::colombia_2026()
    }
}

fn bracket(
    min: i64,
    max: Option<i64>,
    rate: Decimal,
) -> TaxBracket {
    TaxBracket::new(Decimal::from(min), max.map(Decimal::from), rate)
}

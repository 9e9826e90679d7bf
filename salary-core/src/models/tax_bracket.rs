use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxConstantsError;

/// One row of a rate table.
///
/// `min` and `max` are expressed in the table's unit (multiples of SMLMV for
/// FSP, UVT for withholding). The bracket covers `[min, max)`; `max: None`
/// means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    /// Returns `true` if `value` falls in `[min, max)`.
    pub fn contains(
        &self,
        value: Decimal,
    ) -> bool {
        value >= self.min && self.max.is_none_or(|max| value < max)
    }
}

/// An ascending, contiguous list of [`TaxBracket`]s.
///
/// Both lookups walk the table in order and stop at the first bracket whose
/// `min` lies above the value:
///
/// * [`locate`](Self::locate) returns the single bracket containing the value
///   (flat-rate tables such as FSP).
/// * [`accumulate`](Self::accumulate) sums `slice × rate` over every bracket
///   the value reaches (progressive tables such as withholding).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::{BracketTable, TaxBracket};
///
/// let table = BracketTable::new(vec![
///     TaxBracket::new(dec!(0), Some(dec!(95)), dec!(0)),
///     TaxBracket::new(dec!(95), Some(dec!(150)), dec!(0.19)),
///     TaxBracket::new(dec!(150), None, dec!(0.28)),
/// ]);
///
/// assert_eq!(table.locate(dec!(150)).map(|b| b.rate), Some(dec!(0.28)));
/// // (150 - 95) × 19% + (200 - 150) × 28%
/// assert_eq!(table.accumulate(dec!(200)), dec!(24.45));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable(Vec<TaxBracket>);

impl BracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Brackets whose lower bound has been reached by `value`, in order.
    fn reached(
        &self,
        value: Decimal,
    ) -> impl Iterator<Item = &TaxBracket> {
        self.0.iter().take_while(move |bracket| bracket.min <= value)
    }

    /// Finds the bracket whose half-open range contains `value`.
    ///
    /// Returns `None` below the first bracket and beyond a bounded last one.
    pub fn locate(
        &self,
        value: Decimal,
    ) -> Option<&TaxBracket> {
        self.reached(value)
            .last()
            .filter(|bracket| bracket.contains(value))
    }

    /// Sums the tax owed on `value`, each bracket taxing only its own slice.
    ///
    /// The result stays in the table's unit.
    pub fn accumulate(
        &self,
        value: Decimal,
    ) -> Decimal {
        self.reached(value)
            .map(|bracket| {
                let upper = bracket.max.map_or(value, |max| value.min(max));
                (upper - bracket.min) * bracket.rate
            })
            .sum()
    }

    /// Checks that the table is usable by both lookups.
    ///
    /// # Errors
    ///
    /// Returns [`TaxConstantsError`] if the table is empty, a rate is outside
    /// `[0, 1]`, a bracket is empty, consecutive brackets leave a gap or
    /// overlap, or any bracket other than the last is unbounded (or the last
    /// one is bounded).
    pub fn validate(
        &self,
        table: &'static str,
    ) -> Result<(), TaxConstantsError> {
        let Some(last) = self.0.last() else {
            return Err(TaxConstantsError::EmptyTable { table });
        };

        for (index, bracket) in self.0.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TaxConstantsError::InvalidBracketRate {
                    table,
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.max {
                Some(max) if max <= bracket.min => {
                    return Err(TaxConstantsError::EmptyBracket { table, index });
                }
                None if index + 1 < self.0.len() => {
                    return Err(TaxConstantsError::UnboundedBeforeEnd { table, index });
                }
                _ => {}
            }

            if index > 0 && self.0[index - 1].max != Some(bracket.min) {
                return Err(TaxConstantsError::NonContiguous { table, index });
            }
        }

        if last.max.is_some() {
            return Err(TaxConstantsError::BoundedLastBracket { table });
        }

        Ok(())
    }
}

impl From<Vec<TaxBracket>> for BracketTable {
    fn from(brackets: Vec<TaxBracket>) -> Self {
        Self::new(brackets)
    }
}

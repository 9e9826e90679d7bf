use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{BracketTable, TaxBracket, TaxConstants, TaxConstantsError};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading bracket tables.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown bracket table '{0}' (expected 'fsp' or 'withholding')")]
    UnknownTable(String),

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] TaxConstantsError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// The tables a CSV row can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Fsp,
    Withholding,
}

impl TableKind {
    fn parse(name: &str) -> Result<Self, BracketLoaderError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fsp" => Ok(Self::Fsp),
            "withholding" => Ok(Self::Withholding),
            _ => Err(BracketLoaderError::UnknownTable(name.to_string())),
        }
    }
}

/// A single row of a bracket CSV file.
///
/// - `table`: `fsp` (bounds in SMLMV) or `withholding` (bounds in UVT)
/// - `min`: lower bound, inclusive
/// - `max`: upper bound, exclusive (empty for unbounded)
/// - `rate`: rate as a fraction (e.g., 0.19 for 19%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub table: String,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl BracketRecord {
    fn bracket(&self) -> TaxBracket {
        TaxBracket::new(self.min, self.max, self.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for FSP and withholding bracket tables from CSV.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the tables named in `records`, keeping the others.
    ///
    /// Rows keep their file order within each table. The result is validated
    /// as a whole, so a file that only replaces one table is still checked
    /// against the other.
    ///
    /// # Errors
    ///
    /// * [`BracketLoaderError::UnknownTable`] for a row naming another table.
    /// * [`BracketLoaderError::InvalidTable`] if the resulting constants fail
    ///   [`TaxConstants::validate`].
    pub fn apply(
        constants: TaxConstants,
        records: &[BracketRecord],
    ) -> Result<TaxConstants, BracketLoaderError> {
        let mut fsp = Vec::new();
        let mut withholding = Vec::new();

        for record in records {
            match TableKind::parse(&record.table)? {
                TableKind::Fsp => fsp.push(record.bracket()),
                TableKind::Withholding => withholding.push(record.bracket()),
            }
        }

        let mut constants = constants;
        if !fsp.is_empty() {
            constants.fsp_brackets = BracketTable::new(fsp);
        }
        if !withholding.is_empty() {
            constants.withholding_brackets = BracketTable::new(withholding);
        }

        constants.validate()?;
        Ok(constants)
    }

    /// Read `path` and apply it to `constants`.
    pub fn load_from_file(
        path: &Path,
        constants: TaxConstants,
    ) -> Result<TaxConstants, BracketLoaderError> {
        let file = File::open(path).map_err(|e| BracketLoaderError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let records = Self::parse(file)?;
        let constants = Self::apply(constants, &records)?;

        info!(
            path = %path.display(),
            records = records.len(),
            "Loaded bracket tables"
        );
        Ok(constants)
    }
}

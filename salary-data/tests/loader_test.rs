//! Integration tests for loading bracket tables from fixture files.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salary_core::calculations::Taxes;
use salary_core::{TaxConstants, TaxConstantsError};
use salary_data::{BracketLoader, BracketLoaderError};

const REFERENCE_CSV: &str = include_str!("fixtures/brackets_2026.csv");

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn reference_file_reproduces_builtin_tables() {
    let records = BracketLoader::parse(REFERENCE_CSV.as_bytes()).unwrap();

    let constants = BracketLoader::apply(TaxConstants::colombia_2026(), &records).unwrap();

    assert_eq!(records.len(), 13);
    assert_eq!(constants, TaxConstants::colombia_2026());
}

#[test]
fn load_from_file_applies_partial_table() {
    let constants =
        BracketLoader::load_from_file(&fixture("fsp_reform.csv"), TaxConstants::colombia_2026())
            .unwrap();

    assert_eq!(constants.fsp_brackets.len(), 2);
    assert_eq!(constants.withholding_brackets.len(), 7);
}

#[test]
fn loaded_tables_drive_the_calculation() {
    let constants =
        BracketLoader::load_from_file(&fixture("fsp_reform.csv"), TaxConstants::colombia_2026())
            .unwrap();
    let ibc = constants.smlmv * dec!(17);

    let mut taxes = Taxes::new(ibc, &constants);
    taxes.calculate_taxes();

    assert_eq!(taxes.fsp(), ibc * dec!(0.025));
}

#[test]
fn gap_between_brackets_is_rejected() {
    let err = BracketLoader::load_from_file(&fixture("gap.csv"), TaxConstants::colombia_2026())
        .unwrap_err();

    assert!(matches!(
        err,
        BracketLoaderError::InvalidTable(TaxConstantsError::NonContiguous {
            table: "withholding",
            index: 1
        })
    ));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = BracketLoader::load_from_file(&fixture("missing.csv"), TaxConstants::colombia_2026())
        .unwrap_err();

    let BracketLoaderError::Io { path, .. } = err else {
        panic!("Expected Io error, got: {err:?}");
    };
    assert!(path.ends_with("missing.csv"));
}

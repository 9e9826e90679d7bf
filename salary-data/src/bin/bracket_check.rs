use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use salary_core::calculations::Taxes;
use salary_core::{BracketTable, TaxConstants};
use salary_data::BracketLoader;

/// Check a bracket CSV file against the 2026 reference constants.
///
/// The CSV file should have the following columns:
/// - table: `fsp` or `withholding`
/// - min: lower bound (SMLMV for fsp, UVT for withholding)
/// - max: upper bound (empty for unbounded)
/// - rate: rate as a decimal (e.g., 0.19)
#[derive(Parser, Debug)]
#[command(name = "bracket-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,

    /// Also print the deductions for this monthly COP salary
    #[arg(short, long)]
    salary: Option<Decimal>,
}

fn print_table(
    name: &str,
    unit: &str,
    table: &BracketTable,
) {
    println!("{name} ({unit}):");
    for bracket in table.brackets() {
        let max = bracket
            .max
            .map_or_else(|| "∞".to_string(), |max| max.to_string());
        println!("  [{:>6}, {:>6})  {}", bracket.min, max, bracket.rate);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking brackets from: {}", args.file.display());

    let constants = BracketLoader::load_from_file(&args.file, TaxConstants::colombia_2026())
        .with_context(|| format!("Invalid bracket file: {}", args.file.display()))?;

    print_table("FSP", "SMLMV", &constants.fsp_brackets);
    print_table("Withholding", "UVT", &constants.withholding_brackets);

    if let Some(salary) = args.salary {
        let mut taxes = Taxes::new(salary, &constants);
        let total = taxes.calculate_taxes();
        println!("Deductions on {salary} COP:");
        println!("  health      {}", taxes.health());
        println!("  pension     {}", taxes.pension());
        println!("  fsp         {}", taxes.fsp());
        println!("  withholding {}", taxes.withholding());
        println!("  total       {total}");
    }

    println!("Bracket tables are valid.");
    Ok(())
}

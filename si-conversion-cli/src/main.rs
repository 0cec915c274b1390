use anyhow::{bail, Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use itertools::Itertools;
use log::{debug, info};
use si_conversion::converter::{convert_with, UnitTable};
use std::path::{Path, PathBuf};

/// Converts unit expressions into SI units and the factor that scales a quantity into them
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The unit expressions to convert, e.g. "ha*degree/(h*min/degree)"
    expressions: Vec<String>,

    /// A TOML file of additional units, layered over the built-in ones
    #[clap(short, long)]
    table: Option<PathBuf>,

    /// Print the known non-SI units and exit
    #[clap(long)]
    list_units: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let table = load_table(args.table.as_deref())?;

    if args.list_units {
        print_units(&table);
        return Ok(());
    }
    if args.expressions.is_empty() {
        bail!("No expressions to convert, see --help");
    }

    let mut failures = 0;
    for expression in &args.expressions {
        match convert_with(expression, &table) {
            Ok(result) => {
                let json = result
                    .to_json()
                    .with_context(|| format!("Could not serialize result of '{}'", expression))?;
                println!("{}", json);
            }
            Err(error) => {
                eprintln!("{}", error);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!(
            "{} of {} expressions could not be converted",
            failures,
            args.expressions.len()
        );
    }
    Ok(())
}

fn load_table(path: Option<&Path>) -> Result<UnitTable> {
    let mut table = UnitTable::standard().clone();
    if let Some(path) = path {
        let user_table = UnitTable::from_path(path)?;
        info!("Using unit table {}", path.display());
        table.extend(user_table);
    }
    debug!("{} non-SI units known", table.units().count());
    Ok(table)
}

fn print_units(table: &UnitTable) {
    for (symbol, entry) in table.units().sorted_by(|a, b| a.0.cmp(b.0)) {
        println!("{}\t{}\t{}", symbol, entry.si_symbol, entry.factor);
    }
}

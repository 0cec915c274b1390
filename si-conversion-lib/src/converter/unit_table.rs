use crate::converter::token::DELIMITERS;
use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use log::debug;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// What a non-SI unit symbol converts into.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitEntry {
    /// The SI symbol that replaces the unit in the converted expression.
    #[serde(rename = "si")]
    pub si_symbol: String,
    /// How many SI units one of the unit is worth.
    pub factor: f64,
}

/// The known non-SI units, together with the symbols that are already in SI form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
    units: HashMap<String, UnitEntry>,
    si_symbols: HashSet<String>,
}

/// The layout of a unit table file.
///
/// ```toml
/// si_symbols = ["m", "s"]
///
/// [units.ft]
/// si = "m"
/// factor = 0.3048
/// ```
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitTableFile {
    #[serde(default)]
    si_symbols: Vec<String>,
    #[serde(default)]
    units: HashMap<String, UnitEntry>,
}

static STANDARD_SI_SYMBOLS: [&str; 6] = ["m", "s", "rad", "kg", "m^2", "m^3"];

lazy_static! {
    static ref STANDARD_TABLE: UnitTable = UnitTable::new_standard();
}

impl UnitTable {
    /// The built-in table, created on first use and shared by every caller.
    pub fn standard() -> &'static UnitTable {
        &STANDARD_TABLE
    }

    fn new_standard() -> UnitTable {
        let mut table = UnitTable::default();
        for symbol in STANDARD_SI_SYMBOLS {
            table.si_symbols.insert(symbol.to_string());
        }

        // Litre and arc-minute are corrected from the legacy table, which had 1000 and π/108000.
        let degree = PI / 180.0;
        table.insert_synonyms(&["L", "litre"], "m^3", 0.001);
        table.insert_synonyms(&["h", "hour"], "s", 3600.0);
        table.insert_synonyms(&["min", "minute"], "s", 60.0);
        table.insert_synonyms(&["d"], "s", 86400.0);
        table.insert_synonyms(&["°", "degree"], "rad", degree);
        table.insert_synonyms(&["'"], "rad", degree / 60.0);
        table.insert_synonyms(&["\"", "second"], "rad", degree / 3600.0);
        table.insert_synonyms(&["ha", "hectar"], "m^2", 10000.0);
        table.insert_synonyms(&["t", "tonne"], "kg", 1000.0);
        table
    }

    fn insert_synonyms(&mut self, synonyms: &[&str], si_symbol: &str, factor: f64) {
        for symbol in synonyms {
            self.units.insert(
                symbol.to_string(),
                UnitEntry {
                    si_symbol: si_symbol.to_string(),
                    factor,
                },
            );
        }
    }

    /// Parses a unit table from a TOML document.
    ///
    /// # Arguments
    ///
    /// * `document`: TOML text with an optional `si_symbols` list and a `units` table.
    ///
    /// returns: The table described by the document, and nothing else.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// use si_conversion::converter::UnitTable;
    ///
    /// let table = UnitTable::from_toml_str(
    ///     r#"
    ///     [units.ft]
    ///     si = "m"
    ///     factor = 0.3048
    ///     "#,
    /// )?;
    ///
    /// assert!(table.is_si("m"));
    /// assert_eq!(table.lookup("ft").map(|entry| entry.factor), Some(0.3048));
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn from_toml_str(document: &str) -> Result<UnitTable> {
        let file: UnitTableFile =
            toml::from_str(document).context("Failed to parse unit table")?;

        let mut table = UnitTable::default();
        for symbol in file.si_symbols {
            validate_symbol(&symbol)?;
            table.si_symbols.insert(symbol);
        }
        for (symbol, entry) in file.units {
            table.insert(symbol, entry)?;
        }
        Ok(table)
    }

    /// Reads and parses a unit table file. See [`UnitTable::from_toml_str`].
    pub fn from_path(path: &Path) -> Result<UnitTable> {
        let document = fs::read_to_string(path)
            .with_context(|| format!("Failed to read unit table {}", path.display()))?;
        let table = UnitTable::from_toml_str(&document)
            .with_context(|| format!("Invalid unit table {}", path.display()))?;
        debug!(
            "Loaded {} units and {} SI symbols from {}",
            table.units.len(),
            table.si_symbols.len(),
            path.display()
        );
        Ok(table)
    }

    /// Adds a non-SI unit. Its SI symbol becomes a recognized SI symbol as well,
    /// so that converted expressions can be converted again.
    pub fn insert(&mut self, symbol: String, entry: UnitEntry) -> Result<()> {
        validate_symbol(&symbol)?;
        validate_symbol(&entry.si_symbol)?;
        if !entry.factor.is_finite() || entry.factor <= 0.0 {
            bail!(
                "Conversion factor of unit '{}' must be a positive number, was {}",
                symbol,
                entry.factor
            );
        }

        self.si_symbols.insert(entry.si_symbol.clone());
        self.units.insert(symbol, entry);
        Ok(())
    }

    /// Merges another table into this one. Units of `other` replace units with the same symbol.
    pub fn extend(&mut self, other: UnitTable) {
        self.si_symbols.extend(other.si_symbols);
        self.units.extend(other.units);
    }

    pub fn lookup(&self, symbol: &str) -> Option<&UnitEntry> {
        self.units.get(symbol)
    }

    pub fn is_si(&self, symbol: &str) -> bool {
        self.si_symbols.contains(symbol)
    }

    /// All known non-SI units, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = (&str, &UnitEntry)> {
        self.units
            .iter()
            .map(|(symbol, entry)| (symbol.as_str(), entry))
    }
}

/// A symbol the lexer could never produce can never be looked up.
fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() || symbol.trim() != symbol {
        bail!("Unit symbol '{}' is empty or padded with whitespace", symbol);
    }
    if let Some(delimiter) = DELIMITERS
        .iter()
        .find(|delimiter| symbol.contains(*delimiter))
    {
        bail!("Unit symbol '{}' contains '{}'", symbol, delimiter);
    }
    Ok(())
}

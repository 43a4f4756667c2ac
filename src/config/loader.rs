//! Rate table loading functionality.
//!
//! This module provides the [`RateTableLoader`] type for loading year-keyed
//! rate tables from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::RateTable;

/// Loads and provides access to year-versioned rate tables.
///
/// The `RateTableLoader` reads one YAML file per calendar year from a
/// directory and answers lookups by year. The year dependency is resolved
/// exactly once per payroll run; calculators and validators receive the
/// selected [`RateTable`] as a plain value and never consult ambient state.
///
/// # Directory Structure
///
/// ```text
/// config/colombia/
/// └── rates/
///     ├── 2024.yaml
///     └── 2025.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::RateTableLoader;
///
/// let loader = RateTableLoader::load("./config/colombia")?;
/// let table = loader.table_for_year(2025)?;
/// println!("Transport allowance: {}", table.transport_allowance.amount);
/// # Ok::<(), nomina_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RateTableLoader {
    tables: BTreeMap<i32, RateTable>,
}

impl RateTableLoader {
    /// Loads all rate tables from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/colombia")
    ///
    /// # Returns
    ///
    /// Returns a `RateTableLoader` on success, or an error if:
    /// - The `rates` directory is missing or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Two files declare the same year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rates_dir = path.as_ref().join("rates");
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(&rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml(&file_path)?;
                Self::insert_table(&mut tables, table, &file_path)?;
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(Self { tables })
    }

    /// Builds a loader from already-constructed tables.
    ///
    /// Useful for tests and for orchestrators that source tables from
    /// somewhere other than the filesystem.
    pub fn from_tables(tables: Vec<RateTable>) -> Self {
        let tables = tables.into_iter().map(|t| (t.year, t)).collect();
        Self { tables }
    }

    /// Loads and parses a single YAML rate file.
    fn load_yaml(path: &Path) -> EngineResult<RateTable> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn insert_table(
        tables: &mut BTreeMap<i32, RateTable>,
        table: RateTable,
        path: &Path,
    ) -> EngineResult<()> {
        let year = table.year;
        if tables.insert(year, table).is_some() {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("duplicate rate table for year {}", year),
            });
        }
        Ok(())
    }

    /// Returns the rate table for a calendar year.
    ///
    /// An unrecognized year is a fatal configuration error for the payroll
    /// period that requested it.
    pub fn table_for_year(&self, year: i32) -> EngineResult<&RateTable> {
        self.tables
            .get(&year)
            .ok_or(EngineError::RateTableNotFound { year })
    }

    /// Returns the configured years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.tables.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_path() -> &'static str {
        "./config/colombia"
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = RateTableLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.years(), vec![2024, 2025]);
    }

    #[test]
    fn test_2024_table_values() {
        let loader = RateTableLoader::load(config_path()).unwrap();
        let table = loader.table_for_year(2024).unwrap();

        assert_eq!(table.minimum_wage, dec("1300000"));
        assert_eq!(table.transport_allowance.amount, dec("162000"));
    }

    #[test]
    fn test_2025_table_values() {
        let loader = RateTableLoader::load(config_path()).unwrap();
        let table = loader.table_for_year(2025).unwrap();

        assert_eq!(table.minimum_wage, dec("1423500"));
        assert_eq!(table.transport_allowance.amount, dec("200000"));
    }

    #[test]
    fn test_unknown_year_returns_fatal_error() {
        let loader = RateTableLoader::load(config_path()).unwrap();

        let result = loader.table_for_year(2019);
        match result {
            Err(EngineError::RateTableNotFound { year }) => assert_eq!(year, 2019),
            other => panic!("Expected RateTableNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = RateTableLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rates"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_tables_lookup() {
        let table = crate::config::test_support::table_2024();
        let loader = RateTableLoader::from_tables(vec![table]);

        assert!(loader.table_for_year(2024).is_ok());
        assert!(loader.table_for_year(2025).is_err());
    }
}

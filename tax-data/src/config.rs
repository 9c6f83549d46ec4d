//! Where the tax tables live on disk.
//!
//! Paths are always injected: either every default file name is resolved
//! under one directory, or a TOML file names the directory and overrides
//! individual files.
//!
//! ```toml
//! # Relative to this file's directory.
//! table_dir = "tables"
//!
//! # Relative to table_dir. Absolute paths are used as given.
//! [files]
//! tax_brackets = "brackets_2025.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::TableLoadError;

/// Location of every table file the calculation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub tax_brackets: PathBuf,
    pub atl_deductions: PathBuf,
    pub itemized_deductions: PathBuf,
    pub tax_credits: PathBuf,
    pub standard_deductions: PathBuf,
    pub fica_taxes: PathBuf,
    pub medicare_surtax: PathBuf,
    pub state_tax_info: PathBuf,
    pub ss_wage_base: PathBuf,
}

/// Optional per-file overrides in the TOML config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOverrides {
    tax_brackets: Option<PathBuf>,
    atl_deductions: Option<PathBuf>,
    itemized_deductions: Option<PathBuf>,
    tax_credits: Option<PathBuf>,
    standard_deductions: Option<PathBuf>,
    fica_taxes: Option<PathBuf>,
    medicare_surtax: Option<PathBuf>,
    state_tax_info: Option<PathBuf>,
    ss_wage_base: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableConfig {
    table_dir: Option<PathBuf>,
    #[serde(default)]
    files: FileOverrides,
}

impl TablePaths {
    pub const TAX_BRACKETS_FILE: &'static str = "tax_brackets.csv";
    pub const ATL_DEDUCTIONS_FILE: &'static str = "atl_deductions.csv";
    pub const ITEMIZED_DEDUCTIONS_FILE: &'static str = "itemized_deductions.csv";
    pub const TAX_CREDITS_FILE: &'static str = "tax_credits.csv";
    pub const STANDARD_DEDUCTIONS_FILE: &'static str = "standard_deductions.csv";
    pub const FICA_TAXES_FILE: &'static str = "fica_taxes.csv";
    pub const MEDICARE_SURTAX_FILE: &'static str = "medicare_surtax.csv";
    pub const STATE_TAX_INFO_FILE: &'static str = "state_tax_info.csv";
    pub const SS_WAGE_BASE_FILE: &'static str = "max_ss_tax_income_limit.csv";

    /// Resolves every default file name under `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            tax_brackets: dir.join(Self::TAX_BRACKETS_FILE),
            atl_deductions: dir.join(Self::ATL_DEDUCTIONS_FILE),
            itemized_deductions: dir.join(Self::ITEMIZED_DEDUCTIONS_FILE),
            tax_credits: dir.join(Self::TAX_CREDITS_FILE),
            standard_deductions: dir.join(Self::STANDARD_DEDUCTIONS_FILE),
            fica_taxes: dir.join(Self::FICA_TAXES_FILE),
            medicare_surtax: dir.join(Self::MEDICARE_SURTAX_FILE),
            state_tax_info: dir.join(Self::STATE_TAX_INFO_FILE),
            ss_wage_base: dir.join(Self::SS_WAGE_BASE_FILE),
        }
    }

    /// Parses TOML config text, resolving relative paths against `base_dir`.
    pub fn from_config_str(
        contents: &str,
        base_dir: &Path,
    ) -> Result<Self, toml::de::Error> {
        let config: TableConfig = toml::from_str(contents)?;
        let table_dir = match config.table_dir {
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        };

        let defaults = Self::from_dir(&table_dir);
        let pick = |file: Option<PathBuf>, default: PathBuf| match file {
            Some(file) => table_dir.join(file),
            None => default,
        };
        let files = config.files;

        Ok(Self {
            tax_brackets: pick(files.tax_brackets, defaults.tax_brackets),
            atl_deductions: pick(files.atl_deductions, defaults.atl_deductions),
            itemized_deductions: pick(files.itemized_deductions, defaults.itemized_deductions),
            tax_credits: pick(files.tax_credits, defaults.tax_credits),
            standard_deductions: pick(files.standard_deductions, defaults.standard_deductions),
            fica_taxes: pick(files.fica_taxes, defaults.fica_taxes),
            medicare_surtax: pick(files.medicare_surtax, defaults.medicare_surtax),
            state_tax_info: pick(files.state_tax_info, defaults.state_tax_info),
            ss_wage_base: pick(files.ss_wage_base, defaults.ss_wage_base),
        })
    }

    /// Reads a TOML config file; relative paths resolve against its directory.
    pub fn from_config_file(path: &Path) -> Result<Self, TableLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| TableLoadError::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_config_str(&contents, base_dir).map_err(|source| TableLoadError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_dir_uses_default_file_names() {
        let paths = TablePaths::from_dir("csv_files");

        assert_eq!(paths.tax_brackets, Path::new("csv_files/tax_brackets.csv"));
        assert_eq!(
            paths.ss_wage_base,
            Path::new("csv_files/max_ss_tax_income_limit.csv")
        );
    }

    #[test]
    fn empty_config_resolves_under_base_dir() {
        let paths = TablePaths::from_config_str("", Path::new("/etc/take-home")).unwrap();

        assert_eq!(paths, TablePaths::from_dir("/etc/take-home"));
    }

    #[test]
    fn table_dir_is_relative_to_base_dir() {
        let paths =
            TablePaths::from_config_str("table_dir = \"tables\"", Path::new("/etc/take-home"))
                .unwrap();

        assert_eq!(
            paths.fica_taxes,
            Path::new("/etc/take-home/tables/fica_taxes.csv")
        );
    }

    #[test]
    fn file_overrides_replace_single_entries() {
        let config = r#"
table_dir = "tables"

[files]
tax_brackets = "brackets_2025.csv"
state_tax_info = "/srv/state/ut.csv"
"#;

        let paths = TablePaths::from_config_str(config, Path::new("/cfg")).unwrap();

        assert_eq!(paths.tax_brackets, Path::new("/cfg/tables/brackets_2025.csv"));
        assert_eq!(paths.state_tax_info, Path::new("/srv/state/ut.csv"));
        assert_eq!(paths.tax_credits, Path::new("/cfg/tables/tax_credits.csv"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = TablePaths::from_config_str("tables = \"x\"", Path::new("."));

        assert!(result.is_err());
    }
}

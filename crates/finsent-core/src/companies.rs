use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    pub ticker: String,
}

impl CompanyConfig {
    /// NewsAPI query matching either the company name or its ticker.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{} OR {}", self.name, self.ticker)
    }

    /// File name of the company's raw CSV, e.g. `MSFT_Microsoft.csv`.
    #[must_use]
    pub fn csv_file_name(&self) -> String {
        format!("{}_{}.csv", self.ticker, self.name).replace(' ', "_")
    }
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyConfig>,
}

impl CompaniesFile {
    /// Case-insensitive lookup by company name or ticker.
    #[must_use]
    pub fn find(&self, name_or_ticker: &str) -> Option<&CompanyConfig> {
        self.companies.iter().find(|c| {
            c.name.eq_ignore_ascii_case(name_or_ticker)
                || c.ticker.eq_ignore_ascii_case(name_or_ticker)
        })
    }
}

/// Load and validate the companies configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_companies(path: &Path) -> Result<CompaniesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompaniesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let companies_file: CompaniesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CompaniesFileParse)?;

    validate_companies(&companies_file)?;

    Ok(companies_file)
}

fn validate_companies(companies_file: &CompaniesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_tickers = HashSet::new();

    for company in &companies_file.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        if company.ticker.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "company '{}' has an empty ticker",
                company.name
            )));
        }

        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }

        if !seen_tickers.insert(company.ticker.to_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate ticker: '{}' (from company '{}')",
                company.ticker, company.name
            )));
        }
    }

    Ok(())
}

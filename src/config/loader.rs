//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading credit
//! tables from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{CreditError, CreditResult};

use super::types::{
    CreditTables, JobLevelsConfig, PromotionConfig, RanksConfig, RatingsConfig,
};

/// Loads and provides access to the credit tables.
///
/// # Directory Structure
///
/// ```text
/// config/angka_kredit/
/// ├── ranks.yaml       # Rank hierarchy with baselines and deductions
/// ├── ratings.yaml     # Rating label -> percentage
/// ├── job_levels.yaml  # Job level label -> track and coefficient
/// └── promotion.yaml   # (rank, next rank) -> minimum credit
/// ```
///
/// # Example
///
/// ```no_run
/// use angka_kredit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/angka_kredit").unwrap();
/// let tables = loader.tables();
/// println!("Baik = {}%", tables.percentage_for("Baik"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: CreditTables,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// if the tables are inconsistent (empty or duplicated rank codes,
    /// thresholds naming unknown ranks).
    pub fn load<P: AsRef<Path>>(path: P) -> CreditResult<Self> {
        let path = path.as_ref();

        let ranks_path = path.join("ranks.yaml");
        let ranks = Self::load_yaml::<RanksConfig>(&ranks_path)?;

        let ratings = Self::load_yaml::<RatingsConfig>(&path.join("ratings.yaml"))?;
        let job_levels = Self::load_yaml::<JobLevelsConfig>(&path.join("job_levels.yaml"))?;

        let promotion_path = path.join("promotion.yaml");
        let promotion = Self::load_yaml::<PromotionConfig>(&promotion_path)?;

        Self::validate_ranks(&ranks, &ranks_path)?;
        Self::validate_thresholds(&ranks, &promotion, &promotion_path)?;

        let tables = CreditTables::new(
            ranks.ranks,
            ratings.ratings,
            job_levels.job_levels,
            promotion.thresholds,
        );

        Ok(Self { tables })
    }

    /// Wraps already-built tables.
    pub fn from_tables(tables: CreditTables) -> Self {
        Self { tables }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CreditResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CreditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CreditError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_ranks(ranks: &RanksConfig, path: &Path) -> CreditResult<()> {
        if ranks.ranks.is_empty() {
            return Err(CreditError::ConfigParseError {
                path: path.display().to_string(),
                message: "rank hierarchy is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for rank in &ranks.ranks {
            if !seen.insert(rank.code.as_str()) {
                return Err(CreditError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate rank code '{}'", rank.code),
                });
            }
        }

        Ok(())
    }

    fn validate_thresholds(
        ranks: &RanksConfig,
        promotion: &PromotionConfig,
        path: &Path,
    ) -> CreditResult<()> {
        let known = |code: &str| ranks.ranks.iter().any(|r| r.code == code);

        for threshold in &promotion.thresholds {
            for code in [&threshold.from, &threshold.to] {
                if !known(code.as_str()) {
                    return Err(CreditError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("threshold references unknown rank code '{}'", code),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the loaded credit tables.
    pub fn tables(&self) -> &CreditTables {
        &self.tables
    }
}

//! Configuration loading and management for the Angka Kredit engine.
//!
//! This module loads the credit lookup tables (ranks, ratings, job levels
//! and promotion thresholds) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use angka_kredit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/angka_kredit").unwrap();
//! println!("Loaded {} ranks", config.tables().ranks().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CareerTrack, CreditTables, JobLevel, JobLevelsConfig, PromotionConfig, PromotionThreshold,
    Rank, RanksConfig, RatingsConfig,
};

use crate::error::{AppError, Result};

/// Cost-per-mille models (cpm, cpd, cpv) bill per 1000 impressions,
/// downloads, or views.
pub const CPM_UNIT_SIZE: f64 = 1000.0;

/// Ad slots filled within a single publishing occurrence when the caller
/// does not say otherwise (one banner per send, one spot per episode).
pub const DEFAULT_SPOTS_PER_OCCURRENCE: f64 = 1.0;

/// Occurrences per average month for each recognized frequency label.
/// 4.33 = 52 weeks / 12 months; calendar months are not uniform, so these
/// are projection estimates, not accounting figures.
pub mod frequency_multipliers {
    pub const DAILY: f64 = 30.0;
    pub const WEEKLY: f64 = 4.33;
    pub const BI_WEEKLY: f64 = 2.17;
    pub const MONTHLY: f64 = 1.0;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "4020".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }
}

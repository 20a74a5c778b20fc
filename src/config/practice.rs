use std::time::Duration;

use crate::config::helpers::{parse_bool_env, parse_string_env, parse_u64_env};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::validation::ValidationOptions;

/// Longest workload window, in months.
pub const MAX_WORKLOAD_MONTHS: u32 = 24;
const MAX_LOOKUP_DELAY_MS: u64 = 30_000;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "PRACTICE_LOG_FORMAT".to_string(),
                message: format!("unsupported log format '{other}'"),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Simulated latency of the lookup stubs.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub address_delay: Duration,
    pub company_delay: Duration,
}

/// Workload distribution window.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub months: u32,
    pub high_load_threshold: usize,
}

/// Resolved practice configuration.
#[derive(Debug, Clone)]
pub struct PracticeConfig {
    pub lookup: LookupConfig,
    pub strict_trading_address: bool,
    pub workload: WorkloadConfig,
    pub log_format: LogFormat,
}

fn validate_lookup_delay(key: &str, raw: u64) -> Result<Duration, ConfigError> {
    if raw > MAX_LOOKUP_DELAY_MS {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("lookup delay must be at most {MAX_LOOKUP_DELAY_MS} ms"),
        });
    }
    Ok(Duration::from_millis(raw))
}

fn validate_workload_months(raw: u64) -> Result<u32, ConfigError> {
    if raw == 0 || raw > u64::from(MAX_WORKLOAD_MONTHS) {
        return Err(ConfigError::InvalidValue {
            key: "PRACTICE_WORKLOAD_MONTHS".to_string(),
            message: format!("workload window must be between 1 and {MAX_WORKLOAD_MONTHS} months"),
        });
    }
    u32::try_from(raw).map_err(|e| ConfigError::InvalidValue {
        key: "PRACTICE_WORKLOAD_MONTHS".to_string(),
        message: e.to_string(),
    })
}

fn validate_high_load_threshold(raw: u64) -> Result<usize, ConfigError> {
    usize::try_from(raw).map_err(|e| ConfigError::InvalidValue {
        key: "PRACTICE_HIGH_LOAD_THRESHOLD".to_string(),
        message: e.to_string(),
    })
}

impl PracticeConfig {
    /// Resolve settings, letting `PRACTICE_*` environment variables override them.
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let log_format_raw =
            parse_string_env("PRACTICE_LOG_FORMAT", settings.logging.format.clone())?;

        Ok(Self {
            lookup: LookupConfig {
                address_delay: validate_lookup_delay(
                    "PRACTICE_ADDRESS_LOOKUP_DELAY_MS",
                    parse_u64_env(
                        "PRACTICE_ADDRESS_LOOKUP_DELAY_MS",
                        settings.lookup.address_delay_ms,
                    )?,
                )?,
                company_delay: validate_lookup_delay(
                    "PRACTICE_COMPANY_LOOKUP_DELAY_MS",
                    parse_u64_env(
                        "PRACTICE_COMPANY_LOOKUP_DELAY_MS",
                        settings.lookup.company_delay_ms,
                    )?,
                )?,
            },
            strict_trading_address: parse_bool_env(
                "PRACTICE_STRICT_TRADING_ADDRESS",
                settings.validation.strict_trading_address,
            )?,
            workload: WorkloadConfig {
                months: validate_workload_months(parse_u64_env(
                    "PRACTICE_WORKLOAD_MONTHS",
                    settings.workload.months,
                )?)?,
                high_load_threshold: validate_high_load_threshold(parse_u64_env(
                    "PRACTICE_HIGH_LOAD_THRESHOLD",
                    settings.workload.high_load_threshold,
                )?)?,
            },
            log_format: LogFormat::from_str(&log_format_raw)?,
        })
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_trading_address: self.strict_trading_address,
        }
    }
}

//! Configuration for taxdesk.
//!
//! Settings come from an optional TOML file, then `PRACTICE_*` environment
//! variables override individual keys.

pub(crate) mod helpers;
mod practice;

pub use practice::{
    LogFormat, LookupConfig, MAX_WORKLOAD_MONTHS, PracticeConfig, WorkloadConfig,
};

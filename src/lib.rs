//! taxdesk: client records, query and validation for a small accounting practice.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod identifiers;
pub mod lookup;
pub mod practice;
pub mod query;
pub mod settings;
pub mod validation;

//! Structural validation of client forms.
//!
//! Each validator checks every field, collects all failures into
//! [`FieldErrors`] keyed by the form field name, and on success returns a
//! normalized `New*Client` ready to be stored.

mod business;
mod individual;

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::db::ClientStatus;
use crate::error::{FieldErrors, FormShapeError, InvalidIdentifier};

pub use business::{NewBusinessClient, validate_business};
pub use individual::{NewIndividualClient, discarded_utr, validate_individual};

pub const EMAIL_MESSAGE: &str = "Invalid email address";
pub const EMPLOYMENT_STATUS_MESSAGE: &str = "Invalid employment status";
pub const CLIENT_STATUS_MESSAGE: &str = "Invalid client status";
pub const ADDRESS_LINE1_MESSAGE: &str = "Address line 1 is required";
pub const CITY_MESSAGE: &str = "City is required";
pub const POSTCODE_MESSAGE: &str = "Postcode is required";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("valid email regex")
});

/// Switches that tighten validation beyond the default rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Require line 1, city and postcode of a distinct trading address.
    pub strict_trading_address: bool,
}

/// Decode a JSON form payload.
///
/// Missing keys take the editor defaults; a value of the wrong JSON type is a
/// caller bug and is reported as [`FormShapeError`].
pub fn parse_form<F: DeserializeOwned>(
    form: &'static str,
    payload: serde_json::Value,
) -> Result<F, FormShapeError> {
    serde_json::from_value(payload).map_err(|e| FormShapeError {
        form,
        reason: e.to_string(),
    })
}

pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors.insert(field, message);
    }
}

fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !is_valid_email(value) {
        errors.insert(field, EMAIL_MESSAGE);
    }
}

/// Keep a parsed identifier, or record its message against `field`.
fn identifier<T>(
    errors: &mut FieldErrors,
    field: &str,
    parsed: Result<T, InvalidIdentifier>,
) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(InvalidIdentifier(message)) => {
            errors.insert(field, message);
            None
        }
    }
}

fn client_status(errors: &mut FieldErrors, raw: Option<&str>) -> Option<ClientStatus> {
    match raw {
        None => Some(ClientStatus::default()),
        Some(value) => {
            let status = ClientStatus::from_db_value(value);
            if status.is_none() {
                errors.insert("clientStatus", CLIENT_STATUS_MESSAGE);
            }
            status
        }
    }
}

/// Trimmed text, or `None` when nothing but whitespace was entered.
fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

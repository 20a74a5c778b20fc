//! UK tax identifiers carried by client records.
//!
//! Each newtype can only be built through its format rule, so a record that
//! holds one never needs to re-check it. Deserialization goes through the same
//! rule.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidIdentifier;

pub const NI_NUMBER_MESSAGE: &str = "Invalid NI Number format (e.g. QQ123456C)";
pub const UTR_MESSAGE: &str = "UTR must be 10 digits";
pub const COMPANY_NUMBER_MESSAGE: &str = "Company number must be 8 characters";
pub const VAT_NUMBER_MESSAGE: &str = "VAT number must be 9 digits";

pub const UTR_LEN: usize = 10;
pub const COMPANY_NUMBER_LEN: usize = 8;
pub const VAT_NUMBER_LEN: usize = 9;

static NI_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{6}[A-Z]$").expect("valid NI number regex"));

fn has_exact_len(raw: &str, len: usize) -> bool {
    raw.chars().count() == len
}

/// Upper-case and trim identifier input before it reaches a validator.
///
/// Validators are case-sensitive; form layers call this on the raw value.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

macro_rules! identifier_string_impls {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// National Insurance number: two letters, six digits, one letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NiNumber(String);

impl NiNumber {
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        if NI_NUMBER_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdentifier(NI_NUMBER_MESSAGE))
        }
    }
}

identifier_string_impls!(NiNumber);

/// Unique Taxpayer Reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Utr(String);

impl Utr {
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        if has_exact_len(raw, UTR_LEN) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdentifier(UTR_MESSAGE))
        }
    }
}

identifier_string_impls!(Utr);

/// Companies House registration number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyNumber(String);

impl CompanyNumber {
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        if has_exact_len(raw, COMPANY_NUMBER_LEN) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdentifier(COMPANY_NUMBER_MESSAGE))
        }
    }
}

identifier_string_impls!(CompanyNumber);

/// VAT registration number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VatNumber(String);

impl VatNumber {
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        if has_exact_len(raw, VAT_NUMBER_LEN) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdentifier(VAT_NUMBER_MESSAGE))
        }
    }
}

identifier_string_impls!(VatNumber);

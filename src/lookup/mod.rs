//! Address and company lookups.
//!
//! The practice only needs "an address or company record, or nothing, after a
//! delay". [`AddressLookup`] and [`CompanyLookup`] are the seams; the `Mock*`
//! implementations serve fixed demo data. [`LookupService`] runs requests
//! through a [`LookupChannel`] so a slow response can never overwrite the
//! result of a newer request.

pub mod address;
pub mod channel;
pub mod company;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LookupConfig;
use crate::error::LookupError;

pub use address::MockAddressLookup;
pub use channel::{LookupChannel, RequestTicket};
pub use company::MockCompanyLookup;

/// A postal address candidate. `line2` is empty when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub postcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredOffice {
    pub address_line_1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub locality: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsFiling {
    pub next_accounts_due_on: String,
    pub next_made_up_to: String,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationStatement {
    pub next_due: String,
    pub overdue: bool,
}

/// Company profile in the registrar's wire shape. Dates stay as ISO strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,
    pub company_number: String,
    pub company_status: String,
    pub date_of_creation: String,
    #[serde(rename = "type")]
    pub company_type: String,
    pub registered_office_address: RegisteredOffice,
    pub accounts: AccountsFiling,
    pub confirmation_statement: ConfirmationStatement,
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Candidate addresses for a postcode.
    async fn find_addresses(&self, postcode: &str) -> Result<Vec<Address>, LookupError>;
}

#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn find_company(&self, company_number: &str) -> Result<CompanyProfile, LookupError>;
}

/// Lookups guarded against stale responses.
#[derive(Clone)]
pub struct LookupService {
    addresses: Arc<dyn AddressLookup>,
    companies: Arc<dyn CompanyLookup>,
}

impl LookupService {
    pub fn new(addresses: Arc<dyn AddressLookup>, companies: Arc<dyn CompanyLookup>) -> Self {
        Self {
            addresses,
            companies,
        }
    }

    /// Demo lookups with the configured delays.
    pub fn mock(config: &LookupConfig) -> Self {
        Self::new(
            Arc::new(MockAddressLookup::new(config.address_delay)),
            Arc::new(MockCompanyLookup::new(config.company_delay)),
        )
    }

    /// Blank input never takes a ticket, so a pending request on the same
    /// channel stays current.
    fn ignore_blank(channel: &LookupChannel) -> LookupError {
        debug!(channel = channel.name(), "blank lookup query ignored");
        LookupError::EmptyQuery
    }

    pub async fn search_addresses(
        &self,
        channel: &LookupChannel,
        postcode: &str,
    ) -> Result<Vec<Address>, LookupError> {
        if address::normalize_postcode(postcode).is_empty() {
            return Err(Self::ignore_blank(channel));
        }
        let addresses = channel.run(self.addresses.find_addresses(postcode)).await?;
        info!(
            channel = channel.name(),
            postcode,
            candidates = addresses.len(),
            "address lookup completed"
        );
        Ok(addresses)
    }

    pub async fn fetch_company(
        &self,
        channel: &LookupChannel,
        company_number: &str,
    ) -> Result<CompanyProfile, LookupError> {
        if company_number.is_empty() {
            return Err(Self::ignore_blank(channel));
        }
        let profile = channel
            .run(self.companies.find_company(company_number))
            .await?;
        info!(
            channel = channel.name(),
            company_number = %profile.company_number,
            company_name = %profile.company_name,
            "company lookup completed"
        );
        Ok(profile)
    }
}

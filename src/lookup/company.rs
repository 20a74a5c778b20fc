use std::time::Duration;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::identifiers::COMPANY_NUMBER_LEN;
use crate::lookup::{
    AccountsFiling, CompanyLookup, CompanyProfile, ConfirmationStatement, RegisteredOffice,
};

struct ProfileSeed {
    name: &'static str,
    created: &'static str,
    office: (&'static str, &'static str, &'static str),
    accounts_due: &'static str,
    made_up_to: &'static str,
    confirmation_due: &'static str,
}

const TECH_SOLUTIONS: ProfileSeed = ProfileSeed {
    name: "TECH SOLUTIONS LTD",
    created: "2020-05-15",
    office: ("123 Innovation Drive", "London", "EC1A 1BB"),
    accounts_due: "2026-05-31",
    made_up_to: "2025-08-31",
    confirmation_due: "2025-05-29",
};

const GREEN_GARDENS: ProfileSeed = ProfileSeed {
    name: "GREEN GARDENS CO",
    created: "2018-11-20",
    office: ("The Barn", "Leeds", "LS1 1AB"),
    accounts_due: "2025-08-31",
    made_up_to: "2024-11-30",
    confirmation_due: "2025-12-04",
};

const DEMO_COMPANY: ProfileSeed = ProfileSeed {
    name: "DEMO COMPANY LTD",
    created: "2023-01-01",
    office: ("123 Demo Street", "Manchester", "M1 1AA"),
    accounts_due: "2025-09-30",
    made_up_to: "2024-12-31",
    confirmation_due: "2025-01-14",
};

impl ProfileSeed {
    fn profile(&self, company_number: &str) -> CompanyProfile {
        let (line1, locality, postal_code) = self.office;
        CompanyProfile {
            company_name: self.name.to_string(),
            company_number: company_number.to_string(),
            company_status: "active".to_string(),
            date_of_creation: self.created.to_string(),
            company_type: "ltd".to_string(),
            registered_office_address: RegisteredOffice {
                address_line_1: line1.to_string(),
                address_line_2: None,
                locality: locality.to_string(),
                postal_code: postal_code.to_string(),
            },
            accounts: AccountsFiling {
                next_accounts_due_on: self.accounts_due.to_string(),
                next_made_up_to: self.made_up_to.to_string(),
                overdue: false,
            },
            confirmation_statement: ConfirmationStatement {
                next_due: self.confirmation_due.to_string(),
                overdue: false,
            },
        }
    }
}

/// Demo company registry.
///
/// Two numbers have fixed profiles. Any other query that is exactly eight
/// characters long gets a generic profile carrying that number.
#[derive(Debug, Clone)]
pub struct MockCompanyLookup {
    delay: Duration,
}

impl MockCompanyLookup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn resolve(query: &str) -> Option<CompanyProfile> {
        match query {
            "12345678" => Some(TECH_SOLUTIONS.profile(query)),
            "87654321" => Some(GREEN_GARDENS.profile(query)),
            _ if query.chars().count() == COMPANY_NUMBER_LEN => Some(DEMO_COMPANY.profile(query)),
            _ => None,
        }
    }
}

#[async_trait]
impl CompanyLookup for MockCompanyLookup {
    async fn find_company(&self, company_number: &str) -> Result<CompanyProfile, LookupError> {
        if company_number.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        tokio::time::sleep(self.delay).await;
        Self::resolve(company_number).ok_or_else(|| LookupError::NotFound {
            query: company_number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::MockCompanyLookup;
    use crate::error::LookupError;
    use crate::lookup::CompanyLookup;

    fn lookup() -> MockCompanyLookup {
        MockCompanyLookup::new(Duration::from_millis(1000))
    }

    #[tokio::test(start_paused = true)]
    async fn known_number_returns_fixed_profile() {
        let profile = lookup().find_company("12345678").await.expect("known");
        assert_eq!(profile.company_name, "TECH SOLUTIONS LTD");
        assert_eq!(profile.date_of_creation, "2020-05-15");
        assert_eq!(profile.registered_office_address.postal_code, "EC1A 1BB");
        assert_eq!(profile.accounts.next_accounts_due_on, "2026-05-31");
        assert_eq!(profile.confirmation_statement.next_due, "2025-05-29");
    }

    #[tokio::test(start_paused = true)]
    async fn other_eight_character_query_returns_synthetic_profile() {
        let profile = lookup().find_company("00000000").await.expect("synthetic");
        assert_eq!(profile.company_name, "DEMO COMPANY LTD");
        assert_eq!(profile.company_number, "00000000");
        assert_eq!(profile.registered_office_address.locality, "Manchester");
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_is_not_found() {
        let err = lookup().find_company("AB").await.expect_err("not found");
        assert_eq!(
            err,
            LookupError::NotFound {
                query: "AB".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn query_is_used_as_typed() {
        // Nine characters once the spaces are counted.
        let err = lookup().find_company(" 12345678").await.expect_err("raw query");
        assert!(matches!(err, LookupError::NotFound { .. }));
        assert_eq!(
            lookup().find_company("").await.expect_err("empty"),
            LookupError::EmptyQuery
        );
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_waits_for_configured_delay() {
        let started = Instant::now();
        lookup().find_company("87654321").await.expect("known");
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}

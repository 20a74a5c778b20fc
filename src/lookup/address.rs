use std::time::Duration;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::lookup::{Address, AddressLookup};

/// Postcodes with fixed demo candidates.
const KNOWN_POSTCODES: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "SW1A 1AA",
        &[
            ("Buckingham Palace", "Westminster", "London"),
            ("The Queen's Gallery", "Buckingham Palace Road", "London"),
        ],
    ),
    (
        "M1 1AA",
        &[
            ("1 Piccadilly Gardens", "", "Manchester"),
            ("City Tower", "Piccadilly Plaza", "Manchester"),
        ],
    ),
    (
        "EC1A 1BB",
        &[
            ("100 Farringdon Road", "", "London"),
            ("The Clerk's House", "Farringdon", "London"),
        ],
    ),
];

/// Postcode normalization used by the address lookup.
pub fn normalize_postcode(raw: &str) -> String {
    raw.to_uppercase().trim().to_string()
}

fn synthetic_candidates(postcode: &str) -> Vec<Address> {
    [
        (format!("1 {postcode} Street"), "City Centre"),
        (format!("Flat 1, 5 {postcode} Road"), "West End"),
        (format!("Unit 10, {postcode} Industrial Est"), ""),
    ]
    .into_iter()
    .map(|(line1, line2)| Address {
        line1,
        line2: line2.to_string(),
        city: "London".to_string(),
        postcode: postcode.to_string(),
    })
    .collect()
}

/// Demo address lookup. Unknown postcodes get three generated candidates.
#[derive(Debug, Clone)]
pub struct MockAddressLookup {
    delay: Duration,
}

impl MockAddressLookup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn candidates(postcode: &str) -> Vec<Address> {
        match KNOWN_POSTCODES.iter().find(|(known, _)| *known == postcode) {
            Some((_, entries)) => entries
                .iter()
                .map(|(line1, line2, city)| Address {
                    line1: (*line1).to_string(),
                    line2: (*line2).to_string(),
                    city: (*city).to_string(),
                    postcode: postcode.to_string(),
                })
                .collect(),
            None => synthetic_candidates(postcode),
        }
    }
}

#[async_trait]
impl AddressLookup for MockAddressLookup {
    async fn find_addresses(&self, postcode: &str) -> Result<Vec<Address>, LookupError> {
        let normalized = normalize_postcode(postcode);
        if normalized.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        tokio::time::sleep(self.delay).await;
        Ok(Self::candidates(&normalized))
    }
}

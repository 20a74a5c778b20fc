//! Raw form state for the client editors.
//!
//! Fields mirror the editor inputs one to one and are keyed in camelCase on
//! the wire. Nothing here is validated; see [`crate::validation`]. Lookup
//! results are merged with the `apply_*` methods, each of which replaces all
//! affected fields in a single assignment.

use serde::{Deserialize, Serialize};

use crate::db::{BusinessClientRecord, IndividualClientRecord, TradingAddress};
use crate::lookup::{Address, CompanyProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndividualClientForm {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub postcode: String,
    pub national_insurance_number: String,
    pub has_utr: bool,
    pub utr_number: String,
    pub employment_status: String,
    pub income_sources: String,
    pub client_status: Option<String>,
    pub special_notes: String,
}

impl Default for IndividualClientForm {
    fn default() -> Self {
        Self {
            id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            postcode: String::new(),
            national_insurance_number: String::new(),
            has_utr: false,
            utr_number: String::new(),
            employment_status: "employed".to_string(),
            income_sources: String::new(),
            client_status: Some("active".to_string()),
            special_notes: String::new(),
        }
    }
}

impl IndividualClientForm {
    /// Editor state for an existing client.
    pub fn from_record(record: &IndividualClientRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address_line1: record.address.line1.clone(),
            address_line2: record.address.line2.clone().unwrap_or_default(),
            city: record.address.city.clone(),
            postcode: record.address.postcode.clone(),
            national_insurance_number: record.ni_number.to_string(),
            has_utr: record.utr.utr().is_some(),
            utr_number: record
                .utr
                .utr()
                .map(ToString::to_string)
                .unwrap_or_default(),
            employment_status: record.employment_status.as_str().to_string(),
            income_sources: record.income_sources.clone().unwrap_or_default(),
            client_status: Some(record.status.as_str().to_string()),
            special_notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Overwrite the home address with a lookup candidate.
    pub fn apply_address(&mut self, address: &Address) {
        *self = Self {
            address_line1: address.line1.clone(),
            address_line2: address.line2.clone(),
            city: address.city.clone(),
            postcode: address.postcode.clone(),
            ..std::mem::take(self)
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessClientForm {
    pub id: Option<String>,
    pub company_name: String,
    pub company_number: String,
    pub utr_number: String,
    pub vat_number: String,
    pub paye_reference: String,
    pub responsible_person_name: String,
    pub responsible_person_email: String,
    pub responsible_person_phone: String,
    pub registered_address_line1: String,
    pub registered_address_line2: String,
    pub registered_city: String,
    pub registered_postcode: String,
    pub trading_address_same: bool,
    pub trading_address_line1: String,
    pub trading_address_line2: String,
    pub trading_city: String,
    pub trading_postcode: String,
    pub client_status: Option<String>,
    pub special_notes: String,
}

impl Default for BusinessClientForm {
    fn default() -> Self {
        Self {
            id: None,
            company_name: String::new(),
            company_number: String::new(),
            utr_number: String::new(),
            vat_number: String::new(),
            paye_reference: String::new(),
            responsible_person_name: String::new(),
            responsible_person_email: String::new(),
            responsible_person_phone: String::new(),
            registered_address_line1: String::new(),
            registered_address_line2: String::new(),
            registered_city: String::new(),
            registered_postcode: String::new(),
            trading_address_same: true,
            trading_address_line1: String::new(),
            trading_address_line2: String::new(),
            trading_city: String::new(),
            trading_postcode: String::new(),
            client_status: Some("active".to_string()),
            special_notes: String::new(),
        }
    }
}

impl BusinessClientForm {
    pub fn from_record(record: &BusinessClientRecord) -> Self {
        let registered = &record.registered_address;
        let mut form = Self {
            id: Some(record.id.clone()),
            company_name: record.company_name.clone(),
            company_number: record.company_number.to_string(),
            utr_number: record.utr.to_string(),
            vat_number: record
                .vat_number
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            paye_reference: record.paye_reference.clone().unwrap_or_default(),
            responsible_person_name: record.responsible_person.name.clone(),
            responsible_person_email: record.responsible_person.email.clone(),
            responsible_person_phone: record.responsible_person.phone.clone(),
            registered_address_line1: registered.line1.clone(),
            registered_address_line2: registered.line2.clone().unwrap_or_default(),
            registered_city: registered.city.clone(),
            registered_postcode: registered.postcode.clone(),
            client_status: Some(record.status.as_str().to_string()),
            special_notes: record.notes.clone().unwrap_or_default(),
            ..Self::default()
        };
        if let TradingAddress::Distinct { address } = &record.trading_address {
            form.trading_address_same = false;
            form.trading_address_line1 = address.line1.clone();
            form.trading_address_line2 = address.line2.clone().unwrap_or_default();
            form.trading_city = address.city.clone();
            form.trading_postcode = address.postcode.clone();
        }
        form
    }

    pub fn apply_registered_address(&mut self, address: &Address) {
        *self = Self {
            registered_address_line1: address.line1.clone(),
            registered_address_line2: address.line2.clone(),
            registered_city: address.city.clone(),
            registered_postcode: address.postcode.clone(),
            ..std::mem::take(self)
        };
    }

    pub fn apply_trading_address(&mut self, address: &Address) {
        *self = Self {
            trading_address_line1: address.line1.clone(),
            trading_address_line2: address.line2.clone(),
            trading_city: address.city.clone(),
            trading_postcode: address.postcode.clone(),
            ..std::mem::take(self)
        };
    }

    /// Import name, number and registered office from a company profile.
    ///
    /// A missing second address line clears the field.
    pub fn apply_company_profile(&mut self, profile: &CompanyProfile) {
        let office = &profile.registered_office_address;
        *self = Self {
            company_name: profile.company_name.clone(),
            company_number: profile.company_number.clone(),
            registered_address_line1: office.address_line_1.clone(),
            registered_address_line2: office.address_line_2.clone().unwrap_or_default(),
            registered_city: office.locality.clone(),
            registered_postcode: office.postal_code.clone(),
            ..std::mem::take(self)
        };
    }
}

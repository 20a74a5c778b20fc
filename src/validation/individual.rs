use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{
    ClientStatus, EmploymentStatus, IndividualClientRecord, PostalAddress, UtrRegistration,
};
use crate::error::FieldErrors;
use crate::forms::IndividualClientForm;
use crate::identifiers::{NiNumber, Utr};
use crate::validation::{
    ADDRESS_LINE1_MESSAGE, CITY_MESSAGE, EMPLOYMENT_STATUS_MESSAGE, POSTCODE_MESSAGE,
    ValidationOptions, check_email, client_status, identifier, optional_text, require,
};

/// A validated individual client, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIndividualClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: PostalAddress,
    pub ni_number: NiNumber,
    pub utr: UtrRegistration,
    pub employment_status: EmploymentStatus,
    pub income_sources: Option<String>,
    pub status: ClientStatus,
    pub notes: Option<String>,
}

impl NewIndividualClient {
    pub fn into_record(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> IndividualClientRecord {
        IndividualClientRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            ni_number: self.ni_number,
            utr: self.utr,
            employment_status: self.employment_status,
            income_sources: self.income_sources,
            status: self.status,
            notes: self.notes,
            created_at,
            updated_at,
        }
    }
}

/// UTR text typed into a form whose client is not registered.
///
/// Validation ignores it; callers may want to surface that it was dropped.
pub fn discarded_utr(form: &IndividualClientForm) -> Option<&str> {
    let typed = form.utr_number.trim();
    (!form.has_utr && !typed.is_empty()).then_some(typed)
}

/// Self-assessment registration. The UTR number is only read when registered.
fn utr_registration(
    errors: &mut FieldErrors,
    form: &IndividualClientForm,
) -> Option<UtrRegistration> {
    if !form.has_utr {
        if let Some(typed) = discarded_utr(form) {
            tracing::warn!(
                chars = typed.chars().count(),
                "UTR number ignored for client without UTR registration"
            );
        }
        return Some(UtrRegistration::NotRegistered);
    }
    identifier(errors, "utrNumber", Utr::parse(&form.utr_number))
        .map(|utr| UtrRegistration::Registered { utr })
}

pub fn validate_individual(
    form: &IndividualClientForm,
    _options: &ValidationOptions,
) -> Result<NewIndividualClient, FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "firstName", &form.first_name, "First name is required");
    require(&mut errors, "lastName", &form.last_name, "Last name is required");
    check_email(&mut errors, "email", &form.email);
    require(&mut errors, "phone", &form.phone, "Phone number is required");
    require(&mut errors, "addressLine1", &form.address_line1, ADDRESS_LINE1_MESSAGE);
    require(&mut errors, "city", &form.city, CITY_MESSAGE);
    require(&mut errors, "postcode", &form.postcode, POSTCODE_MESSAGE);

    let ni_number = identifier(
        &mut errors,
        "nationalInsuranceNumber",
        NiNumber::parse(&form.national_insurance_number),
    );
    let utr = utr_registration(&mut errors, form);
    let employment_status = EmploymentStatus::from_db_value(&form.employment_status);
    if employment_status.is_none() {
        errors.insert("employmentStatus", EMPLOYMENT_STATUS_MESSAGE);
    }
    let status = client_status(&mut errors, form.client_status.as_deref());

    match (ni_number, utr, employment_status, status) {
        (Some(ni_number), Some(utr), Some(employment_status), Some(status))
            if errors.is_empty() =>
        {
            Ok(NewIndividualClient {
                first_name: form.first_name.clone(),
                last_name: form.last_name.clone(),
                email: form.email.clone(),
                phone: form.phone.clone(),
                address: PostalAddress {
                    line1: form.address_line1.clone(),
                    line2: optional_text(&form.address_line2),
                    city: form.city.clone(),
                    postcode: form.postcode.clone(),
                },
                ni_number,
                utr,
                employment_status,
                income_sources: optional_text(&form.income_sources),
                status,
                notes: optional_text(&form.special_notes),
            })
        }
        _ => Err(errors),
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{BusinessClientRecord, ClientStatus, ContactPerson, PostalAddress, TradingAddress};
use crate::error::FieldErrors;
use crate::forms::BusinessClientForm;
use crate::identifiers::{CompanyNumber, Utr, VatNumber};
use crate::validation::{
    ADDRESS_LINE1_MESSAGE, CITY_MESSAGE, POSTCODE_MESSAGE, ValidationOptions, check_email,
    client_status, identifier, optional_text, require,
};

/// A validated business client, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBusinessClient {
    pub company_name: String,
    pub company_number: CompanyNumber,
    pub utr: Utr,
    pub vat_number: Option<VatNumber>,
    pub paye_reference: Option<String>,
    pub responsible_person: ContactPerson,
    pub registered_address: PostalAddress,
    pub trading_address: TradingAddress,
    pub status: ClientStatus,
    pub notes: Option<String>,
}

impl NewBusinessClient {
    pub fn into_record(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> BusinessClientRecord {
        BusinessClientRecord {
            id,
            company_name: self.company_name,
            company_number: self.company_number,
            utr: self.utr,
            vat_number: self.vat_number,
            paye_reference: self.paye_reference,
            responsible_person: self.responsible_person,
            registered_address: self.registered_address,
            trading_address: self.trading_address,
            status: self.status,
            notes: self.notes,
            created_at,
            updated_at,
        }
    }
}

fn trading_address(
    errors: &mut FieldErrors,
    form: &BusinessClientForm,
    options: &ValidationOptions,
) -> TradingAddress {
    if form.trading_address_same {
        return TradingAddress::SameAsRegistered;
    }
    if options.strict_trading_address {
        require(errors, "tradingAddressLine1", &form.trading_address_line1, ADDRESS_LINE1_MESSAGE);
        require(errors, "tradingCity", &form.trading_city, CITY_MESSAGE);
        require(errors, "tradingPostcode", &form.trading_postcode, POSTCODE_MESSAGE);
    }
    TradingAddress::Distinct {
        address: PostalAddress {
            line1: form.trading_address_line1.clone(),
            line2: optional_text(&form.trading_address_line2),
            city: form.trading_city.clone(),
            postcode: form.trading_postcode.clone(),
        },
    }
}

pub fn validate_business(
    form: &BusinessClientForm,
    options: &ValidationOptions,
) -> Result<NewBusinessClient, FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "companyName", &form.company_name, "Company name is required");
    let company_number = identifier(
        &mut errors,
        "companyNumber",
        CompanyNumber::parse(&form.company_number),
    );
    let utr = identifier(&mut errors, "utrNumber", Utr::parse(&form.utr_number));
    let vat_number = if form.vat_number.is_empty() {
        Some(None)
    } else {
        identifier(&mut errors, "vatNumber", VatNumber::parse(&form.vat_number)).map(Some)
    };

    require(
        &mut errors,
        "responsiblePersonName",
        &form.responsible_person_name,
        "Responsible person name is required",
    );
    check_email(&mut errors, "responsiblePersonEmail", &form.responsible_person_email);
    require(
        &mut errors,
        "responsiblePersonPhone",
        &form.responsible_person_phone,
        "Responsible person phone is required",
    );

    require(
        &mut errors,
        "registeredAddressLine1",
        &form.registered_address_line1,
        ADDRESS_LINE1_MESSAGE,
    );
    require(&mut errors, "registeredCity", &form.registered_city, CITY_MESSAGE);
    require(&mut errors, "registeredPostcode", &form.registered_postcode, POSTCODE_MESSAGE);

    let trading_address = trading_address(&mut errors, form, options);
    let status = client_status(&mut errors, form.client_status.as_deref());

    match (company_number, utr, vat_number, status) {
        (Some(company_number), Some(utr), Some(vat_number), Some(status))
            if errors.is_empty() =>
        {
            Ok(NewBusinessClient {
                company_name: form.company_name.clone(),
                company_number,
                utr,
                vat_number,
                paye_reference: optional_text(&form.paye_reference),
                responsible_person: ContactPerson {
                    name: form.responsible_person_name.clone(),
                    email: form.responsible_person_email.clone(),
                    phone: form.responsible_person_phone.clone(),
                },
                registered_address: PostalAddress {
                    line1: form.registered_address_line1.clone(),
                    line2: optional_text(&form.registered_address_line2),
                    city: form.registered_city.clone(),
                    postcode: form.registered_postcode.clone(),
                },
                trading_address,
                status,
                notes: optional_text(&form.special_notes),
            })
        }
        _ => Err(errors),
    }
}

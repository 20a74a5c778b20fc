//! Searchable fields and facets of the practice record types.

use std::borrow::Cow;

use crate::db::{BusinessClientRecord, IndividualClientRecord, ServiceRecord, TaskRecord};
use crate::query::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndividualField {
    FirstName,
    LastName,
    Email,
    Phone,
    NiNumber,
    Postcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndividualFacet {
    Status,
    EmploymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessField {
    CompanyName,
    CompanyNumber,
    ResponsiblePerson,
    ResponsiblePersonEmail,
    VatNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessFacet {
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Name,
    Category,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFacet {
    Category,
    Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    ClientName,
    Description,
    AssignedTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFacet {
    Status,
    Priority,
    Type,
}

/// Fields searched by the individual client list.
pub const INDIVIDUAL_LIST_FIELDS: &[IndividualField] = &[
    IndividualField::FirstName,
    IndividualField::LastName,
    IndividualField::Email,
];

/// Fields searched by the business client list.
pub const BUSINESS_LIST_FIELDS: &[BusinessField] = &[
    BusinessField::CompanyName,
    BusinessField::CompanyNumber,
    BusinessField::ResponsiblePerson,
];

pub const SERVICE_LIST_FIELDS: &[ServiceField] = &[ServiceField::Name, ServiceField::Category];

pub const TASK_LIST_FIELDS: &[TaskField] = &[TaskField::Title, TaskField::ClientName];

impl Searchable for IndividualClientRecord {
    type Field = IndividualField;
    type Facet = IndividualFacet;

    fn field_text(&self, field: IndividualField) -> Option<Cow<'_, str>> {
        let text = match field {
            IndividualField::FirstName => self.first_name.as_str(),
            IndividualField::LastName => self.last_name.as_str(),
            IndividualField::Email => self.email.as_str(),
            IndividualField::Phone => self.phone.as_str(),
            IndividualField::NiNumber => self.ni_number.as_str(),
            IndividualField::Postcode => self.address.postcode.as_str(),
        };
        Some(Cow::Borrowed(text))
    }

    fn facet_value(&self, facet: IndividualFacet) -> Option<&'static str> {
        match facet {
            IndividualFacet::Status => Some(self.status.as_str()),
            IndividualFacet::EmploymentStatus => Some(self.employment_status.as_str()),
        }
    }
}

impl Searchable for BusinessClientRecord {
    type Field = BusinessField;
    type Facet = BusinessFacet;

    fn field_text(&self, field: BusinessField) -> Option<Cow<'_, str>> {
        match field {
            BusinessField::CompanyName => Some(Cow::Borrowed(&self.company_name)),
            BusinessField::CompanyNumber => Some(Cow::Borrowed(self.company_number.as_str())),
            BusinessField::ResponsiblePerson => {
                Some(Cow::Borrowed(&self.responsible_person.name))
            }
            BusinessField::ResponsiblePersonEmail => {
                Some(Cow::Borrowed(&self.responsible_person.email))
            }
            BusinessField::VatNumber => self
                .vat_number
                .as_ref()
                .map(|vat| Cow::Borrowed(vat.as_str())),
        }
    }

    fn facet_value(&self, facet: BusinessFacet) -> Option<&'static str> {
        match facet {
            BusinessFacet::Status => Some(self.status.as_str()),
        }
    }
}

impl Searchable for ServiceRecord {
    type Field = ServiceField;
    type Facet = ServiceFacet;

    fn field_text(&self, field: ServiceField) -> Option<Cow<'_, str>> {
        match field {
            ServiceField::Name => Some(Cow::Borrowed(&self.name)),
            ServiceField::Category => Some(Cow::Borrowed(self.category.as_str())),
            ServiceField::Description => Some(Cow::Borrowed(&self.description)),
        }
    }

    fn facet_value(&self, facet: ServiceFacet) -> Option<&'static str> {
        match facet {
            ServiceFacet::Category => Some(self.category.as_str()),
            ServiceFacet::Frequency => Some(self.default_frequency.as_str()),
        }
    }
}

impl Searchable for TaskRecord {
    type Field = TaskField;
    type Facet = TaskFacet;

    fn field_text(&self, field: TaskField) -> Option<Cow<'_, str>> {
        match field {
            TaskField::Title => Some(Cow::Borrowed(&self.title)),
            TaskField::ClientName => Some(Cow::Borrowed(&self.client_name)),
            TaskField::Description => self.description.as_deref().map(Cow::Borrowed),
            TaskField::AssignedTo => self.assigned_to.as_deref().map(Cow::Borrowed),
        }
    }

    fn facet_value(&self, facet: TaskFacet) -> Option<&'static str> {
        match facet {
            TaskFacet::Status => Some(self.status.as_str()),
            TaskFacet::Priority => Some(self.priority.as_str()),
            TaskFacet::Type => Some(self.task_type.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        BUSINESS_LIST_FIELDS, INDIVIDUAL_LIST_FIELDS, IndividualFacet, IndividualField,
        SERVICE_LIST_FIELDS, ServiceFacet, TASK_LIST_FIELDS, TaskFacet,
    };
    use crate::db::seed::demo_data;
    use crate::db::{BusinessClientRecord, IndividualClientRecord, ServiceRecord, TaskRecord};
    use crate::query::{FacetFilter, RecordQuery, filter_records};

    #[test]
    fn individual_list_searches_names_and_email_only() {
        let data = demo_data().expect("demo data");
        let by_email = RecordQuery::<IndividualClientRecord>::new(INDIVIDUAL_LIST_FIELDS).search("JANE.SMITH@");
        let found = filter_records(&data.individual_clients, &by_email);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name(), "Jane Smith");

        let list_by_phone = RecordQuery::<IndividualClientRecord>::new(INDIVIDUAL_LIST_FIELDS).search("900456");
        assert!(filter_records(&data.individual_clients, &list_by_phone).is_empty());
        let by_phone = RecordQuery::<IndividualClientRecord>::new(&[IndividualField::Phone]).search("900456");
        assert_eq!(filter_records(&data.individual_clients, &by_phone).len(), 1);

        let by_ni = RecordQuery::<IndividualClientRecord>::new(INDIVIDUAL_LIST_FIELDS).search("QQ123456C");
        assert!(filter_records(&data.individual_clients, &by_ni).is_empty());
    }

    #[test]
    fn individual_status_facet_uses_wire_values() {
        let data = demo_data().expect("demo data");
        let query = RecordQuery::<IndividualClientRecord>::new(INDIVIDUAL_LIST_FIELDS)
            .facet(IndividualFacet::Status, FacetFilter::from_param(Some("active")));
        let ids: Vec<&str> = filter_records(&data.individual_clients, &query)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ind-1", "ind-2"]);
    }

    #[test]
    fn business_list_matches_company_number_and_responsible_person() {
        let data = demo_data().expect("demo data");
        let by_number = RecordQuery::<BusinessClientRecord>::new(BUSINESS_LIST_FIELDS).search("8765");
        assert_eq!(filter_records(&data.business_clients, &by_number)[0].id, "bus-2");

        let by_person = RecordQuery::<BusinessClientRecord>::new(BUSINESS_LIST_FIELDS).search("alice");
        assert_eq!(filter_records(&data.business_clients, &by_person)[0].id, "bus-1");
    }

    #[test]
    fn service_search_covers_category_text() {
        let data = demo_data().expect("demo data");
        let query = RecordQuery::<ServiceRecord>::new(SERVICE_LIST_FIELDS).search("ACCOUNTS");
        let ids: Vec<&str> = filter_records(&data.services, &query)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["annual-accounts", "bookkeeping"]);

        let payroll = RecordQuery::<ServiceRecord>::new(SERVICE_LIST_FIELDS)
            .facet(ServiceFacet::Category, FacetFilter::from_param(Some("payroll")));
        assert_eq!(filter_records(&data.services, &payroll).len(), 1);
    }

    #[test]
    fn task_facets_combine_as_conjunction() {
        let data = demo_data().expect("demo data");
        let query = RecordQuery::<TaskRecord>::new(TASK_LIST_FIELDS)
            .facet(TaskFacet::Type, FacetFilter::from_param(Some("tax_return")))
            .facet(TaskFacet::Priority, FacetFilter::from_param(Some("high")));
        let found = filter_records(&data.tasks, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Q3 VAT Return");

        let by_client = RecordQuery::<TaskRecord>::new(TASK_LIST_FIELDS)
            .search("tech")
            .facet(TaskFacet::Status, FacetFilter::any_of(["review", "completed"]));
        assert_eq!(filter_records(&data.tasks, &by_client)[0].id, "task-5");
    }
}

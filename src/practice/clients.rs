//! Client directory: list, search, detail and save for both client types.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    BusinessClientRecord, CommunicationRecord, DocumentRecord, IndividualClientRecord, Record,
    RecordStore,
};
use crate::error::{ServiceError, StoreError};
use crate::forms::{BusinessClientForm, IndividualClientForm};
use crate::query::{
    BUSINESS_LIST_FIELDS, BusinessFacet, FacetFilter, INDIVIDUAL_LIST_FIELDS, IndividualFacet,
    RecordQuery, filter_records,
};
use crate::validation::{ValidationOptions, validate_business, validate_individual};

/// Communications and documents for one client, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ClientActivity {
    pub communications: Vec<CommunicationRecord>,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndividualClientDetail {
    pub client: IndividualClientRecord,
    pub activity: ClientActivity,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessClientDetail {
    pub client: BusinessClientRecord,
    pub activity: ClientActivity,
}

#[derive(Clone)]
pub struct ClientDirectory {
    store: RecordStore,
    options: ValidationOptions,
}

impl ClientDirectory {
    pub fn new(store: RecordStore, options: ValidationOptions) -> Self {
        Self { store, options }
    }

    pub async fn search_individuals(
        &self,
        search: &str,
        status: FacetFilter,
    ) -> Result<Vec<IndividualClientRecord>, StoreError> {
        let clients = self.store.individual_clients.list().await?;
        let query = RecordQuery::<IndividualClientRecord>::new(INDIVIDUAL_LIST_FIELDS)
            .search(search)
            .facet(IndividualFacet::Status, status);
        Ok(filter_records(&clients, &query).into_iter().cloned().collect())
    }

    pub async fn search_businesses(
        &self,
        search: &str,
        status: FacetFilter,
    ) -> Result<Vec<BusinessClientRecord>, StoreError> {
        let clients = self.store.business_clients.list().await?;
        let query = RecordQuery::<BusinessClientRecord>::new(BUSINESS_LIST_FIELDS)
            .search(search)
            .facet(BusinessFacet::Status, status);
        Ok(filter_records(&clients, &query).into_iter().cloned().collect())
    }

    pub async fn individual_detail(&self, id: &str) -> Result<IndividualClientDetail, StoreError> {
        let client = self
            .store
            .individual_clients
            .find(id)
            .await?
            .ok_or_else(|| not_found::<IndividualClientRecord>(id))?;
        let activity = self.activity(id).await?;
        Ok(IndividualClientDetail { client, activity })
    }

    pub async fn business_detail(&self, id: &str) -> Result<BusinessClientDetail, StoreError> {
        let client = self
            .store
            .business_clients
            .find(id)
            .await?
            .ok_or_else(|| not_found::<BusinessClientRecord>(id))?;
        let activity = self.activity(id).await?;
        Ok(BusinessClientDetail { client, activity })
    }

    async fn activity(&self, client_id: &str) -> Result<ClientActivity, StoreError> {
        let mut communications: Vec<CommunicationRecord> = self
            .store
            .communications
            .list()
            .await?
            .into_iter()
            .filter(|c| c.client_id == client_id)
            .collect();
        communications.sort_by(|a, b| b.date.cmp(&a.date));

        let mut documents: Vec<DocumentRecord> = self
            .store
            .documents
            .list()
            .await?
            .into_iter()
            .filter(|d| d.client_id == client_id)
            .collect();
        documents.sort_by(|a, b| b.uploaded_date.cmp(&a.uploaded_date));

        Ok(ClientActivity {
            communications,
            documents,
        })
    }

    /// Validate and store an individual client form.
    ///
    /// A form without an id creates a client; with an id it updates that
    /// client and keeps its creation time.
    pub async fn save_individual(
        &self,
        form: &IndividualClientForm,
    ) -> Result<IndividualClientRecord, ServiceError> {
        let client = validate_individual(form, &self.options)?;
        let now = Utc::now();
        let (id, created_at) = match form.id.as_deref() {
            Some(id) => {
                let existing = self
                    .store
                    .individual_clients
                    .find(id)
                    .await?
                    .ok_or_else(|| not_found::<IndividualClientRecord>(id))?;
                (existing.id, existing.created_at)
            }
            None => (Uuid::new_v4().to_string(), now),
        };
        let created = form.id.is_none();
        let record = self
            .store
            .individual_clients
            .save(client.into_record(id, created_at, now))
            .await?;
        tracing::info!(
            client_id = %record.id,
            created,
            status = record.status.as_str(),
            "Individual client saved"
        );
        Ok(record)
    }

    pub async fn save_business(
        &self,
        form: &BusinessClientForm,
    ) -> Result<BusinessClientRecord, ServiceError> {
        let client = validate_business(form, &self.options)?;
        let now = Utc::now();
        let (id, created_at) = match form.id.as_deref() {
            Some(id) => {
                let existing = self
                    .store
                    .business_clients
                    .find(id)
                    .await?
                    .ok_or_else(|| not_found::<BusinessClientRecord>(id))?;
                (existing.id, existing.created_at)
            }
            None => (Uuid::new_v4().to_string(), now),
        };
        let created = form.id.is_none();
        let record = self
            .store
            .business_clients
            .save(client.into_record(id, created_at, now))
            .await?;
        tracing::info!(
            client_id = %record.id,
            created,
            company_number = %record.company_number,
            "Business client saved"
        );
        Ok(record)
    }
}

fn not_found<T: Record>(id: &str) -> StoreError {
    StoreError::NotFound {
        entity: T::ENTITY,
        id: id.to_string(),
    }
}

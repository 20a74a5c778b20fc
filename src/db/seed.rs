//! Demo records loaded from the bundled `demo_data.toml`.

use std::sync::Arc;

use serde::Deserialize;

use crate::db::{
    BusinessClientRecord, ClientServiceRecord, CommunicationRecord, DocumentRecord,
    InMemoryRepository, IndividualClientRecord, InvoiceRecord, RecordStore, ServiceRecord,
    TaskRecord, TimeEntryRecord,
};
use crate::error::StoreError;

const DEMO_DATA: &str = include_str!("demo_data.toml");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoData {
    pub individual_clients: Vec<IndividualClientRecord>,
    pub business_clients: Vec<BusinessClientRecord>,
    pub services: Vec<ServiceRecord>,
    pub client_services: Vec<ClientServiceRecord>,
    pub tasks: Vec<TaskRecord>,
    pub time_entries: Vec<TimeEntryRecord>,
    pub invoices: Vec<InvoiceRecord>,
    pub communications: Vec<CommunicationRecord>,
    pub documents: Vec<DocumentRecord>,
}

impl DemoData {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        toml::from_str(raw).map_err(|e| StoreError::Seed {
            reason: format!("invalid demo data TOML: {e}"),
        })
    }

    /// Move every collection into its own in-memory repository.
    pub fn into_store(self) -> RecordStore {
        RecordStore {
            individual_clients: Arc::new(InMemoryRepository::with_records(
                self.individual_clients,
            )),
            business_clients: Arc::new(InMemoryRepository::with_records(self.business_clients)),
            services: Arc::new(InMemoryRepository::with_records(self.services)),
            client_services: Arc::new(InMemoryRepository::with_records(self.client_services)),
            tasks: Arc::new(InMemoryRepository::with_records(self.tasks)),
            time_entries: Arc::new(InMemoryRepository::with_records(self.time_entries)),
            invoices: Arc::new(InMemoryRepository::with_records(self.invoices)),
            communications: Arc::new(InMemoryRepository::with_records(self.communications)),
            documents: Arc::new(InMemoryRepository::with_records(self.documents)),
        }
    }
}

/// The bundled demo records.
pub fn demo_data() -> Result<DemoData, StoreError> {
    DemoData::parse(DEMO_DATA)
}

/// A fresh store holding the bundled demo records.
///
/// Every call builds new repositories; stores never share state.
pub fn demo_store() -> Result<RecordStore, StoreError> {
    Ok(demo_data()?.into_store())
}

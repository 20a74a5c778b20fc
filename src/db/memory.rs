use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::{Record, Repository};
use crate::error::StoreError;

/// Insertion-ordered collection held behind a tokio `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, id: &str) -> Result<Option<T>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn save(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::InMemoryRepository;
    use crate::db::{Repository, ServiceCategory, ServiceFrequency, ServiceRecord};

    fn service(id: &str, name: &str) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            default_frequency: ServiceFrequency::Annual,
            default_fee: Some(dec!(250)),
            category: ServiceCategory::Tax,
        }
    }

    #[tokio::test]
    async fn save_replaces_in_place_and_appends_new_ids() {
        let repo = InMemoryRepository::with_records(vec![
            service("svc-1", "Self Assessment"),
            service("svc-2", "VAT Returns"),
        ]);

        repo.save(service("svc-1", "Self Assessment Return"))
            .await
            .expect("update");
        repo.save(service("svc-3", "Payroll")).await.expect("insert");

        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec!["Self Assessment Return", "VAT Returns", "Payroll"]
        );
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_id() {
        let repo: InMemoryRepository<ServiceRecord> = InMemoryRepository::new();
        assert!(repo.find("missing").await.expect("find").is_none());

        repo.save(service("svc-9", "Bookkeeping")).await.expect("insert");
        let found = repo.find("svc-9").await.expect("find").expect("present");
        assert_eq!(found.name, "Bookkeeping");
    }
}

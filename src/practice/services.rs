use serde::Serialize;

use crate::db::{ClientServiceRecord, RecordStore, ServiceRecord};
use crate::error::StoreError;
use crate::query::{FacetFilter, RecordQuery, SERVICE_LIST_FIELDS, ServiceFacet, filter_records};

/// A client's engagement joined with its catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct ClientServiceView {
    pub engagement: ClientServiceRecord,
    pub service: ServiceRecord,
}

#[derive(Clone)]
pub struct ServiceCatalog {
    store: RecordStore,
}

impl ServiceCatalog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn search(
        &self,
        search: &str,
        category: FacetFilter,
    ) -> Result<Vec<ServiceRecord>, StoreError> {
        let services = self.store.services.list().await?;
        let query = RecordQuery::<ServiceRecord>::new(SERVICE_LIST_FIELDS)
            .search(search)
            .facet(ServiceFacet::Category, category);
        Ok(filter_records(&services, &query).into_iter().cloned().collect())
    }

    /// Services engaged by `client_id`, in engagement order.
    ///
    /// Engagements pointing at a service missing from the catalog are skipped.
    pub async fn services_for_client(
        &self,
        client_id: &str,
    ) -> Result<Vec<ClientServiceView>, StoreError> {
        let catalog = self.store.services.list().await?;
        let engagements = self.store.client_services.list().await?;

        let mut views = Vec::new();
        for engagement in engagements.into_iter().filter(|e| e.client_id == client_id) {
            match catalog.iter().find(|s| s.id == engagement.service_id) {
                Some(service) => views.push(ClientServiceView {
                    service: service.clone(),
                    engagement,
                }),
                None => tracing::warn!(
                    engagement_id = %engagement.id,
                    service_id = %engagement.service_id,
                    "Client service refers to an unknown catalog entry"
                ),
            }
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ServiceCatalog;
    use crate::db::seed::demo_store;
    use crate::db::{ClientServiceRecord, ClientServiceStatus};
    use crate::query::FacetFilter;

    #[tokio::test]
    async fn category_filter_and_search_combine() {
        let catalog = ServiceCatalog::new(demo_store().expect("store"));
        let tax = catalog
            .search("", FacetFilter::from_param(Some("tax")))
            .await
            .expect("search");
        let ids: Vec<&str> = tax.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["vat-return", "self-assessment"]);

        let self_assessment = catalog
            .search("self", FacetFilter::from_param(Some("tax")))
            .await
            .expect("search");
        assert_eq!(self_assessment.len(), 1);
    }

    #[tokio::test]
    async fn client_services_join_catalog_entries() {
        let store = demo_store().expect("store");
        store
            .client_services
            .save(ClientServiceRecord {
                id: "cs-orphan".to_string(),
                client_id: "bus-1".to_string(),
                service_id: "retired-service".to_string(),
                status: ClientServiceStatus::Completed,
                next_deadline: None,
                assigned_to: None,
            })
            .await
            .expect("save");

        let views = ServiceCatalog::new(store)
            .services_for_client("bus-1")
            .await
            .expect("join");
        let names: Vec<&str> = views.iter().map(|v| v.service.name.as_str()).collect();
        assert_eq!(names, vec!["VAT Return", "Annual Accounts"]);
        assert_eq!(views[0].engagement.assigned_to.as_deref(), Some("JD"));
    }
}

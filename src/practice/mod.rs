//! Operations the practice pages perform on top of the record store.

pub mod analytics;
pub mod billing;
pub mod clients;
pub mod services;
pub mod tasks;
pub mod workload;

use crate::config::PracticeConfig;
use crate::db::RecordStore;

pub use analytics::{PracticeAnalytics, practice_analytics};
pub use billing::{BillingDesk, DraftInvoice, InvoiceSummary, TimesheetSummary};
pub use clients::{BusinessClientDetail, ClientActivity, ClientDirectory, IndividualClientDetail};
pub use services::{ClientServiceView, ServiceCatalog};
pub use tasks::{BoardColumn, TaskBoard, TaskDesk, TaskFilter};
pub use workload::{MonthlyWorkload, WorkloadPlanner};

/// Every practice service over one shared store.
#[derive(Clone)]
pub struct Practice {
    pub store: RecordStore,
    pub clients: ClientDirectory,
    pub services: ServiceCatalog,
    pub tasks: TaskDesk,
    pub billing: BillingDesk,
    pub workload: WorkloadPlanner,
}

impl Practice {
    pub fn new(store: RecordStore, config: &PracticeConfig) -> Self {
        Self {
            clients: ClientDirectory::new(store.clone(), config.validation_options()),
            services: ServiceCatalog::new(store.clone()),
            tasks: TaskDesk::new(store.clone()),
            billing: BillingDesk::new(store.clone()),
            workload: WorkloadPlanner::new(store.clone(), config.workload.clone()),
            store,
        }
    }
}

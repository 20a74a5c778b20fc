//! Dashboard figures: client mix, task progress, utilisation and revenue.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::db::{
    BusinessClientRecord, ClientStatus, IndividualClientRecord, InvoiceRecord, RecordStore,
    TaskRecord, TaskStatus, TimeEntryRecord,
};
use crate::error::StoreError;
use crate::practice::billing::{
    InvoiceSummary, TimesheetSummary, summarize_invoices, summarize_timesheet,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientStatusCounts {
    pub active: usize,
    pub inactive: usize,
    pub left: usize,
}

impl ClientStatusCounts {
    fn record(&mut self, status: ClientStatus) {
        match status {
            ClientStatus::Active => self.active += 1,
            ClientStatus::Inactive => self.inactive += 1,
            ClientStatus::Left => self.left += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.inactive + self.left
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeAnalytics {
    pub individual_clients: ClientStatusCounts,
    pub business_clients: ClientStatusCounts,
    pub total_clients: usize,
    pub active_clients: usize,
    /// Count per task status, every status present.
    pub task_status: BTreeMap<&'static str, usize>,
    pub task_completion_rate: u32,
    pub billable_utilisation: u32,
    pub timesheet: TimesheetSummary,
    pub revenue: InvoiceSummary,
}

/// `part / whole` as a whole percentage, halves rounded up. Zero when `whole` is zero.
pub fn percent(part: Decimal, whole: Decimal) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

pub fn compute_analytics(
    individuals: &[IndividualClientRecord],
    businesses: &[BusinessClientRecord],
    tasks: &[TaskRecord],
    time_entries: &[TimeEntryRecord],
    invoices: &[InvoiceRecord],
) -> PracticeAnalytics {
    let mut individual_clients = ClientStatusCounts::default();
    for client in individuals {
        individual_clients.record(client.status);
    }
    let mut business_clients = ClientStatusCounts::default();
    for client in businesses {
        business_clients.record(client.status);
    }

    let mut task_status: BTreeMap<&'static str, usize> =
        TaskStatus::ALL.iter().map(|status| (status.as_str(), 0)).collect();
    for task in tasks {
        *task_status.entry(task.status.as_str()).or_insert(0) += 1;
    }
    let completed = task_status
        .get(TaskStatus::Completed.as_str())
        .copied()
        .unwrap_or(0);

    let timesheet = summarize_timesheet(time_entries);
    let revenue = summarize_invoices(invoices);

    PracticeAnalytics {
        total_clients: individual_clients.total() + business_clients.total(),
        active_clients: individual_clients.active + business_clients.active,
        individual_clients,
        business_clients,
        task_status,
        task_completion_rate: percent(Decimal::from(completed), Decimal::from(tasks.len())),
        billable_utilisation: percent(timesheet.billable_hours, timesheet.total_hours),
        timesheet,
        revenue,
    }
}

/// Analytics over the whole store.
pub async fn practice_analytics(store: &RecordStore) -> Result<PracticeAnalytics, StoreError> {
    let individuals = store.individual_clients.list().await?;
    let businesses = store.business_clients.list().await?;
    let tasks = store.tasks.list().await?;
    let time_entries = store.time_entries.list().await?;
    let invoices = store.invoices.list().await?;
    Ok(compute_analytics(
        &individuals,
        &businesses,
        &tasks,
        &time_entries,
        &invoices,
    ))
}

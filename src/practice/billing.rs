use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{InvoiceLineItem, InvoiceRecord, InvoiceStatus, RecordStore, TimeEntryRecord};
use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimesheetSummary {
    pub total_hours: Decimal,
    pub billable_hours: Decimal,
    pub non_billable_hours: Decimal,
    pub billable_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub invoice_count: usize,
    pub sent_count: usize,
    pub total: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
}

/// Value of one time entry. A missing rate bills at zero.
pub fn entry_value(entry: &TimeEntryRecord) -> Decimal {
    entry.hours * entry.hourly_rate.unwrap_or(Decimal::ZERO)
}

pub fn summarize_timesheet<'a, I>(entries: I) -> TimesheetSummary
where
    I: IntoIterator<Item = &'a TimeEntryRecord>,
{
    let mut summary = entries
        .into_iter()
        .fold(TimesheetSummary::default(), |mut acc, entry| {
            acc.total_hours += entry.hours;
            if entry.billable {
                acc.billable_hours += entry.hours;
                acc.billable_value += entry_value(entry);
            }
            acc
        });
    summary.non_billable_hours = summary.total_hours - summary.billable_hours;
    summary.billable_value = summary.billable_value.round_dp(2);
    summary
}

/// Totals across invoices. Outstanding is everything not yet paid.
pub fn summarize_invoices<'a, I>(invoices: I) -> InvoiceSummary
where
    I: IntoIterator<Item = &'a InvoiceRecord>,
{
    let mut summary = InvoiceSummary::default();
    for invoice in invoices {
        summary.invoice_count += 1;
        summary.total += invoice.amount;
        match invoice.status {
            InvoiceStatus::Paid => summary.paid += invoice.amount,
            InvoiceStatus::Sent => summary.sent_count += 1,
            InvoiceStatus::Draft | InvoiceStatus::Overdue => {}
        }
    }
    summary.total = summary.total.round_dp(2);
    summary.paid = summary.paid.round_dp(2);
    summary.outstanding = summary.total - summary.paid;
    summary
}

pub fn line_item(description: impl Into<String>, hours: Decimal, rate: Decimal) -> InvoiceLineItem {
    InvoiceLineItem {
        description: description.into(),
        hours,
        rate,
        amount: (hours * rate).round_dp(2),
    }
}

/// An unsaved draft invoice and the time entries it bills.
#[derive(Debug, Clone, Serialize)]
pub struct DraftInvoice {
    pub invoice: InvoiceRecord,
    pub time_entry_ids: Vec<String>,
}

#[derive(Clone)]
pub struct BillingDesk {
    store: RecordStore,
}

impl BillingDesk {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn timesheet(&self) -> Result<TimesheetSummary, StoreError> {
        let entries = self.store.time_entries.list().await?;
        Ok(summarize_timesheet(&entries))
    }

    pub async fn invoices(&self) -> Result<InvoiceSummary, StoreError> {
        let invoices = self.store.invoices.list().await?;
        Ok(summarize_invoices(&invoices))
    }

    /// Draft an invoice from a client's billable time entries.
    pub async fn draft_invoice(
        &self,
        client_id: &str,
        number: &str,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<DraftInvoice, StoreError> {
        let entries = self.store.time_entries.list().await?;

        let mut line_items = Vec::new();
        let mut time_entry_ids = Vec::new();
        for entry in entries
            .iter()
            .filter(|entry| entry.client_id == client_id && entry.billable)
        {
            line_items.push(line_item(
                format!(
                    "{} ({} on {})",
                    entry.description,
                    entry.staff,
                    entry.entry_date.format("%Y-%m-%d")
                ),
                entry.hours,
                entry.hourly_rate.unwrap_or(Decimal::ZERO),
            ));
            time_entry_ids.push(entry.id.clone());
        }

        let amount = line_items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.amount)
            .round_dp(2);

        Ok(DraftInvoice {
            invoice: InvoiceRecord {
                id: Uuid::new_v4().to_string(),
                client_id: client_id.to_string(),
                number: number.trim().to_string(),
                issue_date,
                due_date,
                amount,
                status: InvoiceStatus::Draft,
                line_items,
            },
            time_entry_ids,
        })
    }

    pub async fn save_draft(&self, draft: &DraftInvoice) -> Result<InvoiceRecord, StoreError> {
        let saved = self.store.invoices.save(draft.invoice.clone()).await?;
        tracing::info!(
            invoice_id = %saved.id,
            number = %saved.number,
            amount = %saved.amount,
            entries = draft.time_entry_ids.len(),
            "Draft invoice saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::{BillingDesk, line_item, summarize_invoices, summarize_timesheet};
    use crate::db::seed::{demo_data, demo_store};
    use crate::db::InvoiceStatus;

    fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("valid date")
    }

    #[test]
    fn timesheet_values_only_billable_time() {
        let data = demo_data().expect("demo data");
        let summary = summarize_timesheet(&data.time_entries);
        assert_eq!(summary.total_hours, dec!(8.5));
        assert_eq!(summary.billable_hours, dec!(7.5));
        assert_eq!(summary.non_billable_hours, dec!(1.0));
        // 2.5*150 + 1.5*150 + 3*200 + 0.5*100
        assert_eq!(summary.billable_value, dec!(1250.00));
    }

    #[test]
    fn missing_rate_bills_at_zero() {
        let mut entries = demo_data().expect("demo data").time_entries;
        entries[0].hourly_rate = None;
        let summary = summarize_timesheet(&entries);
        assert_eq!(summary.billable_value, dec!(875.00));
    }

    #[test]
    fn invoice_outstanding_is_total_minus_paid() {
        let data = demo_data().expect("demo data");
        let summary = summarize_invoices(&data.invoices);
        assert_eq!(summary.invoice_count, 2);
        assert_eq!(summary.sent_count, 1);
        assert_eq!(summary.total, dec!(1550));
        assert_eq!(summary.paid, dec!(950));
        assert_eq!(summary.outstanding, dec!(600));
    }

    #[test]
    fn line_item_amount_rounds_to_pennies() {
        let item = line_item("Advice", dec!(1.333), dec!(150));
        assert_eq!(item.amount, dec!(199.95));
    }

    #[tokio::test]
    async fn draft_invoice_bills_client_time_and_saves() {
        let store = demo_store().expect("store");
        let billing = BillingDesk::new(store.clone());
        let draft = billing
            .draft_invoice("bus-1", " INV-003-2025 ", date("2025-11-01"), date("2025-12-01"))
            .await
            .expect("draft");

        assert_eq!(draft.invoice.status, InvoiceStatus::Draft);
        assert_eq!(draft.invoice.number, "INV-003-2025");
        assert_eq!(draft.time_entry_ids, vec!["time-1", "time-2"]);
        assert_eq!(draft.invoice.amount, dec!(600.00));
        assert_eq!(
            draft.invoice.line_items[0].description,
            "VAT Return preparation - review of sales invoices (JD on 2025-10-15)"
        );

        billing.save_draft(&draft).await.expect("save");
        assert_eq!(store.invoices.list().await.expect("list").len(), 3);
    }

    #[tokio::test]
    async fn draft_for_client_without_billable_time_is_empty() {
        let billing = BillingDesk::new(demo_store().expect("store"));
        let draft = billing
            .draft_invoice("ind-2", "INV-004-2025", date("2025-11-01"), date("2025-12-01"))
            .await
            .expect("draft");
        assert!(draft.invoice.line_items.is_empty());
        assert_eq!(draft.invoice.amount, dec!(0));
    }
}

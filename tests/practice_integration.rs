//! End-to-end flows over the demo store: editor forms through validation
//! into the client registers, lookups merged into forms, and the task,
//! billing and workload views.

use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use taxdesk::config::{LookupConfig, PracticeConfig};
use taxdesk::db::seed::demo_store;
use taxdesk::db::{ClientStatus, TaskStatus, TradingAddress};
use taxdesk::error::{LookupError, ServiceError};
use taxdesk::forms::{BusinessClientForm, IndividualClientForm};
use taxdesk::lookup::{LookupChannel, LookupService};
use taxdesk::practice::{BoardColumn, Practice, TaskFilter, practice_analytics};
use taxdesk::query::FacetFilter;
use taxdesk::settings::Settings;
use taxdesk::validation::parse_form;

fn practice() -> Practice {
    let config = PracticeConfig::resolve(&Settings::default()).expect("default config");
    Practice::new(demo_store().expect("demo store"), &config)
}

fn instant_lookups() -> LookupService {
    LookupService::mock(&LookupConfig {
        address_delay: Duration::ZERO,
        company_delay: Duration::ZERO,
    })
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date")
}

#[tokio::test]
async fn json_form_is_validated_saved_and_found() {
    let practice = practice();
    let form: IndividualClientForm = parse_form(
        "individual client",
        serde_json::json!({
            "firstName": "Priya",
            "lastName": "Patel",
            "email": "priya.patel@example.co.uk",
            "phone": "07700 900999",
            "addressLine1": "4 Canal Street",
            "city": "Birmingham",
            "postcode": "B1 1AA",
            "nationalInsuranceNumber": "AB123456C",
            "hasUtr": true,
            "utrNumber": "9876543210",
            "employmentStatus": "self_employed"
        }),
    )
    .expect("well-formed payload");

    let saved = practice.clients.save_individual(&form).await.expect("saved");
    assert_eq!(saved.status, ClientStatus::Active);
    assert_eq!(saved.utr.utr().map(ToString::to_string).as_deref(), Some("9876543210"));

    let found = practice
        .clients
        .search_individuals("patel", FacetFilter::from_param(Some("active")))
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, saved.id);

    let detail = practice.clients.individual_detail(&saved.id).await.expect("detail");
    assert!(detail.activity.communications.is_empty());
    assert!(detail.activity.documents.is_empty());
}

#[tokio::test]
async fn invalid_form_is_rejected_without_touching_the_store() {
    let practice = practice();
    let form = IndividualClientForm {
        first_name: "No".to_string(),
        last_name: "Identifier".to_string(),
        email: "not-an-email".to_string(),
        phone: "0161 000 0000".to_string(),
        address_line1: "1 Street".to_string(),
        city: "Leeds".to_string(),
        postcode: "LS1 1AA".to_string(),
        national_insurance_number: "qq123456c".to_string(),
        ..IndividualClientForm::default()
    };

    let err = practice
        .clients
        .save_individual(&form)
        .await
        .expect_err("invalid form");
    let ServiceError::Validation(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["email", "nationalInsuranceNumber"]
    );

    let all = practice
        .clients
        .search_individuals("", FacetFilter::All)
        .await
        .expect("search");
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn editing_an_existing_client_keeps_its_creation_time() {
    let practice = practice();
    let original = practice.clients.individual_detail("ind-2").await.expect("detail").client;

    let mut form = IndividualClientForm::from_record(&original);
    form.client_status = Some("inactive".to_string());
    let saved = practice.clients.save_individual(&form).await.expect("saved");

    assert_eq!(saved.id, "ind-2");
    assert_eq!(saved.created_at, original.created_at);
    assert_eq!(saved.status, ClientStatus::Inactive);

    let active = practice
        .clients
        .search_individuals("jane", FacetFilter::from_param(Some("active")))
        .await
        .expect("search");
    assert!(active.is_empty());
}

#[tokio::test]
async fn company_lookup_prefills_a_business_that_then_validates() {
    let practice = practice();
    let lookups = instant_lookups();
    let channel = LookupChannel::new("company");

    let profile = lookups
        .fetch_company(&channel, "12345678")
        .await
        .expect("known company");

    let mut form = BusinessClientForm {
        utr_number: "1122334455".to_string(),
        responsible_person_name: "Alice Turner".to_string(),
        responsible_person_email: "alice@techsolutions.example".to_string(),
        responsible_person_phone: "020 7946 0000".to_string(),
        ..BusinessClientForm::default()
    };
    form.apply_company_profile(&profile);
    assert_eq!(form.company_name, "TECH SOLUTIONS LTD");
    assert_eq!(form.registered_postcode, "EC1A 1BB");

    let saved = practice.clients.save_business(&form).await.expect("saved");
    assert_eq!(saved.company_number.as_str(), "12345678");
    assert_eq!(saved.trading_address, TradingAddress::SameAsRegistered);

    let matches = practice
        .clients
        .search_businesses("tech solutions", FacetFilter::All)
        .await
        .expect("search");
    assert_eq!(matches.len(), 2);
}

#[tokio::test]
async fn address_lookup_fills_the_distinct_trading_address() {
    let lookups = instant_lookups();
    let channel = LookupChannel::new("trading-address");

    let candidates = lookups
        .search_addresses(&channel, " m1 1aa ")
        .await
        .expect("candidates");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].postcode, "M1 1AA");

    let mut form = BusinessClientForm {
        trading_address_same: false,
        ..BusinessClientForm::default()
    };
    form.apply_trading_address(&candidates[1]);
    assert_eq!(form.trading_address_line1, "City Tower");
    assert_eq!(form.trading_address_line2, "Piccadilly Plaza");
    assert_eq!(form.trading_city, "Manchester");
}

#[tokio::test]
async fn unknown_company_and_blank_postcode_are_reported() {
    let lookups = instant_lookups();
    let channel = LookupChannel::new("company");

    let err = lookups
        .fetch_company(&channel, "123")
        .await
        .expect_err("short number");
    assert_eq!(
        err,
        LookupError::NotFound {
            query: "123".to_string()
        }
    );

    let err = lookups
        .search_addresses(&LookupChannel::new("address"), "   ")
        .await
        .expect_err("blank postcode");
    assert_eq!(err, LookupError::EmptyQuery);
}

#[tokio::test]
async fn task_board_and_overdue_view() {
    let practice = practice();

    let board = practice
        .tasks
        .board(&TaskFilter::default())
        .await
        .expect("board");
    let count = |column| board.lane(column).map_or(0, |lane| lane.tasks.len());
    // Blocked tasks share the To Do lane.
    assert_eq!(count(BoardColumn::Todo), 2);
    assert_eq!(count(BoardColumn::InProgress), 1);
    assert_eq!(count(BoardColumn::Review), 1);
    assert_eq!(count(BoardColumn::Completed), 1);

    let filtered = practice
        .tasks
        .list(&TaskFilter {
            statuses: vec!["todo".to_string(), "blocked".to_string()],
            ..TaskFilter::default()
        })
        .await
        .expect("list");
    let ids: Vec<_> = filtered.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["task-2", "task-3"]);

    let overdue = practice.tasks.overdue(date("2025-11-06")).await.expect("overdue");
    let ids: Vec<_> = overdue.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["task-2", "task-5"]);
    assert!(overdue.iter().all(|task| task.status != TaskStatus::Completed));
}

#[tokio::test]
async fn billing_draft_is_saved_and_counted_in_revenue() {
    let practice = practice();

    let timesheet = practice.billing.timesheet().await.expect("timesheet");
    assert_eq!(timesheet.total_hours, dec!(8.5));
    assert_eq!(timesheet.billable_hours, dec!(7.5));
    assert_eq!(timesheet.billable_value, dec!(1250));

    let draft = practice
        .billing
        .draft_invoice("bus-2", " INV-2025-003 ", date("2025-11-10"), date("2025-12-10"))
        .await
        .expect("draft");
    assert_eq!(draft.invoice.number, "INV-2025-003");
    assert_eq!(draft.invoice.amount, dec!(650.00));
    assert_eq!(draft.time_entry_ids, vec!["time-3", "time-4"]);

    practice.billing.save_draft(&draft).await.expect("saved");
    let invoices = practice.billing.invoices().await.expect("invoices");
    assert_eq!(invoices.invoice_count, 3);
}

#[tokio::test]
async fn analytics_and_workload_over_demo_data() {
    let practice = practice();

    let analytics = practice_analytics(&practice.store).await.expect("analytics");
    assert_eq!(analytics.total_clients, 6);
    assert_eq!(analytics.active_clients, 4);
    assert_eq!(analytics.task_completion_rate, 20);
    assert_eq!(analytics.billable_utilisation, 88);

    let months = practice
        .workload
        .distribution(date("2025-11-01"), Some(3))
        .await
        .expect("workload");
    let totals: Vec<_> = months
        .iter()
        .map(|month| (month.month.as_str(), month.total))
        .collect();
    assert_eq!(totals, vec![("2025-11", 2), ("2025-12", 0), ("2026-01", 1)]);
    assert!(months.iter().all(|month| !month.high_load));
}

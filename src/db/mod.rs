//! Record store abstraction.
//!
//! Every collection the practice works with sits behind the generic
//! [`Repository`] trait (`list` / `find` / `save`). [`RecordStore`] bundles one
//! repository per collection as `Arc<dyn Repository<_>>` so services never
//! depend on a concrete data source.
//!
//! - `memory`: insertion-ordered in-memory repositories
//! - `seed`: demo records for the CLI and integration tests

pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::identifiers::{CompanyNumber, NiNumber, Utr, VatNumber};

pub use memory::InMemoryRepository;

/// Client relationship state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Left,
}

impl ClientStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Left => "left",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "left" => Some(Self::Left),
            _ => None,
        }
    }
}

/// Main source of income for an individual client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Director,
    Pensioner,
    MultipleIncome,
}

impl EmploymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employed => "employed",
            Self::SelfEmployed => "self_employed",
            Self::Director => "director",
            Self::Pensioner => "pensioner",
            Self::MultipleIncome => "multiple_income",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "employed" => Some(Self::Employed),
            "self_employed" => Some(Self::SelfEmployed),
            "director" => Some(Self::Director),
            "pensioner" => Some(Self::Pensioner),
            "multiple_income" => Some(Self::MultipleIncome),
            _ => None,
        }
    }
}

/// Default billing cadence of a catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceFrequency {
    OneOff,
    Monthly,
    Quarterly,
    Annual,
}

impl ServiceFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOff => "one_off",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "one_off" => Some(Self::OneOff),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }
}

/// Catalog grouping for services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Tax,
    Accounts,
    Payroll,
    Advisory,
    Compliance,
}

impl ServiceCategory {
    pub const ALL: [Self; 5] = [
        Self::Tax,
        Self::Accounts,
        Self::Payroll,
        Self::Advisory,
        Self::Compliance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::Accounts => "accounts",
            Self::Payroll => "payroll",
            Self::Advisory => "advisory",
            Self::Compliance => "compliance",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "tax" => Some(Self::Tax),
            "accounts" => Some(Self::Accounts),
            "payroll" => Some(Self::Payroll),
            "advisory" => Some(Self::Advisory),
            "compliance" => Some(Self::Compliance),
            _ => None,
        }
    }
}

/// State of a service engagement for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientServiceStatus {
    Active,
    Paused,
    Completed,
}

impl ClientServiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Task workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Completed,
        Self::Blocked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "completed" => Some(Self::Completed),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    TaxReturn,
    Payroll,
    Accounts,
    Onboarding,
    #[serde(alias = "ad hoc")]
    AdHoc,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaxReturn => "tax_return",
            Self::Payroll => "payroll",
            Self::Accounts => "accounts",
            Self::Onboarding => "onboarding",
            Self::AdHoc => "ad_hoc",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "tax_return" => Some(Self::TaxReturn),
            "payroll" => Some(Self::Payroll),
            "accounts" => Some(Self::Accounts),
            "onboarding" => Some(Self::Onboarding),
            "ad_hoc" | "ad hoc" => Some(Self::AdHoc),
            _ => None,
        }
    }
}

/// Invoice lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationType {
    Email,
    Call,
    Meeting,
    Document,
}

impl CommunicationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Call => "call",
            Self::Meeting => "meeting",
            Self::Document => "document",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "email" => Some(Self::Email),
            "call" => Some(Self::Call),
            "meeting" => Some(Self::Meeting),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStatus {
    Pending,
    Completed,
    FollowUpNeeded,
}

impl CommunicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::FollowUpNeeded => "follow_up_needed",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "follow_up_needed" => Some(Self::FollowUpNeeded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    TaxReturn,
    Accounts,
    Correspondence,
    Other,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::TaxReturn => "tax_return",
            Self::Accounts => "accounts",
            Self::Correspondence => "correspondence",
            Self::Other => "other",
        }
    }

    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "invoice" => Some(Self::Invoice),
            "tax_return" => Some(Self::TaxReturn),
            "accounts" => Some(Self::Accounts),
            "correspondence" => Some(Self::Correspondence),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postcode: String,
}

/// Self-assessment registration of an individual. A UTR exists only when registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "registration", rename_all = "snake_case")]
pub enum UtrRegistration {
    NotRegistered,
    Registered { utr: Utr },
}

impl UtrRegistration {
    pub fn utr(&self) -> Option<&Utr> {
        match self {
            Self::NotRegistered => None,
            Self::Registered { utr } => Some(utr),
        }
    }
}

/// Where a business trades from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradingAddress {
    SameAsRegistered,
    Distinct { address: PostalAddress },
}

impl TradingAddress {
    /// The address the business actually trades from.
    pub fn effective<'a>(&'a self, registered: &'a PostalAddress) -> &'a PostalAddress {
        match self {
            Self::SameAsRegistered => registered,
            Self::Distinct { address } => address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualClientRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: PostalAddress,
    pub ni_number: NiNumber,
    pub utr: UtrRegistration,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub income_sources: Option<String>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IndividualClientRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessClientRecord {
    pub id: String,
    pub company_name: String,
    pub company_number: CompanyNumber,
    pub utr: Utr,
    #[serde(default)]
    pub vat_number: Option<VatNumber>,
    #[serde(default)]
    pub paye_reference: Option<String>,
    pub responsible_person: ContactPerson,
    pub registered_address: PostalAddress,
    pub trading_address: TradingAddress,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub default_frequency: ServiceFrequency,
    #[serde(default)]
    pub default_fee: Option<Decimal>,
    pub category: ServiceCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientServiceRecord {
    pub id: String,
    pub client_id: String,
    pub service_id: String,
    pub status: ClientServiceStatus,
    #[serde(default)]
    pub next_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub client_id: String,
    pub client_name: String,
    #[serde(default)]
    pub service_id: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub task_type: TaskType,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryRecord {
    pub id: String,
    pub task_id: String,
    pub client_id: String,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub description: String,
    pub staff: String,
    pub billable: bool,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub hours: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub client_id: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationRecord {
    pub id: String,
    pub client_id: String,
    pub communication_type: CommunicationType,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_by: String,
    pub status: CommunicationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub client_id: String,
    pub file_name: String,
    pub document_type: DocumentType,
    pub uploaded_date: NaiveDate,
    pub uploaded_by: String,
    pub file_size: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A record addressable by a string id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity label used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_record!(IndividualClientRecord, "individual client");
impl_record!(BusinessClientRecord, "business client");
impl_record!(ServiceRecord, "service");
impl_record!(ClientServiceRecord, "client service");
impl_record!(TaskRecord, "task");
impl_record!(TimeEntryRecord, "time entry");
impl_record!(InvoiceRecord, "invoice");
impl_record!(CommunicationRecord, "communication");
impl_record!(DocumentRecord, "document");

/// Storage capability for one collection.
///
/// `list` returns records in insertion order; `save` replaces a record with
/// the same id in place or appends a new one.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, StoreError>;
    async fn find(&self, id: &str) -> Result<Option<T>, StoreError>;
    async fn save(&self, record: T) -> Result<T, StoreError>;
}

/// One repository per practice collection.
#[derive(Clone)]
pub struct RecordStore {
    pub individual_clients: Arc<dyn Repository<IndividualClientRecord>>,
    pub business_clients: Arc<dyn Repository<BusinessClientRecord>>,
    pub services: Arc<dyn Repository<ServiceRecord>>,
    pub client_services: Arc<dyn Repository<ClientServiceRecord>>,
    pub tasks: Arc<dyn Repository<TaskRecord>>,
    pub time_entries: Arc<dyn Repository<TimeEntryRecord>>,
    pub invoices: Arc<dyn Repository<InvoiceRecord>>,
    pub communications: Arc<dyn Repository<CommunicationRecord>>,
    pub documents: Arc<dyn Repository<DocumentRecord>>,
}

impl RecordStore {
    /// A store with every collection empty and held in memory.
    pub fn in_memory() -> Self {
        Self {
            individual_clients: Arc::new(InMemoryRepository::new()),
            business_clients: Arc::new(InMemoryRepository::new()),
            services: Arc::new(InMemoryRepository::new()),
            client_services: Arc::new(InMemoryRepository::new()),
            tasks: Arc::new(InMemoryRepository::new()),
            time_entries: Arc::new(InMemoryRepository::new()),
            invoices: Arc::new(InMemoryRepository::new()),
            communications: Arc::new(InMemoryRepository::new()),
            documents: Arc::new(InMemoryRepository::new()),
        }
    }
}

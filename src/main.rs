use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use taxdesk::config::{LogFormat, MAX_WORKLOAD_MONTHS, PracticeConfig};
use taxdesk::db::TaskRecord;
use taxdesk::db::seed::demo_store;
use taxdesk::forms::{BusinessClientForm, IndividualClientForm};
use taxdesk::lookup::{LookupChannel, LookupService};
use taxdesk::practice::tasks::is_overdue;
use taxdesk::practice::{Practice, TaskFilter, practice_analytics};
use taxdesk::query::FacetFilter;
use taxdesk::settings::Settings;
use taxdesk::validation::{parse_form, validate_business, validate_individual};

const DEFAULT_SETTINGS_FILE: &str = "taxdesk.toml";

#[derive(Parser)]
#[command(name = "taxdesk")]
#[command(about = "Client records, validation and lookups for an accounting practice")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, env = "PRACTICE_SETTINGS_PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClientKind {
    Individual,
    Business,
}

#[derive(Subcommand)]
enum Command {
    /// Search the client lists
    Clients {
        kind: ClientKind,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Search the service catalog
    Services {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// List tasks, or group them into board columns
    Tasks {
        #[arg(long, default_value = "")]
        search: String,
        /// Repeat to select several statuses
        #[arg(long)]
        status: Vec<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        #[arg(long)]
        board: bool,
        /// Reference date for overdue flags (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Validate a client form stored as JSON
    Validate { kind: ClientKind, file: PathBuf },
    /// Run a demo lookup
    Lookup {
        #[command(subcommand)]
        target: LookupTarget,
    },
    /// Timesheet and invoice totals
    Billing,
    /// Practice dashboard figures
    Analytics,
    /// Deadline counts per month
    Workload {
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WORKLOAD_MONTHS))
        )]
        months: Option<u32>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum LookupTarget {
    Address { postcode: String },
    Company { number: String },
}

#[derive(Serialize)]
struct TaskRow {
    #[serde(flatten)]
    task: TaskRecord,
    overdue: bool,
}

#[derive(Serialize)]
struct BillingReport {
    timesheet: taxdesk::practice::TimesheetSummary,
    invoices: taxdesk::practice::InvoiceSummary,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taxdesk=info"));
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load_from_path(path)?),
        None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
            Ok(Settings::load_from_path(Path::new(DEFAULT_SETTINGS_FILE))?)
        }
        None => Ok(Settings::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_payload(file: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read form file '{}'", file.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("form file '{}' is not valid JSON", file.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref())?;
    let config = PracticeConfig::resolve(&settings)?;
    init_tracing(config.log_format);

    let today = Utc::now().date_naive();
    let practice = Practice::new(demo_store()?, &config);

    match cli.command {
        Command::Clients {
            kind,
            search,
            status,
        } => {
            let status = FacetFilter::from_param(status.as_deref());
            match kind {
                ClientKind::Individual => {
                    print_json(&practice.clients.search_individuals(&search, status).await?)
                }
                ClientKind::Business => {
                    print_json(&practice.clients.search_businesses(&search, status).await?)
                }
            }
        }
        Command::Services { search, category } => {
            let category = FacetFilter::from_param(category.as_deref());
            print_json(&practice.services.search(&search, category).await?)
        }
        Command::Tasks {
            search,
            status,
            priority,
            task_type,
            board,
            today: reference,
        } => {
            let filter = TaskFilter {
                search,
                statuses: status,
                priority,
                task_type,
            };
            if board {
                return print_json(&practice.tasks.board(&filter).await?);
            }
            let reference = reference.unwrap_or(today);
            let rows: Vec<TaskRow> = practice
                .tasks
                .list(&filter)
                .await?
                .into_iter()
                .map(|task| TaskRow {
                    overdue: is_overdue(&task, reference),
                    task,
                })
                .collect();
            print_json(&rows)
        }
        Command::Validate { kind, file } => {
            let payload = read_payload(&file)?;
            let options = config.validation_options();
            let outcome = match kind {
                ClientKind::Individual => {
                    let form: IndividualClientForm = parse_form("individual client", payload)?;
                    validate_individual(&form, &options).map(serde_json::to_value)
                }
                ClientKind::Business => {
                    let form: BusinessClientForm = parse_form("business client", payload)?;
                    validate_business(&form, &options).map(serde_json::to_value)
                }
            };
            match outcome {
                Ok(client) => print_json(&serde_json::json!({ "valid": true, "client": client? })),
                Err(errors) => {
                    print_json(&serde_json::json!({ "valid": false, "errors": errors }))?;
                    std::process::exit(1);
                }
            }
        }
        Command::Lookup { target } => {
            let lookups = LookupService::mock(&config.lookup);
            match target {
                LookupTarget::Address { postcode } => {
                    let channel = LookupChannel::new("address");
                    print_json(&lookups.search_addresses(&channel, &postcode).await?)
                }
                LookupTarget::Company { number } => {
                    let channel = LookupChannel::new("company");
                    print_json(&lookups.fetch_company(&channel, &number).await?)
                }
            }
        }
        Command::Billing => print_json(&BillingReport {
            timesheet: practice.billing.timesheet().await?,
            invoices: practice.billing.invoices().await?,
        }),
        Command::Analytics => print_json(&practice_analytics(&practice.store).await?),
        Command::Workload {
            months,
            today: reference,
        } => {
            let start = reference.unwrap_or(today);
            print_json(&practice.workload.distribution(start, months).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn workload_months_flag_is_range_checked() {
        for bad in ["0", "25", "4000000000"] {
            assert!(
                Cli::try_parse_from(["taxdesk", "workload", "--months", bad]).is_err(),
                "--months {bad} should be rejected"
            );
        }

        let cli = Cli::try_parse_from(["taxdesk", "workload", "--months", "24"]).expect("parse");
        let Command::Workload { months, .. } = cli.command else {
            panic!("expected workload command");
        };
        assert_eq!(months, Some(24));
    }
}

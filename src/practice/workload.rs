//! Upcoming deadline counts per month, split by service category.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::{MAX_WORKLOAD_MONTHS, WorkloadConfig};
use crate::db::{
    ClientServiceRecord, ClientServiceStatus, RecordStore, ServiceCategory, ServiceRecord,
};
use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyWorkload {
    /// `YYYY-MM`.
    pub month: String,
    pub by_category: BTreeMap<&'static str, usize>,
    pub total: usize,
    pub high_load: bool,
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn month_label(index: i64) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

/// Deadlines of active engagements in the `months` calendar months starting
/// with the month of `start`. A month is high load above `high_load_threshold`.
pub fn workload_distribution(
    engagements: &[ClientServiceRecord],
    services: &[ServiceRecord],
    start: NaiveDate,
    months: u32,
    high_load_threshold: usize,
) -> Vec<MonthlyWorkload> {
    let first = month_index(start);
    let mut buckets: Vec<BTreeMap<&'static str, usize>> = (0..months)
        .map(|_| {
            ServiceCategory::ALL
                .iter()
                .map(|category| (category.as_str(), 0))
                .collect()
        })
        .collect();

    for engagement in engagements {
        if engagement.status != ClientServiceStatus::Active {
            continue;
        }
        let Some(deadline) = engagement.next_deadline else {
            continue;
        };
        let Some(service) = services.iter().find(|s| s.id == engagement.service_id) else {
            continue;
        };
        let offset = month_index(deadline) - first;
        if let Ok(slot) = usize::try_from(offset)
            && let Some(bucket) = buckets.get_mut(slot)
        {
            *bucket.entry(service.category.as_str()).or_insert(0) += 1;
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(offset, by_category)| {
            let total = by_category.values().sum();
            MonthlyWorkload {
                month: month_label(first + offset as i64),
                by_category,
                total,
                high_load: total > high_load_threshold,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct WorkloadPlanner {
    store: RecordStore,
    config: WorkloadConfig,
}

impl WorkloadPlanner {
    pub fn new(store: RecordStore, config: WorkloadConfig) -> Self {
        Self { store, config }
    }

    /// Distribution over the configured window, or `months` when given.
    ///
    /// An override outside `1..=MAX_WORKLOAD_MONTHS` is rejected.
    pub async fn distribution(
        &self,
        start: NaiveDate,
        months: Option<u32>,
    ) -> Result<Vec<MonthlyWorkload>, ServiceError> {
        let months = months.unwrap_or(self.config.months);
        if !(1..=MAX_WORKLOAD_MONTHS).contains(&months) {
            return Err(ServiceError::WorkloadWindow {
                months,
                max: MAX_WORKLOAD_MONTHS,
            });
        }
        let engagements = self.store.client_services.list().await?;
        let services = self.store.services.list().await?;
        Ok(workload_distribution(
            &engagements,
            &services,
            start,
            months,
            self.config.high_load_threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::{WorkloadPlanner, month_index, month_label, workload_distribution};
    use crate::config::WorkloadConfig;
    use crate::db::seed::{demo_data, demo_store};
    use crate::error::ServiceError;

    fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("valid date")
    }

    #[test]
    fn month_labels_roll_over_years() {
        let dec = month_index(date("2025-12-31"));
        assert_eq!(month_label(dec), "2025-12");
        assert_eq!(month_label(dec + 1), "2026-01");
    }

    #[test]
    fn counts_active_deadlines_inside_the_window() {
        let data = demo_data().expect("demo data");
        let months = workload_distribution(
            &data.client_services,
            &data.services,
            date("2025-11-20"),
            6,
            12,
        );
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["2025-11", "2025-12", "2026-01", "2026-02", "2026-03", "2026-04"]
        );

        // Deadlines earlier in the start month still count.
        assert_eq!(months[0].total, 2);
        assert_eq!(months[0].by_category["tax"], 1);
        assert_eq!(months[0].by_category["payroll"], 1);
        // The paused company secretarial engagement is ignored.
        assert_eq!(months[1].total, 0);
        assert_eq!(months[2].by_category["tax"], 1);
        // Annual accounts due in May fall outside the six-month window.
        assert_eq!(months.iter().map(|m| m.total).sum::<usize>(), 3);
        assert!(months.iter().all(|m| !m.high_load));
    }

    #[test]
    fn high_load_is_strictly_above_threshold() {
        let data = demo_data().expect("demo data");
        let months = workload_distribution(
            &data.client_services,
            &data.services,
            date("2025-11-01"),
            3,
            1,
        );
        assert!(months[0].high_load);
        assert!(!months[2].high_load);
    }

    #[tokio::test]
    async fn planner_uses_configured_window_unless_overridden() {
        let planner = WorkloadPlanner::new(
            demo_store().expect("store"),
            WorkloadConfig {
                months: 6,
                high_load_threshold: 12,
            },
        );
        let default_window = planner
            .distribution(date("2025-11-01"), None)
            .await
            .expect("distribution");
        assert_eq!(default_window.len(), 6);

        let year = planner
            .distribution(date("2025-11-01"), Some(7))
            .await
            .expect("distribution");
        assert_eq!(year[6].month, "2026-05");
        assert_eq!(year[6].by_category["accounts"], 1);
    }

    #[tokio::test]
    async fn planner_rejects_window_outside_allowed_range() {
        let planner = WorkloadPlanner::new(
            demo_store().expect("store"),
            WorkloadConfig {
                months: 6,
                high_load_threshold: 12,
            },
        );
        for months in [0, 25, 200_000] {
            let err = planner
                .distribution(date("2025-11-01"), Some(months))
                .await
                .expect_err("window out of range");
            let ServiceError::WorkloadWindow { months: got, max } = err else {
                panic!("expected WorkloadWindow, got {err:?}");
            };
            assert_eq!((got, max), (months, 24));
        }

        let longest = planner
            .distribution(date("2025-11-01"), Some(24))
            .await
            .expect("longest window");
        assert_eq!(longest.len(), 24);
    }
}

//! Task list filtering, the four-column board, and overdue detection.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{RecordStore, TaskRecord, TaskStatus};
use crate::error::StoreError;
use crate::query::{FacetFilter, RecordQuery, TASK_LIST_FIELDS, TaskFacet, filter_records};

/// Task dashboard filters. An empty status selection shows every status.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: String,
    pub statuses: Vec<String>,
    pub priority: Option<String>,
    pub task_type: Option<String>,
}

impl TaskFilter {
    pub fn query(&self) -> RecordQuery<TaskRecord> {
        RecordQuery::<TaskRecord>::new(TASK_LIST_FIELDS)
            .search(self.search.clone())
            .facet(TaskFacet::Status, FacetFilter::any_of(self.statuses.iter().cloned()))
            .facet(TaskFacet::Priority, FacetFilter::from_param(self.priority.as_deref()))
            .facet(TaskFacet::Type, FacetFilter::from_param(self.task_type.as_deref()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardColumn {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl BoardColumn {
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Completed];

    /// Blocked tasks sit in the To Do column.
    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo | TaskStatus::Blocked => Self::Todo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Review => Self::Review,
            TaskStatus::Completed => Self::Completed,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardLane {
    pub column: BoardColumn,
    pub title: &'static str,
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskBoard {
    pub lanes: Vec<BoardLane>,
}

impl TaskBoard {
    pub fn lane(&self, column: BoardColumn) -> Option<&BoardLane> {
        self.lanes.iter().find(|lane| lane.column == column)
    }
}

/// Group tasks into board lanes, keeping input order within each lane.
pub fn build_board<'a, I>(tasks: I) -> TaskBoard
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut lanes: Vec<BoardLane> = BoardColumn::ALL
        .into_iter()
        .map(|column| BoardLane {
            column,
            title: column.title(),
            tasks: Vec::new(),
        })
        .collect();
    for task in tasks {
        let column = BoardColumn::for_status(task.status);
        if let Some(lane) = lanes.iter_mut().find(|lane| lane.column == column) {
            lane.tasks.push(task.clone());
        }
    }
    TaskBoard { lanes }
}

/// Due before `today` and not completed.
pub fn is_overdue(task: &TaskRecord, today: NaiveDate) -> bool {
    task.due_date < today && task.status != TaskStatus::Completed
}

#[derive(Clone)]
pub struct TaskDesk {
    store: RecordStore,
}

impl TaskDesk {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<TaskRecord>, StoreError> {
        let tasks = self.store.tasks.list().await?;
        Ok(filter_records(&tasks, &filter.query())
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn board(&self, filter: &TaskFilter) -> Result<TaskBoard, StoreError> {
        let tasks = self.store.tasks.list().await?;
        Ok(build_board(filter_records(&tasks, &filter.query())))
    }

    pub async fn overdue(&self, today: NaiveDate) -> Result<Vec<TaskRecord>, StoreError> {
        let tasks = self.store.tasks.list().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| is_overdue(task, today))
            .collect())
    }
}

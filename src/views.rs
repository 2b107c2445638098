//! Date-based task perspectives.
//!
//! Pure functions over assembled tasks; the store itself knows nothing about
//! views. All comparisons against `date` happen at calendar-day granularity,
//! ignoring time of day.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// The perspectives the UI can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Today,
    Next7Days,
    Upcoming,
    All,
}

/// Filter `tasks` down to the given perspective, relative to `today`.
///
/// Tasks without a `date` only appear in the `all` view. `next7days` is
/// inclusive of both today and the seventh day out.
pub fn tasks_for_view(tasks: Vec<Task>, view: ViewType, today: NaiveDate) -> Vec<Task> {
    let horizon = today + Days::new(7);

    tasks
        .into_iter()
        .filter(|task| match view {
            ViewType::All => true,
            ViewType::Today => task_day(task) == Some(today),
            ViewType::Next7Days => {
                task_day(task).is_some_and(|day| day >= today && day <= horizon)
            }
            ViewType::Upcoming => task_day(task).is_some_and(|day| day >= today),
        })
        .collect()
}

/// A task is overdue when its deadline has passed and it is not completed.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && task.deadline.is_some_and(|deadline| deadline < now)
}

fn task_day(task: &Task) -> Option<NaiveDate> {
    task.date.map(|date| date.date_naive())
}

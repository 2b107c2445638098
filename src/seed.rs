//! Development sample data.

use anyhow::Result;
use chrono::{Days, Utc};

use crate::db::Store;
use crate::models::*;

/// Populate a store with a few labels, lists, and dated tasks. Intended for
/// a fresh development database; runs against whatever is already there
/// without checking for duplicates.
pub fn seed(store: &Store) -> Result<()> {
    let work_label = store.create_label(CreateLabelInput {
        name: "Work".to_string(),
        color: "#3b82f6".to_string(),
        icon: "\u{1F4BC}".to_string(),
    })?;

    let personal_label = store.create_label(CreateLabelInput {
        name: "Personal".to_string(),
        color: "#10b981".to_string(),
        icon: "\u{1F3E0}".to_string(),
    })?;

    let urgent_label = store.create_label(CreateLabelInput {
        name: "Urgent".to_string(),
        color: "#ef4444".to_string(),
        icon: "\u{1F525}".to_string(),
    })?;

    let work_list = store.create_list(CreateListInput {
        name: "Work Projects".to_string(),
        color: "#3b82f6".to_string(),
        icon: "\u{1F4BC}".to_string(),
        is_default: false,
    })?;

    let personal_list = store.create_list(CreateListInput {
        name: "Personal".to_string(),
        color: "#10b981".to_string(),
        icon: "\u{1F3E0}".to_string(),
        is_default: false,
    })?;

    let today = Utc::now();
    let tomorrow = today + Days::new(1);
    let next_week = today + Days::new(7);

    store.create_task(CreateTaskInput {
        name: "Complete project proposal".to_string(),
        description: Some("Finish the Q4 project proposal and send to team for review".to_string()),
        date: Some(today),
        deadline: Some(today),
        reminders: vec![],
        estimate: Some(120),
        actual_time: None,
        labels: vec![work_label.clone(), urgent_label],
        priority: Priority::High,
        subtasks: vec![
            SubtaskInput {
                title: "Research competitors".to_string(),
                completed: true,
            },
            SubtaskInput {
                title: "Write executive summary".to_string(),
                completed: false,
            },
            SubtaskInput {
                title: "Create budget estimate".to_string(),
                completed: false,
            },
        ],
        recurring: None,
        recurring_config: None,
        list_id: Some(work_list.id),
        completed: false,
        attachments: vec![],
    })?;

    store.create_task(CreateTaskInput {
        name: "Team standup meeting".to_string(),
        description: Some("Daily sync with the development team".to_string()),
        date: Some(today),
        deadline: None,
        reminders: vec![],
        estimate: Some(30),
        actual_time: None,
        labels: vec![work_label],
        priority: Priority::Medium,
        subtasks: vec![],
        recurring: Some(RecurringType::Weekdays),
        recurring_config: None,
        list_id: Some(work_list.id),
        completed: false,
        attachments: vec![],
    })?;

    store.create_task(CreateTaskInput {
        name: "Grocery shopping".to_string(),
        description: Some("Buy groceries for the week".to_string()),
        date: Some(tomorrow),
        deadline: Some(tomorrow),
        reminders: vec![tomorrow],
        estimate: Some(45),
        actual_time: None,
        labels: vec![personal_label.clone()],
        priority: Priority::Medium,
        subtasks: vec![
            SubtaskInput {
                title: "Vegetables and fruits".to_string(),
                completed: false,
            },
            SubtaskInput {
                title: "Protein and dairy".to_string(),
                completed: false,
            },
        ],
        recurring: None,
        recurring_config: None,
        list_id: Some(personal_list.id),
        completed: false,
        attachments: vec![],
    })?;

    store.create_task(CreateTaskInput {
        name: "Plan weekend trip".to_string(),
        description: None,
        date: Some(next_week),
        deadline: None,
        reminders: vec![],
        estimate: None,
        actual_time: None,
        labels: vec![personal_label],
        priority: Priority::Low,
        subtasks: vec![],
        recurring: None,
        recurring_config: None,
        list_id: None, // falls into the inbox
        completed: false,
        attachments: vec![],
    })?;

    tracing::info!("Seeded sample labels, lists, and tasks");
    Ok(())
}

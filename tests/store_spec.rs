use chrono::{Days, Utc};
use daylist::db::{Store, StoreError};
use daylist::models::*;
use speculate2::speculate;
use uuid::Uuid;

fn basic_task(name: &str) -> CreateTaskInput {
    CreateTaskInput {
        name: name.to_string(),
        description: None,
        date: None,
        deadline: None,
        reminders: vec![],
        estimate: None,
        actual_time: None,
        labels: vec![],
        priority: Priority::None,
        subtasks: vec![],
        recurring: None,
        recurring_config: None,
        list_id: None,
        completed: false,
        attachments: vec![],
    }
}

fn create_test_label(db: &Store, name: &str) -> Label {
    db.create_label(CreateLabelInput {
        name: name.to_string(),
        color: "#3b82f6".to_string(),
        icon: "L".to_string(),
    })
    .expect("Failed to create label")
}

// Creation timestamps order several queries; a short pause keeps
// consecutive rows distinguishable.
fn pause() {
    std::thread::sleep(std::time::Duration::from_millis(5));
}

speculate! {
    before {
        let db = Store::open_memory().expect("Failed to create in-memory store");
        db.migrate().expect("Failed to run migrations");
    }

    describe "initialization" {
        it "creates exactly one default Inbox list" {
            db.ensure_default_list().expect("Failed to ensure default list");

            let lists = db.get_lists().expect("Query failed");
            assert_eq!(lists.len(), 1);
            assert_eq!(lists[0].name, "Inbox");
            assert!(lists[0].is_default);
        }

        it "does not duplicate the default list on repeated startup" {
            let first = db.ensure_default_list().expect("Failed");
            let second = db.ensure_default_list().expect("Failed");

            assert_eq!(first.id, second.id);
            let defaults: Vec<_> = db.get_lists().expect("Query failed")
                .into_iter()
                .filter(|l| l.is_default)
                .collect();
            assert_eq!(defaults.len(), 1);
        }
    }

    describe "lists" {
        it "creates a list and returns the full entity" {
            let list = db.create_list(CreateListInput {
                name: "Work".to_string(),
                color: "#3b82f6".to_string(),
                icon: "W".to_string(),
                is_default: false,
            }).expect("Failed to create list");

            assert_eq!(list.name, "Work");
            assert_eq!(list.color, "#3b82f6");
            assert!(!list.is_default);
            assert_eq!(list.created_at, list.updated_at);
        }

        it "returns lists in creation order" {
            db.ensure_default_list().expect("Failed");
            pause();
            db.create_list(CreateListInput {
                name: "Second".to_string(),
                color: "#000000".to_string(),
                icon: "S".to_string(),
                is_default: false,
            }).expect("Failed");

            let lists = db.get_lists().expect("Query failed");
            assert_eq!(lists.len(), 2);
            assert_eq!(lists[0].name, "Inbox");
            assert_eq!(lists[1].name, "Second");
        }
    }

    describe "labels" {
        it "creates and retrieves labels in creation order" {
            create_test_label(&db, "Work");
            pause();
            create_test_label(&db, "Personal");

            let labels = db.get_labels().expect("Query failed");
            assert_eq!(labels.len(), 2);
            assert_eq!(labels[0].name, "Work");
            assert_eq!(labels[1].name, "Personal");
        }
    }

    describe "create_task" {
        it "round-trips a fully populated task" {
            db.ensure_default_list().expect("Failed");
            let label = create_test_label(&db, "Work");
            let date = Utc::now() + Days::new(1);

            let created = db.create_task(CreateTaskInput {
                description: Some("words".to_string()),
                date: Some(date),
                deadline: Some(date),
                reminders: vec![date],
                estimate: Some(90),
                actual_time: Some(45),
                labels: vec![label.clone()],
                priority: Priority::High,
                subtasks: vec![
                    SubtaskInput { title: "first".to_string(), completed: true },
                    SubtaskInput { title: "second".to_string(), completed: false },
                ],
                recurring: Some(RecurringType::Weekly),
                recurring_config: Some(RecurringConfig {
                    interval: Some(2),
                    days_of_week: Some(vec![1, 3]),
                    day_of_month: None,
                    month_of_year: None,
                }),
                attachments: vec!["/docs/spec.pdf".to_string()],
                ..basic_task("Full task")
            }).expect("Failed to create task");

            let found = db.get_task_by_id(created.id)
                .expect("Query failed")
                .expect("Task not found");

            assert_eq!(found.name, "Full task");
            assert_eq!(found.description, Some("words".to_string()));
            assert_eq!(found.date, Some(date));
            assert_eq!(found.deadline, Some(date));
            assert_eq!(found.reminders, vec![date]);
            assert_eq!(found.estimate, Some(90));
            assert_eq!(found.actual_time, Some(45));
            assert_eq!(found.priority, Priority::High);
            assert_eq!(found.recurring, Some(RecurringType::Weekly));
            assert_eq!(found.recurring_config.as_ref().unwrap().interval, Some(2));
            assert_eq!(found.labels.len(), 1);
            assert_eq!(found.labels[0].id, label.id);
            assert_eq!(found.subtasks.len(), 2);
            assert_eq!(found.subtasks[0].title, "first");
            assert!(found.subtasks[0].completed);
            assert_eq!(found.attachments, vec!["/docs/spec.pdf".to_string()]);
            assert!(found.history.is_empty());
        }

        it "resolves a missing list_id to the default list" {
            let inbox = db.ensure_default_list().expect("Failed");

            let task = db.create_task(basic_task("Inbox task")).expect("Failed to create");
            assert_eq!(task.list_id, inbox.id);
        }

        it "fails when no default list exists and none was supplied" {
            let err = db.create_task(basic_task("Orphan")).unwrap_err();

            assert!(matches!(
                err.downcast_ref::<StoreError>(),
                Some(StoreError::MissingDefaultList)
            ));
        }

        it "never stamps completed_at at creation" {
            db.ensure_default_list().expect("Failed");

            let task = db.create_task(CreateTaskInput {
                completed: true,
                ..basic_task("Done on arrival")
            }).expect("Failed to create");

            assert!(task.completed);
            assert!(task.completed_at.is_none());
        }

        it "rejects linking a label that does not exist" {
            db.ensure_default_list().expect("Failed");
            let ghost = Label {
                id: Uuid::new_v4(),
                name: "Ghost".to_string(),
                color: "#000000".to_string(),
                icon: "G".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };

            let result = db.create_task(CreateTaskInput {
                labels: vec![ghost],
                ..basic_task("Bad link")
            });

            assert!(result.is_err());
        }
    }

    describe "get_tasks" {
        it "returns tasks newest first" {
            db.ensure_default_list().expect("Failed");
            db.create_task(basic_task("Older")).expect("Failed");
            pause();
            db.create_task(basic_task("Newer")).expect("Failed");

            let tasks = db.get_tasks().expect("Query failed");
            assert_eq!(tasks.len(), 2);
            assert_eq!(tasks[0].name, "Newer");
            assert_eq!(tasks[1].name, "Older");
        }

        it "returns None for an unknown task id" {
            let found = db.get_task_by_id(Uuid::new_v4()).expect("Query failed");
            assert!(found.is_none());
        }
    }

    describe "update_task" {
        it "fails for a non-existent task" {
            let err = db.update_task(Uuid::new_v4(), UpdateTaskInput {
                name: Some("Nope".to_string()),
                ..Default::default()
            }).unwrap_err();

            assert!(matches!(
                err.downcast_ref::<StoreError>(),
                Some(StoreError::TaskNotFound(_))
            ));
        }

        it "applies only the supplied fields" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(CreateTaskInput {
                priority: Priority::Low,
                ..basic_task("A")
            }).expect("Failed to create");

            let updated = db.update_task(task.id, UpdateTaskInput {
                priority: Some(Priority::High),
                ..Default::default()
            }).expect("Failed to update");

            assert_eq!(updated.name, "A");
            assert_eq!(updated.priority, Priority::High);
        }

        it "records one accurate history entry per changed field" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(basic_task("Original")).expect("Failed to create");

            let updated = db.update_task(task.id, UpdateTaskInput {
                name: Some("Updated".to_string()),
                ..Default::default()
            }).expect("Failed to update");

            assert_eq!(updated.history.len(), 1);
            let entry = &updated.history[0];
            assert_eq!(entry.field, "name");
            assert_eq!(entry.old_value, Some(serde_json::json!("Original")));
            assert_eq!(entry.new_value, Some(serde_json::json!("Updated")));
        }

        it "records no history entry for an unchanged value" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(basic_task("Same")).expect("Failed to create");

            let updated = db.update_task(task.id, UpdateTaskInput {
                name: Some("Same".to_string()),
                ..Default::default()
            }).expect("Failed to update");

            assert!(updated.history.is_empty());
        }

        it "diffs against the pre-update entity across multiple fields" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(CreateTaskInput {
                priority: Priority::Low,
                ..basic_task("Multi")
            }).expect("Failed to create");

            let updated = db.update_task(task.id, UpdateTaskInput {
                name: Some("Multi renamed".to_string()),
                priority: Some(Priority::High),
                estimate: Some(60),
                ..Default::default()
            }).expect("Failed to update");

            let mut fields: Vec<_> = updated.history.iter().map(|h| h.field.as_str()).collect();
            fields.sort_unstable();
            assert_eq!(fields, vec!["estimate", "name", "priority"]);
        }

        it "replaces the label set instead of merging" {
            db.ensure_default_list().expect("Failed");
            let a = create_test_label(&db, "A");
            let b = create_test_label(&db, "B");
            let c = create_test_label(&db, "C");

            let task = db.create_task(CreateTaskInput {
                labels: vec![a, b],
                ..basic_task("Labeled")
            }).expect("Failed to create");

            let updated = db.update_task(task.id, UpdateTaskInput {
                labels: Some(vec![c.clone()]),
                ..Default::default()
            }).expect("Failed to update");

            assert_eq!(updated.labels.len(), 1);
            assert_eq!(updated.labels[0].id, c.id);
        }

        it "replaces subtasks wholesale, regenerating their ids" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(CreateTaskInput {
                subtasks: vec![
                    SubtaskInput { title: "old one".to_string(), completed: false },
                    SubtaskInput { title: "old two".to_string(), completed: false },
                ],
                ..basic_task("Checklist")
            }).expect("Failed to create");
            let old_ids: Vec<_> = task.subtasks.iter().map(|s| s.id).collect();

            let updated = db.update_task(task.id, UpdateTaskInput {
                subtasks: Some(vec![
                    SubtaskInput { title: "old one".to_string(), completed: false },
                ]),
                ..Default::default()
            }).expect("Failed to update");

            assert_eq!(updated.subtasks.len(), 1);
            assert_eq!(updated.subtasks[0].title, "old one");
            assert!(!old_ids.contains(&updated.subtasks[0].id));
        }

        it "stamps completed_at on completion and clears it on un-completion" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(basic_task("Toggle")).expect("Failed to create");
            assert!(task.completed_at.is_none());

            let completed = db.update_task(task.id, UpdateTaskInput {
                completed: Some(true),
                ..Default::default()
            }).expect("Failed to update");
            assert!(completed.completed);
            assert!(completed.completed_at.is_some());

            let reopened = db.update_task(task.id, UpdateTaskInput {
                completed: Some(false),
                ..Default::default()
            }).expect("Failed to update");
            assert!(!reopened.completed);
            assert!(reopened.completed_at.is_none());
        }

        it "advances updated_at when a field changes" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(basic_task("Aging")).expect("Failed to create");
            pause();

            let updated = db.update_task(task.id, UpdateTaskInput {
                name: Some("Aged".to_string()),
                ..Default::default()
            }).expect("Failed to update");

            assert!(updated.updated_at > task.updated_at);
            assert_eq!(updated.created_at, task.created_at);
        }

        it "moves a task between lists" {
            db.ensure_default_list().expect("Failed");
            let target = db.create_list(CreateListInput {
                name: "Target".to_string(),
                color: "#000000".to_string(),
                icon: "T".to_string(),
                is_default: false,
            }).expect("Failed to create list");

            let task = db.create_task(basic_task("Mover")).expect("Failed to create");
            let updated = db.update_task(task.id, UpdateTaskInput {
                list_id: Some(target.id),
                ..Default::default()
            }).expect("Failed to update");

            assert_eq!(updated.list_id, target.id);
            assert_eq!(updated.history.len(), 1);
            assert_eq!(updated.history[0].field, "list_id");
        }
    }

    describe "delete_task" {
        it "removes the task" {
            db.ensure_default_list().expect("Failed");
            let task = db.create_task(basic_task("Doomed")).expect("Failed to create");

            db.delete_task(task.id).expect("Failed to delete");

            assert!(db.get_task_by_id(task.id).expect("Query failed").is_none());
            assert!(db.get_tasks().expect("Query failed").is_empty());
        }

        it "is a no-op for a non-existent id" {
            db.delete_task(Uuid::new_v4()).expect("Delete should not fail");
        }
    }

    describe "persistence" {
        it "survives closing and reopening the database file" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("daylist.db");

            let task_id = {
                let db = Store::open(path.clone()).expect("Failed to open");
                db.migrate().expect("Failed to migrate");
                db.ensure_default_list().expect("Failed");
                db.create_task(basic_task("Durable")).expect("Failed to create").id
            };

            let reopened = Store::open(path).expect("Failed to reopen");
            reopened.migrate().expect("Migrations should be idempotent");
            reopened.ensure_default_list().expect("Failed");

            let lists = reopened.get_lists().expect("Query failed");
            assert_eq!(lists.iter().filter(|l| l.is_default).count(), 1);

            let task = reopened.get_task_by_id(task_id)
                .expect("Query failed")
                .expect("Task lost on reopen");
            assert_eq!(task.name, "Durable");
        }
    }
}

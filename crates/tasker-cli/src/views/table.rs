use chrono::NaiveDate;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tasker_core::models::{IncompleteInstance, Task};

/// Title-cased cadence id, as shown to users.
pub fn cadence_label(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else {
        HumanTime::from(date.signed_duration_since(today)).to_string()
    }
}

pub fn display_instances(instances: &[IncompleteInstance], today: NaiveDate) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Date", "Due"]);

    for instance in instances {
        let mut row = Row::new();
        row.add_cell(Cell::new(instance.id));
        row.add_cell(Cell::new(&instance.task_name).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(instance.date));

        let due_cell = Cell::new(relative_day(instance.date, today));
        let due_cell = if instance.date < today {
            due_cell.fg(Color::Red)
        } else if instance.date == today {
            due_cell.fg(Color::Yellow)
        } else {
            due_cell
        };
        row.add_cell(due_cell);
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Cadence", "Start Date"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(Cell::new(&task.name));
        row.add_cell(Cell::new(cadence_label(&task.cadence)));
        row.add_cell(Cell::new(task.start_date));
        table.add_row(row);
    }

    println!("{table}");
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/

//! Renders extracted rows as a text table
//!
//! Columns follow the field order of the first row, which is the order the
//! server sends them in. Fields that only appear in later rows are appended.

use crate::model::responses::{DataRow, Task, TaskGroup};
use prettytable::{Cell, Row, Table, format};
use serde_json::Value;

/// Column names of a set of rows, in first-seen order
pub fn column_names(rows: &[DataRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Builds a table with one header row and one row per data row
///
/// Missing fields render as `-`.
pub fn rows_table(rows: &[DataRow]) -> Table {
    let columns = column_names(rows);
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.set_titles(Row::new(
        columns.iter().map(|c| Cell::new(&c.to_uppercase())).collect(),
    ));
    for row in rows {
        table.add_row(Row::new(
            columns
                .iter()
                .map(|c| Cell::new(&cell_text(row.get(c))))
                .collect(),
        ));
    }
    table
}

/// Table of task groups
pub fn task_groups_table(groups: &[TaskGroup]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![Cell::new("GROUP ID"), Cell::new("NAME")]));
    for group in groups {
        table.add_row(Row::new(vec![
            Cell::new(&group.task_group_id.to_string()),
            Cell::new(&group.task_group_name),
        ]));
    }
    table
}

/// Table of tasks
pub fn tasks_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![Cell::new("TASK ID"), Cell::new("NAME")]));
    for task in tasks {
        table.add_row(Row::new(vec![
            Cell::new(&task.task_id),
            Cell::new(&task.task_name),
        ]));
    }
    table
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

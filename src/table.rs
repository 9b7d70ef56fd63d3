//! Employee list exposed as an addressable grid.
//!
//! The backing list is only ever replaced wholesale: `replace_all` swaps the
//! vector and then notifies observers, so an observer always sees either the
//! previous list or the new one.

use derive_more::From;
use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::TableError;
use crate::model::employee::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumCountMacro)]
pub enum Column {
    #[strum(serialize = "ID")]
    Id,
    #[strum(serialize = "Name")]
    Name,
    #[strum(serialize = "Position")]
    Position,
    #[strum(serialize = "Daily Rate")]
    DailyRate,
    #[strum(serialize = "Days Present")]
    DaysPresent,
}

impl Column {
    pub fn at(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn value(self, employee: &Employee) -> Cell {
        match self {
            Column::Id => employee.id.clone().into(),
            Column::Name => employee.name.clone().into(),
            Column::Position => employee.position.clone().into(),
            Column::DailyRate => employee.daily_rate.into(),
            Column::DaysPresent => employee.days_present.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, From)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Every row and column may have changed.
    DataChanged { rows: usize },
}

pub type Observer = Box<dyn Fn(&TableEvent) + Send + Sync>;

/// Read side of a grid, independent of any presentation layer.
pub trait TableModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// `Ok(None)` for a column past the defined ones.
    fn value_at(&self, row: usize, column: usize) -> Result<Option<Cell>, TableError>;

    fn column_name(&self, column: usize) -> Result<String, TableError>;
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableGrid {
    #[schema(example = json!(["ID", "Name", "Position", "Daily Rate", "Days Present"]))]
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Vec<Object>>, example = json!([["E1", "Jane", "Clerk", 500.0, 10.0]]))]
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Default)]
pub struct EmployeeTable {
    employees: Vec<Employee>,
    observers: Vec<Observer>,
}

impl EmployeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl Fn(&TableEvent) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Swap in `employees` and return the list that was displayed before.
    pub fn replace_all(&mut self, employees: Vec<Employee>) -> Vec<Employee> {
        let previous = std::mem::replace(&mut self.employees, employees);
        let event = TableEvent::DataChanged {
            rows: self.employees.len(),
        };
        debug!(rows = self.employees.len(), "Employee table replaced");
        for observer in &self.observers {
            observer(&event);
        }
        previous
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn grid(&self) -> TableGrid {
        TableGrid {
            columns: Column::iter().map(|c| c.to_string()).collect(),
            rows: self
                .employees
                .iter()
                .map(|e| Column::iter().map(|c| c.value(e)).collect())
                .collect(),
        }
    }
}

impl TableModel for EmployeeTable {
    fn row_count(&self) -> usize {
        self.employees.len()
    }

    fn column_count(&self) -> usize {
        Column::COUNT
    }

    fn value_at(&self, row: usize, column: usize) -> Result<Option<Cell>, TableError> {
        let employee = self
            .employees
            .get(row)
            .ok_or(TableError::RowOutOfBounds {
                row,
                rows: self.employees.len(),
            })?;
        Ok(Column::at(column).map(|c| c.value(employee)))
    }

    fn column_name(&self, column: usize) -> Result<String, TableError> {
        Column::at(column)
            .map(|c| c.to_string())
            .ok_or(TableError::ColumnOutOfBounds {
                column,
                columns: Column::COUNT,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn staff() -> Vec<Employee> {
        vec![
            Employee::new("E1", "Jane", "Clerk", 500.0, 10.0),
            Employee::new("E2", "Ray", "Driver", 450.5, 22.0),
            Employee::new("E3", "Mina", "Cook", 520.0, 18.5),
        ]
    }

    #[test]
    fn row_count_follows_replacement() {
        let mut table = EmployeeTable::new();
        assert_eq!(table.row_count(), 0);

        for len in [3usize, 0, 2, 1] {
            let list: Vec<_> = staff().into_iter().take(len).collect();
            table.replace_all(list);
            assert_eq!(table.row_count(), len);
        }
    }

    #[test]
    fn replace_all_returns_previous_list() {
        let mut table = EmployeeTable::new();
        table.replace_all(staff());
        let previous = table.replace_all(vec![Employee::new("E9", "Ola", "Guard", 400.0, 5.0)]);

        assert_eq!(previous, staff());
        assert_eq!(table.employees()[0].id, "E9");
    }

    #[test]
    fn value_at_selects_each_field() {
        let mut table = EmployeeTable::new();
        table.replace_all(staff());

        assert_eq!(table.value_at(1, 0).unwrap(), Some(Cell::Text("E2".into())));
        assert_eq!(table.value_at(1, 1).unwrap(), Some(Cell::Text("Ray".into())));
        assert_eq!(table.value_at(1, 2).unwrap(), Some(Cell::Text("Driver".into())));
        assert_eq!(table.value_at(1, 3).unwrap(), Some(Cell::Number(450.5)));
        assert_eq!(table.value_at(1, 4).unwrap(), Some(Cell::Number(22.0)));
    }

    #[test]
    fn unknown_column_has_no_value() {
        let mut table = EmployeeTable::new();
        table.replace_all(staff());

        assert_eq!(table.column_count(), 5);
        assert_eq!(table.value_at(0, 5).unwrap(), None);
        assert_eq!(table.value_at(0, 42).unwrap(), None);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut table = EmployeeTable::new();
        table.replace_all(staff());

        assert_eq!(
            table.value_at(3, 0),
            Err(TableError::RowOutOfBounds { row: 3, rows: 3 })
        );
        assert_eq!(
            table.column_name(5),
            Err(TableError::ColumnOutOfBounds {
                column: 5,
                columns: 5
            })
        );
    }

    #[test]
    fn column_labels_are_fixed() {
        let table = EmployeeTable::new();
        let labels: Vec<_> = (0..table.column_count())
            .map(|c| table.column_name(c).unwrap())
            .collect();

        assert_eq!(
            labels,
            ["ID", "Name", "Position", "Daily Rate", "Days Present"]
        );
    }

    #[test]
    fn observers_see_every_replacement() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut table = EmployeeTable::new();
        let sink = seen.clone();
        table.subscribe(move |event| sink.lock().unwrap().push(*event));

        table.replace_all(staff());
        table.replace_all(Vec::new());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                TableEvent::DataChanged { rows: 3 },
                TableEvent::DataChanged { rows: 0 },
            ]
        );
    }

    #[test]
    fn grid_mirrors_rows() {
        let mut table = EmployeeTable::new();
        table.replace_all(staff());
        let grid = table.grid();

        assert_eq!(grid.columns.len(), 5);
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[2][1], Cell::Text("Mina".into()));
        assert_eq!(
            serde_json::to_value(&grid.rows[0]).unwrap(),
            serde_json::json!(["E1", "Jane", "Clerk", 500.0, 10.0])
        );
    }
}

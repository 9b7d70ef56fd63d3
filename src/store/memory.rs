use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use super::EmployeeStore;
use crate::error::StoreError;
use crate::model::employee::Employee;
use crate::model::payslip::Payslip;

#[derive(Default)]
struct Records {
    employees: Vec<Employee>,
    payslips: Vec<Payslip>,
}

/// Insertion-ordered in-process store.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            records: RwLock::new(Records {
                employees,
                payslips: Vec::new(),
            }),
        }
    }

    pub fn payslips_for(&self, employee_id: &str) -> Result<Vec<Payslip>, StoreError> {
        Ok(self
            .read()?
            .payslips
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::new("memory store poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::new("memory store poisoned"))
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::new(format!("employee {id} not found"))
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn get_all_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.employees.clone())
    }

    async fn add_employee(&self, employee: &Employee, payslip: &Payslip) -> Result<(), StoreError> {
        let mut records = self.write()?;
        if records.employees.iter().any(|e| e.id == employee.id) {
            return Err(StoreError::new(format!(
                "employee {} already exists",
                employee.id
            )));
        }
        records.employees.push(employee.clone());
        records.payslips.push(payslip.clone());
        debug!(employee_id = %employee.id, "Employee stored in memory");
        Ok(())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut records = self.write()?;
        let slot = records
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or_else(|| not_found(&employee.id))?;
        *slot = employee.clone();
        Ok(())
    }

    async fn delete_employee(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.write()?;
        let before = records.employees.len();
        records.employees.retain(|e| e.id != id);
        if records.employees.len() == before {
            return Err(not_found(id));
        }
        records.payslips.retain(|p| p.employee_id != id);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payslip::NoDeductions;

    fn jane() -> Employee {
        Employee::new("E1", "Jane", "Clerk", 500.0, 10.0)
    }

    #[actix_web::test]
    async fn keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in ["E2", "E1", "E3"] {
            let employee = Employee::new(id, "N", "P", 1.0, 1.0);
            let slip = Payslip::for_employee(&employee, &NoDeductions);
            store.add_employee(&employee, &slip).await.unwrap();
        }

        let ids: Vec<_> = store
            .get_all_employees()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["E2", "E1", "E3"]);
    }

    #[actix_web::test]
    async fn rejects_duplicate_ids() {
        let store = MemoryStore::with_employees(vec![jane()]);
        let slip = Payslip::for_employee(&jane(), &NoDeductions);

        let err = store.add_employee(&jane(), &slip).await.unwrap_err();
        assert_eq!(err.message, "employee E1 already exists");
    }

    #[actix_web::test]
    async fn update_and_delete_need_an_existing_id() {
        let store = MemoryStore::new();

        let err = store.update_employee(&jane()).await.unwrap_err();
        assert_eq!(err.message, "employee E1 not found");
        let err = store.delete_employee("E1").await.unwrap_err();
        assert_eq!(err.message, "employee E1 not found");
    }

    #[actix_web::test]
    async fn delete_drops_payslips() {
        let store = MemoryStore::new();
        let slip = Payslip::for_employee(&jane(), &NoDeductions);
        store.add_employee(&jane(), &slip).await.unwrap();
        assert_eq!(store.payslips_for("E1").unwrap().len(), 1);

        store.delete_employee("E1").await.unwrap();

        assert!(store.get_all_employees().await.unwrap().is_empty());
        assert!(store.payslips_for("E1").unwrap().is_empty());
    }
}

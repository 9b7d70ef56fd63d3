//! Client side of the remote employee datastore.
//!
//! # Backends
//!
//! - `MySqlStore`: employees and payslips in MySQL through sqlx
//! - `MemoryStore`: process-local lists, for local runs and tests

pub mod memory;
pub mod mysql;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::employee::Employee;
use crate::model::payslip::Payslip;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// The four operations the form controller needs from the datastore.
///
/// Each call is atomic from the caller's point of view; failures carry only
/// a message.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees, in the store's natural order.
    async fn get_all_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Persist a new employee together with its first payslip.
    async fn add_employee(&self, employee: &Employee, payslip: &Payslip) -> Result<(), StoreError>;

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    async fn delete_employee(&self, id: &str) -> Result<(), StoreError>;

    fn name(&self) -> &str;
}

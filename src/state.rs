use std::sync::Arc;

use futures::lock::Mutex;

use crate::model::payslip::DeductionPolicy;
use crate::store::EmployeeStore;
use crate::table::EmployeeTable;

/// Shared by every worker. The table lock is held for a whole form action,
/// so actions run one at a time and a refresh never interleaves with
/// another action's write.
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub table: Mutex<EmployeeTable>,
    pub deductions: Arc<dyn DeductionPolicy>,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, deductions: Arc<dyn DeductionPolicy>) -> Self {
        Self {
            store,
            table: Mutex::new(EmployeeTable::new()),
            deductions,
        }
    }
}

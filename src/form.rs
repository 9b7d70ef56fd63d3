//! Create/edit/remove flow for a single employee.
//!
//! A form is either unbound (create) or bound to an existing employee (edit).
//! Every action validates first, performs exactly one store write, then
//! reloads the full list into the table. Failures are returned to the caller
//! as-is; nothing is retried or rolled back.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::{Field, FormError, StoreError, ValidationError};
use crate::model::employee::Employee;
use crate::model::payslip::{DeductionPolicy, Payslip};
use crate::store::EmployeeStore;
use crate::table::EmployeeTable;

/// Raw text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "E1",
        "name": "Jane",
        "position": "Clerk",
        "days_present": "10",
        "daily_rate": "500.00"
    })
)]
pub struct EmployeeFields {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub days_present: String,
    #[serde(default)]
    pub daily_rate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Employee),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created { employee: Employee, payslip: Payslip },
    Updated { employee: Employee },
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Created { .. } => "Employee added!",
            SaveOutcome::Updated { .. } => "Employee updated!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed { id: String },
    Cancelled,
}

impl RemoveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RemoveOutcome::Removed { .. } => "Employee removed successfully!",
            RemoveOutcome::Cancelled => "Removal cancelled",
        }
    }
}

/// Check fields in form order; the first failure wins.
pub fn validate(fields: &EmployeeFields) -> Result<Employee, ValidationError> {
    let id = required(&fields.id, Field::Id)?;
    let name = required(&fields.name, Field::Name)?;
    let position = required(&fields.position, Field::Position)?;
    let days_present = amount(&fields.days_present, Field::DaysPresent)?;
    let daily_rate = amount(&fields.daily_rate, Field::DailyRate)?;

    Ok(Employee::new(id, name, position, daily_rate, days_present))
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field));
    }
    Ok(value)
}

fn amount(value: &str, field: Field) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(ValidationError::new(field)),
    }
}

pub struct EmployeeForm {
    mode: FormMode,
}

impl EmployeeForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
        }
    }

    pub fn edit(employee: Employee) -> Self {
        Self {
            mode: FormMode::Edit(employee),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Employee",
            FormMode::Edit(_) => "Edit Employee",
        }
    }

    /// The identifier cannot be edited once the record exists.
    pub fn id_locked(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn can_remove(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Initial field values: blank for a new employee, the bound record
    /// otherwise (days always with a decimal point, rate with two decimals).
    pub fn fields(&self) -> EmployeeFields {
        match &self.mode {
            FormMode::Create => EmployeeFields::default(),
            FormMode::Edit(e) => EmployeeFields {
                id: e.id.clone(),
                name: e.name.clone(),
                position: e.position.clone(),
                days_present: decimal_text(e.days_present),
                daily_rate: format!("{:.2}", e.daily_rate),
            },
        }
    }

    pub async fn save(
        &self,
        mut fields: EmployeeFields,
        store: &dyn EmployeeStore,
        table: &mut EmployeeTable,
        policy: &dyn DeductionPolicy,
    ) -> Result<SaveOutcome, FormError> {
        if let FormMode::Edit(bound) = &self.mode {
            fields.id = bound.id.clone();
        }

        let employee = validate(&fields).map_err(|e| {
            warn!(field = %e.field, "Employee form rejected: {}", e);
            e
        })?;

        let outcome = match &self.mode {
            FormMode::Create => {
                let payslip = Payslip::for_employee(&employee, policy);
                store
                    .add_employee(&employee, &payslip)
                    .await
                    .map_err(|e| store_failure(e, "add", &employee.id))?;
                info!(
                    employee_id = %employee.id,
                    gross_salary = payslip.gross_salary,
                    net_pay = payslip.net_pay,
                    "Employee added"
                );
                SaveOutcome::Created { employee, payslip }
            }
            FormMode::Edit(_) => {
                store
                    .update_employee(&employee)
                    .await
                    .map_err(|e| store_failure(e, "update", &employee.id))?;
                info!(employee_id = %employee.id, "Employee updated");
                SaveOutcome::Updated { employee }
            }
        };

        refresh(store, table).await?;
        Ok(outcome)
    }

    /// `confirmed` is the user's answer to "remove this employee?".
    pub async fn remove(
        &self,
        confirmed: bool,
        store: &dyn EmployeeStore,
        table: &mut EmployeeTable,
    ) -> Result<RemoveOutcome, FormError> {
        let FormMode::Edit(bound) = &self.mode else {
            return Err(FormError::RemoveUnavailable);
        };
        if !confirmed {
            return Ok(RemoveOutcome::Cancelled);
        }

        store
            .delete_employee(&bound.id)
            .await
            .map_err(|e| removal_failure(store_failure(e, "delete", &bound.id)))?;
        info!(employee_id = %bound.id, "Employee removed");

        refresh(store, table).await.map_err(removal_failure)?;
        Ok(RemoveOutcome::Removed {
            id: bound.id.clone(),
        })
    }
}

/// Reload every employee from the store into `table`.
pub async fn refresh(store: &dyn EmployeeStore, table: &mut EmployeeTable) -> Result<(), FormError> {
    let employees = store.get_all_employees().await.map_err(|e| {
        error!(error = %e, store = store.name(), "Failed to refresh employee list");
        FormError::Store(e)
    })?;
    table.replace_all(employees);
    Ok(())
}

fn store_failure(e: StoreError, action: &str, employee_id: &str) -> FormError {
    error!(error = %e, action, employee_id, "Employee store write failed");
    FormError::Store(e)
}

fn removal_failure(e: FormError) -> FormError {
    match e {
        FormError::Store(e) => FormError::Remove(e),
        other => other,
    }
}

/// `10.0` stays `"10.0"` and `12.5` stays `"12.5"`.
fn decimal_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::error::FormError;
use crate::form::{self, EmployeeFields, EmployeeForm, SaveOutcome};
use crate::model::employee::Employee;
use crate::model::payslip::Payslip;
use crate::state::AppState;
use crate::table::TableGrid;

#[derive(Serialize, ToSchema)]
pub struct EmployeeTableResponse {
    #[schema(example = 1)]
    pub rows: usize,
    pub table: TableGrid,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeFormResponse {
    #[schema(example = "Edit Employee")]
    pub title: String,
    pub id_locked: bool,
    pub can_remove: bool,
    pub fields: EmployeeFields,
}

#[derive(Serialize, ToSchema)]
pub struct SaveResponse {
    #[schema(example = "Employee added!")]
    pub message: String,
    pub employee: Employee,
    #[schema(nullable = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payslip: Option<Payslip>,
    pub table: TableGrid,
}

#[derive(Serialize, ToSchema)]
pub struct RemoveResponse {
    #[schema(example = "Employee removed successfully!")]
    pub message: String,
    pub table: TableGrid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RemoveQuery {
    /// The user's answer to "remove this employee?"; absent means no.
    #[param(example = true)]
    pub confirm: Option<bool>,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": "Employee not found"
    }))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "Employee table reloaded from the store", body = EmployeeTableResponse),
        (status = 502, description = "Store failure", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> Result<HttpResponse, FormError> {
    let mut table = state.table.lock().await;
    form::refresh(state.store.as_ref(), &mut table).await?;

    Ok(HttpResponse::Ok().json(EmployeeTableResponse {
        rows: table.employees().len(),
        table: table.grid(),
    }))
}

/// Blank form for a new employee
#[utoipa::path(
    get,
    path = "/api/employee-form",
    responses(
        (status = 200, description = "Empty create form", body = EmployeeFormResponse)
    ),
    tag = "Employee"
)]
pub async fn new_employee_form() -> HttpResponse {
    HttpResponse::Ok().json(form_response(&EmployeeForm::create()))
}

/// Prefilled form for an existing employee
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}/form",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Edit form", body = EmployeeFormResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let employee_id = path.into_inner();
    let table = state.table.lock().await;

    match table.find(&employee_id) {
        Some(employee) => {
            HttpResponse::Ok().json(form_response(&EmployeeForm::edit(employee.clone())))
        }
        None => not_found(),
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = EmployeeFields,
    responses(
        (status = 201, description = "Employee and payslip created", body = SaveResponse),
        (status = 400, description = "Invalid field", body = ErrorBody, example = json!({
            "message": "Name is required",
            "field": "name"
        })),
        (status = 502, description = "Store failure", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<EmployeeFields>,
) -> Result<HttpResponse, FormError> {
    let mut table = state.table.lock().await;
    let outcome = EmployeeForm::create()
        .save(
            payload.into_inner(),
            state.store.as_ref(),
            &mut table,
            state.deductions.as_ref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(save_response(outcome, table.grid())))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = EmployeeFields,
    responses(
        (status = 200, description = "Employee updated", body = SaveResponse),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 502, description = "Store failure", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<EmployeeFields>,
) -> Result<HttpResponse, FormError> {
    let employee_id = path.into_inner();
    let mut table = state.table.lock().await;

    let Some(bound) = table.find(&employee_id).cloned() else {
        debug!(employee_id = %employee_id, "Update for employee not in table");
        return Ok(not_found());
    };

    let outcome = EmployeeForm::edit(bound)
        .save(
            payload.into_inner(),
            state.store.as_ref(),
            &mut table,
            state.deductions.as_ref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(save_response(outcome, table.grid())))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        RemoveQuery
    ),
    responses(
        (status = 200, description = "Employee removed, or removal cancelled", body = RemoveResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 502, description = "Store failure", body = ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RemoveQuery>,
) -> Result<HttpResponse, FormError> {
    let employee_id = path.into_inner();
    let mut table = state.table.lock().await;

    let Some(bound) = table.find(&employee_id).cloned() else {
        debug!(employee_id = %employee_id, "Removal for employee not in table");
        return Ok(not_found());
    };

    let outcome = EmployeeForm::edit(bound)
        .remove(
            query.confirm.unwrap_or(false),
            state.store.as_ref(),
            &mut table,
        )
        .await?;

    Ok(HttpResponse::Ok().json(RemoveResponse {
        message: outcome.message().to_string(),
        table: table.grid(),
    }))
}

fn form_response(form: &EmployeeForm) -> EmployeeFormResponse {
    EmployeeFormResponse {
        title: form.title().to_string(),
        id_locked: form.id_locked(),
        can_remove: form.can_remove(),
        fields: form.fields(),
    }
}

fn save_response(outcome: SaveOutcome, table: TableGrid) -> SaveResponse {
    let message = outcome.message().to_string();
    match outcome {
        SaveOutcome::Created { employee, payslip } => SaveResponse {
            message,
            employee,
            payslip: Some(payslip),
            table,
        },
        SaveOutcome::Updated { employee } => SaveResponse {
            message,
            employee,
            payslip: None,
            table,
        },
    }
}

use crate::api::employee::{
    EmployeeFormResponse, EmployeeTableResponse, RemoveResponse, SaveResponse,
};
use crate::error::{ErrorBody, Field};
use crate::form::EmployeeFields;
use crate::model::employee::Employee;
use crate::model::payslip::{DeductionLine, Payslip};
use crate::table::TableGrid;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paydesk API",
        version = "0.1.0",
        description = r#"
## Employee records and payslips

Every write goes through the employee form:

- **Create** validates the fields, stores the employee with its first payslip
  and reloads the employee table.
- **Edit** works on a displayed employee; the ID is locked.
- **Remove** needs `confirm=true`; without it nothing is deleted.

Validation failures name the first offending field, checked in the order
ID, name, position, days present, daily rate.

Store failures are reported as-is (HTTP 502) and are never retried.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::new_employee_form,
        crate::api::employee::get_employee_form,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee
    ),
    components(
        schemas(
            Employee,
            EmployeeFields,
            Payslip,
            DeductionLine,
            TableGrid,
            Field,
            ErrorBody,
            EmployeeTableResponse,
            EmployeeFormResponse,
            SaveResponse,
            RemoveResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee form and table APIs"),
    )
)]
pub struct ApiDoc;

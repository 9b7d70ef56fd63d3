use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error};

use super::EmployeeStore;
use crate::error::StoreError;
use crate::model::employee::Employee;
use crate::model::payslip::Payslip;

/// Employees and payslips kept in MySQL. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn get_all_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = r#"
            SELECT id, name, position, daily_rate, days_present
            FROM employees
            ORDER BY created_at, id
        "#;

        sqlx::query_as::<_, Employee>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch employees");
                StoreError::from(e)
            })
    }

    async fn add_employee(&self, employee: &Employee, payslip: &Payslip) -> Result<(), StoreError> {
        let deductions = serde_json::to_string(&payslip.deductions)?;

        // Employee and payslip land together or not at all.
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO employees (id, name, position, daily_rate, days_present)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(employee.daily_rate)
        .bind(employee.days_present)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(StoreError::new(format!(
                        "employee {} already exists",
                        employee.id
                    )));
                }
            }
            error!(error = %e, employee_id = %employee.id, "Failed to insert employee");
            return Err(e.into());
        }

        sqlx::query(
            r#"
            INSERT INTO payslips
            (id, employee_id, daily_rate, days_present, gross_salary,
             deductions, total_deductions, net_pay, generated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payslip.id)
        .bind(&payslip.employee_id)
        .bind(payslip.daily_rate)
        .bind(payslip.days_present)
        .bind(payslip.gross_salary)
        .bind(deductions)
        .bind(payslip.total_deductions)
        .bind(payslip.net_pay)
        .bind(payslip.generated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %employee.id, "Failed to insert payslip");
            StoreError::from(e)
        })?;

        tx.commit().await?;
        debug!(employee_id = %employee.id, payslip_id = %payslip.id, "Employee created");
        Ok(())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, position = ?, daily_rate = ?, days_present = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(employee.daily_rate)
        .bind(employee.days_present)
        .bind(&employee.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %employee.id, "Failed to update employee");
            StoreError::from(e)
        })?;

        // MySQL reports changed rows, so an identical update also counts as
        // zero; confirm the row is really missing before failing.
        if result.rows_affected() == 0 && !self.exists(&employee.id).await? {
            return Err(StoreError::new(format!("employee {} not found", employee.id)));
        }
        Ok(())
    }

    async fn delete_employee(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(r#"DELETE FROM employees WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = id, "Failed to delete employee");
                StoreError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::new(format!("employee {id} not found")));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mysql"
    }
}

impl MySqlStore {
    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ? LIMIT 1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::employee::Employee;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeductionLine {
    #[schema(example = "sss")]
    pub name: String,
    #[schema(example = 225.0)]
    pub amount: f64,
}

/// Pay computed for one employee at the moment the employee was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payslip {
    #[schema(example = "5f0c4b0e-7d2a-4d4f-9a53-2b1f0e6c9d11")]
    pub id: String,
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = 500.0)]
    pub daily_rate: f64,
    #[schema(example = 10.0)]
    pub days_present: f64,
    #[schema(example = 5000.0)]
    pub gross_salary: f64,
    pub deductions: Vec<DeductionLine>,
    #[schema(example = 0.0)]
    pub total_deductions: f64,
    #[schema(example = 5000.0)]
    pub net_pay: f64,
    #[schema(value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
}

impl Payslip {
    pub fn for_employee(employee: &Employee, policy: &dyn DeductionPolicy) -> Self {
        let gross_salary = employee.gross_salary();
        let deductions = policy.deductions(employee, gross_salary);
        let total_deductions = deductions.iter().map(|d| d.amount).sum::<f64>();

        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee.id.clone(),
            daily_rate: employee.daily_rate,
            days_present: employee.days_present,
            gross_salary,
            deductions,
            total_deductions,
            net_pay: gross_salary - total_deductions,
            generated_at: Utc::now(),
        }
    }
}

/// Statutory deductions are site policy, so payslips ask a policy for them
/// instead of hardcoding any formula.
pub trait DeductionPolicy: Send + Sync {
    fn deductions(&self, employee: &Employee, gross_salary: f64) -> Vec<DeductionLine>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoDeductions;

impl DeductionPolicy for NoDeductions {
    fn deductions(&self, _employee: &Employee, _gross_salary: f64) -> Vec<DeductionLine> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeductionKind {
    /// Fraction of gross, `0.0..=1.0`.
    Rate(f64),
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeductionRule {
    pub name: String,
    pub kind: DeductionKind,
}

#[derive(Debug, Error, PartialEq)]
pub enum DeductionConfigError {
    #[error("deduction entry `{0}` must look like name=rate:0.05 or name=fixed:100")]
    Malformed(String),
    #[error("deduction `{name}` has invalid amount `{value}`")]
    InvalidAmount { name: String, value: String },
    #[error("deduction `{0}` is listed more than once")]
    Duplicate(String),
}

/// Deduction rules read from configuration, e.g.
/// `sss=rate:0.045,philhealth=rate:0.025,pagibig=fixed:100`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfiguredDeductions {
    rules: Vec<DeductionRule>,
}

impl ConfiguredDeductions {
    pub fn rules(&self) -> &[DeductionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for ConfiguredDeductions {
    type Err = DeductionConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules: Vec<DeductionRule> = Vec::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, rule) = entry
                .split_once('=')
                .ok_or_else(|| DeductionConfigError::Malformed(entry.to_string()))?;
            let (kind, value) = rule
                .split_once(':')
                .ok_or_else(|| DeductionConfigError::Malformed(entry.to_string()))?;

            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DeductionConfigError::Malformed(entry.to_string()));
            }
            if rules.iter().any(|r| r.name == name) {
                return Err(DeductionConfigError::Duplicate(name));
            }

            let invalid = || DeductionConfigError::InvalidAmount {
                name: name.clone(),
                value: value.trim().to_string(),
            };
            let amount: f64 = value.trim().parse().map_err(|_| invalid())?;
            if !amount.is_finite() || amount < 0.0 {
                return Err(invalid());
            }

            let kind = match kind.trim() {
                "rate" if amount <= 1.0 => DeductionKind::Rate(amount),
                "rate" => return Err(invalid()),
                "fixed" => DeductionKind::Fixed(amount),
                _ => return Err(DeductionConfigError::Malformed(entry.to_string())),
            };

            rules.push(DeductionRule { name, kind });
        }

        Ok(Self { rules })
    }
}

impl DeductionPolicy for ConfiguredDeductions {
    fn deductions(&self, _employee: &Employee, gross_salary: f64) -> Vec<DeductionLine> {
        self.rules
            .iter()
            .map(|rule| {
                let amount = match rule.kind {
                    DeductionKind::Rate(rate) => gross_salary * rate,
                    DeductionKind::Fixed(amount) => amount,
                };
                DeductionLine {
                    name: rule.name.clone(),
                    amount: round_cents(amount),
                }
            })
            .collect()
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Employee {
        Employee::new("E1", "Jane", "Clerk", 500.0, 10.0)
    }

    #[test]
    fn gross_is_rate_times_days() {
        let slip = Payslip::for_employee(&jane(), &NoDeductions);

        assert_eq!(slip.employee_id, "E1");
        assert_eq!(slip.gross_salary, 5000.0);
        assert!(slip.deductions.is_empty());
        assert_eq!(slip.total_deductions, 0.0);
        assert_eq!(slip.net_pay, 5000.0);
    }

    #[test]
    fn configured_deductions_reduce_net_pay() {
        let policy: ConfiguredDeductions = "sss=rate:0.045, pagibig=fixed:100".parse().unwrap();
        let slip = Payslip::for_employee(&jane(), &policy);

        assert_eq!(
            slip.deductions,
            vec![
                DeductionLine { name: "sss".into(), amount: 225.0 },
                DeductionLine { name: "pagibig".into(), amount: 100.0 },
            ]
        );
        assert_eq!(slip.total_deductions, 325.0);
        assert_eq!(slip.net_pay, 4675.0);
    }

    #[test]
    fn empty_config_means_no_rules() {
        let policy: ConfiguredDeductions = "".parse().unwrap();
        assert!(policy.is_empty());
    }

    #[test]
    fn rejects_bad_deduction_config() {
        assert_eq!(
            "sss".parse::<ConfiguredDeductions>(),
            Err(DeductionConfigError::Malformed("sss".into()))
        );
        assert_eq!(
            "sss=percent:0.1".parse::<ConfiguredDeductions>(),
            Err(DeductionConfigError::Malformed("sss=percent:0.1".into()))
        );
        assert_eq!(
            "tax=rate:1.5".parse::<ConfiguredDeductions>(),
            Err(DeductionConfigError::InvalidAmount {
                name: "tax".into(),
                value: "1.5".into()
            })
        );
        assert_eq!(
            "tax=fixed:-3".parse::<ConfiguredDeductions>(),
            Err(DeductionConfigError::InvalidAmount {
                name: "tax".into(),
                value: "-3".into()
            })
        );
        assert_eq!(
            "sss=rate:0.1,sss=fixed:5".parse::<ConfiguredDeductions>(),
            Err(DeductionConfigError::Duplicate("sss".into()))
        );
    }
}

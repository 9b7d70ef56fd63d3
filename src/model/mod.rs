pub mod employee;
pub mod payslip;

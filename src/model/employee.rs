use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "E1",
        "name": "Jane",
        "position": "Clerk",
        "daily_rate": 500.0,
        "days_present": 10.0
    })
)]
pub struct Employee {
    /// Never changes once the record exists.
    #[schema(example = "E1")]
    pub id: String,

    #[schema(example = "Jane")]
    pub name: String,

    #[schema(example = "Clerk")]
    pub position: String,

    #[schema(example = 500.0)]
    pub daily_rate: f64,

    #[schema(example = 10.0)]
    pub days_present: f64,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        daily_rate: f64,
        days_present: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            daily_rate,
            days_present,
        }
    }

    pub fn gross_salary(&self) -> f64 {
        self.daily_rate * self.days_present
    }
}

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;
use utoipa::ToSchema;

/// Form fields, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Position,
    DaysPresent,
    DailyRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", message_for(.field))]
pub struct ValidationError {
    pub field: Field,
}

impl ValidationError {
    pub fn new(field: Field) -> Self {
        Self { field }
    }
}

fn message_for(field: &Field) -> &'static str {
    match field {
        Field::Id => "ID Number is required",
        Field::Name => "Name is required",
        Field::Position => "Position is required",
        Field::DaysPresent => "Please enter a valid number for days present",
        Field::DailyRate => "Please enter a valid salary amount",
    }
}

/// Any failure reported by the employee store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {row} out of bounds for {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },
    #[error("column {column} out of bounds for {columns} columns")]
    ColumnOutOfBounds { column: usize, columns: usize },
}

/// Outcome of a failed form action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error: {0}")]
    Store(#[from] StoreError),
    #[error("Error removing employee: {0}")]
    Remove(StoreError),
    #[error("Only an existing employee can be removed")]
    RemoveUnavailable,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Name is required")]
    pub message: String,
    #[schema(example = "name", nullable = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl ResponseError for FormError {
    fn status_code(&self) -> StatusCode {
        match self {
            FormError::Validation(_) => StatusCode::BAD_REQUEST,
            FormError::Store(_) | FormError::Remove(_) => StatusCode::BAD_GATEWAY,
            FormError::RemoveUnavailable => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let field = match self {
            FormError::Validation(e) => Some(e.field),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::new(Field::Id).to_string(),
            "ID Number is required"
        );
        assert_eq!(
            ValidationError::new(Field::DaysPresent).to_string(),
            "Please enter a valid number for days present"
        );
        assert_eq!(Field::DaysPresent.as_ref(), "days_present");
    }

    #[test]
    fn store_errors_keep_their_message() {
        let err = FormError::from(StoreError::new("timeout"));
        assert_eq!(err.to_string(), "Error: timeout");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn removal_failures_say_so() {
        let err = FormError::Remove(StoreError::new("employee E1 not found"));
        assert_eq!(err.to_string(), "Error removing employee: employee E1 not found");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = FormError::from(ValidationError::new(Field::Name));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

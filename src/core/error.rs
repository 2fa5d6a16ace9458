//! Typed error handling for the order desk
//!
//! Every fallible operation of the services returns a [`ServiceError`], so
//! callers can match on the precise failure instead of a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a referenced client or order is missing, or still owned
//! - [`UpdateError`]: the update guard rejected a mutation
//! - [`ValidationError`]: malformed filter or payload, rejected before store access
//! - [`StorageError`]: the record store failed
//!
//! [`ConfigError`] stands apart: it is raised while loading the configuration,
//! before any service exists.
//!
//! # Example
//!
//! ```rust,ignore
//! match orders.update(7, patch).await {
//!     Ok(order) => println!("updated at {}", order.last_update),
//!     Err(ServiceError::Update(UpdateError::ConcurrentUpdate { retry_after_ms, .. })) => {
//!         println!("retry in {} ms", retry_after_ms);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use crate::core::entity::{Entity, EntityId};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type of the service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Entity(e) => e.status_code(),
            ServiceError::Update(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Entity(e) => e.error_code(),
            ServiceError::Update(e) => e.error_code(),
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Storage(_) => "STORAGE_ERROR",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({ "entityType": entity_type, "id": id }))
            }
            ServiceError::Entity(EntityError::HasDependents {
                entity_type,
                id,
                dependents,
            }) => Some(serde_json::json!({
                "entityType": entity_type,
                "id": id,
                "dependents": dependents
            })),
            ServiceError::Update(UpdateError::ConcurrentUpdate {
                order_id,
                retry_after_ms,
            }) => Some(serde_json::json!({
                "orderId": order_id,
                "retryAfterMs": retry_after_ms
            })),
            ServiceError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// Check if this error reports a missing client or order
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Entity(EntityError::NotFound { .. }))
    }

    /// Check if this error is a guard rejection
    pub fn is_concurrent_update(&self) -> bool {
        matches!(self, ServiceError::Update(UpdateError::ConcurrentUpdate { .. }))
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to client and order records
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: EntityId },

    /// The record still owns other records and cannot be removed
    #[error("{entity_type} with id '{id}' still owns {dependents} dependent record(s)")]
    HasDependents {
        entity_type: String,
        id: EntityId,
        dependents: usize,
    },
}

impl EntityError {
    /// Build a `NotFound` error for the entity type `T`
    pub fn not_found<T: Entity>(id: EntityId) -> Self {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::HasDependents { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::HasDependents { .. } => "ENTITY_HAS_DEPENDENTS",
        }
    }
}

// =============================================================================
// Update Errors
// =============================================================================

/// Errors raised by the update guard
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The order was written less than one cooldown ago
    #[error("order with id '{order_id}' was updated too recently, retry in {retry_after_ms} ms")]
    ConcurrentUpdate { order_id: EntityId, retry_after_ms: i64 },
}

impl UpdateError {
    pub fn error_code(&self) -> &'static str {
        match self {
            UpdateError::ConcurrentUpdate { .. } => "CONCURRENT_UPDATE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(&errors, "", &mut fields);
        // errors() iterates a HashMap
        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        ValidationError::FieldErrors(fields)
    }
}

/// Flatten nested validation errors into wire-named paths like `orders[0].product`
fn collect_field_errors(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = format!("{}{}", prefix, wire_name(field));
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|err| FieldValidationError {
                    field: path.clone(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(nested, &format!("{path}."), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}

/// camelCase name of a struct field, matching the serde wire format
fn wire_name(field: &str) -> String {
    // schema-level errors are reported under `__all__`
    if field.starts_with("__") {
        return field.to_string();
    }
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the record store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage lock poisoned: {message}")]
    LockPoisoned { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

/// Specialized Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

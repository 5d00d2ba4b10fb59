//! Response types for the payroll engine API.
//!
//! This module defines the response bodies, the error response structure
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::import::{ImportOutcome, ImportResult};
use crate::models::{PayrollRecord, ReportSummary};
use crate::reporting::{DepartmentTotal, EarningsBreakdown};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("VALIDATION_ERROR", message, field),
            },
            PayrollError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            PayrollError::DataIntegrity { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("DATA_INTEGRITY", message),
            },
            PayrollError::Computation { message: detail } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("COMPUTATION_ERROR", "Calculation failed", detail),
            },
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParse { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            PayrollError::Repository { message: detail } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("REPOSITORY_ERROR", "Storage error", detail),
            },
            PayrollError::Export { message: detail } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", detail),
            },
        }
    }
}

/// Response body for the `/reports` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// The report totals.
    #[serde(flatten)]
    pub summary: ReportSummary,
    /// Gross pay per employee, absent when no employee matched.
    pub average_gross_pay: Option<Decimal>,
}

impl From<ReportSummary> for ReportResponse {
    fn from(summary: ReportSummary) -> Self {
        Self {
            average_gross_pay: summary.average_gross_pay(),
            summary,
        }
    }
}

/// A bulk entry that was not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEntryError {
    /// Position of the entry in the request, from zero.
    pub index: usize,
    /// Error code, as in [`ApiError::code`].
    pub code: String,
    /// Why the entry was rejected.
    pub message: String,
}

/// Response body for `POST /records/bulk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Records stored, in request order.
    pub created: Vec<PayrollRecord>,
    /// Entries rejected, in request order.
    pub errors: Vec<BulkEntryError>,
}

/// Response body for the import endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Overall result of the import.
    pub outcome: ImportOutcome,
    /// Counts and row errors.
    #[serde(flatten)]
    pub result: ImportResult,
}

impl From<ImportResult> for ImportResponse {
    fn from(result: ImportResult) -> Self {
        Self {
            outcome: result.outcome(),
            result,
        }
    }
}

/// Response body for `GET /companies/:id/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Gross pay per department.
    pub department_totals: Vec<DepartmentTotal>,
    /// Net pay against each kind of deduction.
    pub earnings: EarningsBreakdown,
    /// The most recent records, oldest first.
    pub recent_periods: Vec<PayrollRecord>,
}

//! Response types for the Policy Impact Engine API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PolicyRegime;
use crate::error::{EngineError, ErrorKind};
use crate::models::{PolicyComparison, PolicyImpactReport};

/// Summary of a registered regime for `GET /regimes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeSummary {
    /// Regime id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subtitle.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&PolicyRegime> for RegimeSummary {
    fn from(regime: &PolicyRegime) -> Self {
        Self {
            id: regime.id.clone(),
            name: regime.name.clone(),
            title: regime.title.clone(),
            description: regime.description.clone(),
        }
    }
}

/// Cent-rounded figures for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayAmounts {
    /// Regime id the figures belong to.
    pub regime_id: String,
    /// Regime display name.
    pub regime_name: String,
    /// Federal tax owed, rounded to cents.
    pub tax_owed: Decimal,
    /// Child tax credit, rounded to cents.
    pub child_credit_amount: Decimal,
}

impl From<&PolicyImpactReport> for DisplayAmounts {
    fn from(report: &PolicyImpactReport) -> Self {
        let rounded = report.impact.rounded();
        Self {
            regime_id: report.regime_id.clone(),
            regime_name: report.regime_name.clone(),
            tax_owed: rounded.tax_owed,
            child_credit_amount: rounded.child_credit_amount,
        }
    }
}

/// Response body for `POST /regimes/:regime_id/impact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResponse {
    /// Rounded figures.
    pub display: DisplayAmounts,
    /// Unrounded report with audit trace.
    pub report: PolicyImpactReport,
}

impl From<PolicyImpactReport> for ImpactResponse {
    fn from(report: PolicyImpactReport) -> Self {
        Self {
            display: DisplayAmounts::from(&report),
            report,
        }
    }
}

/// Response body for `POST /compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Rounded figures, one entry per regime.
    pub display: Vec<DisplayAmounts>,
    /// Unrounded comparison with audit traces.
    pub comparison: PolicyComparison,
}

impl From<PolicyComparison> for ComparisonResponse {
    fn from(comparison: PolicyComparison) -> Self {
        Self {
            display: comparison.reports.iter().map(DisplayAmounts::from).collect(),
            comparison,
        }
    }
}

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

    /// Creates a regime not found error response.
    pub fn regime_not_found(id: &str) -> Self {
        Self::with_details(
            "REGIME_NOT_FOUND",
            format!("Policy regime not found: {}", id),
            "Use GET /regimes to list the registered regimes",
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        if let EngineError::RegimeNotFound { id } = &error {
            return ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::regime_not_found(id),
            };
        }

        match error.kind() {
            ErrorKind::Validation => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(error.to_string()),
            },
            ErrorKind::Configuration => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Policy configuration error",
                    error.to_string(),
                ),
            },
        }
    }
}

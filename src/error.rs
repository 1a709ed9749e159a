//! Error types for the Policy Impact Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Errors fall into two kinds:
//! invalid household input and defective regime configuration.

use thiserror::Error;

use crate::models::FilingStatus;

/// Broad classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied invalid household input.
    Validation,
    /// The regime configuration is missing or inconsistent.
    Configuration,
}

/// The main error type for the Policy Impact Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use policy_impact_engine::error::EngineError;
///
/// let error = EngineError::RegimeNotFound {
///     id: "unknown".to_string(),
/// };
/// assert_eq!(error.to_string(), "Policy regime not found: unknown");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table violated its ordering or rate invariants.
    #[error("Invalid bracket table: {message}")]
    InvalidBracketTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// A regime definition is internally inconsistent.
    #[error("Invalid policy regime '{regime}': {message}")]
    InvalidRegime {
        /// The id of the offending regime.
        regime: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// No regime with the given id is registered.
    #[error("Policy regime not found: {id}")]
    RegimeNotFound {
        /// The regime id that was requested.
        id: String,
    },

    /// The regime has no bracket table for the filing status.
    #[error("No bracket table registered for regime '{regime}' and filing status {filing_status}")]
    BracketTableNotFound {
        /// The regime id.
        regime: String,
        /// The filing status that was requested.
        filing_status: FilingStatus,
    },

    /// The regime declares a surtax but no threshold for the filing status.
    #[error("No surtax threshold registered for regime '{regime}' and filing status {filing_status}")]
    SurtaxThresholdNotFound {
        /// The regime id.
        regime: String,
        /// The filing status that was requested.
        filing_status: FilingStatus,
    },

    /// The regime has no child credit phaseout threshold for the filing status.
    #[error(
        "No child credit phaseout threshold registered for regime '{regime}' and filing status {filing_status}"
    )]
    PhaseoutThresholdNotFound {
        /// The regime id.
        regime: String,
        /// The filing status that was requested.
        filing_status: FilingStatus,
    },

    /// A household profile field was invalid.
    #[error("Invalid household field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A filing status string did not name a supported status.
    #[error("Unsupported filing status: {value}")]
    UnsupportedFilingStatus {
        /// The unrecognised value.
        value: String,
    },
}

impl EngineError {
    /// Returns whether this error stems from caller input or from configuration.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidProfile { .. } | EngineError::UnsupportedFilingStatus { .. } => {
                ErrorKind::Validation
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidBracketTable { .. }
            | EngineError::InvalidRegime { .. }
            | EngineError::RegimeNotFound { .. }
            | EngineError::BracketTableNotFound { .. }
            | EngineError::SurtaxThresholdNotFound { .. }
            | EngineError::PhaseoutThresholdNotFound { .. } => ErrorKind::Configuration,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/registry.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/registry.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_bracket_table_not_found_displays_regime_and_status() {
        let error = EngineError::BracketTableNotFound {
            regime: "tcja_baseline".to_string(),
            filing_status: FilingStatus::HeadOfHousehold,
        };
        assert_eq!(
            error.to_string(),
            "No bracket table registered for regime 'tcja_baseline' and filing status head_of_household"
        );
    }

    #[test]
    fn test_invalid_profile_displays_field_and_message() {
        let error = EngineError::InvalidProfile {
            field: "dependents".to_string(),
            message: "must not be negative (got -1)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid household field 'dependents': must not be negative (got -1)"
        );
    }

    #[test]
    fn test_validation_errors_are_classified() {
        let error = EngineError::InvalidProfile {
            field: "income".to_string(),
            message: "negative".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Validation);

        let error = EngineError::UnsupportedFilingStatus {
            value: "widowed".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_configuration_errors_are_classified() {
        let error = EngineError::PhaseoutThresholdNotFound {
            regime: "r".to_string(),
            filing_status: FilingStatus::Single,
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);

        let error = EngineError::RegimeNotFound {
            id: "r".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_regime_not_found() -> EngineResult<()> {
            Err(EngineError::RegimeNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_regime_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

// Pattern parse/validation error types and constants

use crate::error::ErrorCode;
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Pattern error code constants exposed to Dart via FFI
///
/// Error code range: 2001-2008
#[frb(unignore)]
pub struct PatternErrorCodes {}

#[frb]
impl PatternErrorCodes {
    /// Payload is not valid JSON or the root structure is malformed
    pub const INVALID_JSON: i32 = 2001;

    /// Event time is negative or not finite
    pub const INVALID_TIME: i32 = 2002;

    /// Intensity outside [0.0, 1.0]
    pub const INVALID_INTENSITY: i32 = 2003;

    /// Sharpness outside [0.0, 1.0]
    pub const INVALID_SHARPNESS: i32 = 2004;

    /// Continuous event duration is zero, negative, or not finite
    pub const INVALID_DURATION: i32 = 2005;

    /// Continuous event lacks an EventDuration field
    pub const MISSING_DURATION: i32 = 2006;

    /// EventType string not recognized (strict parse mode only)
    pub const UNKNOWN_EVENT_TYPE: i32 = 2007;

    /// ParameterID string not recognized (strict parse mode only)
    pub const UNKNOWN_PARAMETER: i32 = 2008;

    // Getter methods for FFI exposure (flutter_rust_bridge requires methods not const)

    /// Get INVALID_JSON error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_json() -> i32 {
        Self::INVALID_JSON
    }

    /// Get INVALID_TIME error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_time() -> i32 {
        Self::INVALID_TIME
    }

    /// Get INVALID_INTENSITY error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_intensity() -> i32 {
        Self::INVALID_INTENSITY
    }

    /// Get INVALID_SHARPNESS error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_sharpness() -> i32 {
        Self::INVALID_SHARPNESS
    }

    /// Get INVALID_DURATION error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_duration() -> i32 {
        Self::INVALID_DURATION
    }

    /// Get MISSING_DURATION error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn missing_duration() -> i32 {
        Self::MISSING_DURATION
    }

    /// Get UNKNOWN_EVENT_TYPE error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn unknown_event_type() -> i32 {
        Self::UNKNOWN_EVENT_TYPE
    }

    /// Get UNKNOWN_PARAMETER error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn unknown_parameter() -> i32 {
        Self::UNKNOWN_PARAMETER
    }
}

/// Log a pattern error with structured context
pub fn log_pattern_error(err: &PatternError, context: &str) {
    error!(
        "Pattern error in {}: code={}, component=PatternModel, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Pattern parse and validation errors
///
/// These errors cover construction of haptic events and the JSON wire
/// format. Range validation is a construction contract: violating values
/// fail, nothing is silently clamped.
///
/// Error code range: 2001-2008
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// Payload is not valid JSON or the root structure is malformed
    InvalidJson { reason: String },

    /// Event time is negative or not finite
    InvalidTime { time: f64 },

    /// Intensity outside [0.0, 1.0]
    InvalidIntensity { value: f64 },

    /// Sharpness outside [0.0, 1.0]
    InvalidSharpness { value: f64 },

    /// Continuous event duration is zero, negative, or not finite
    InvalidDuration { value: f64 },

    /// Continuous event lacks an EventDuration field
    MissingDuration,

    /// EventType string not recognized (strict parse mode only)
    UnknownEventType { event_type: String },

    /// ParameterID string not recognized (strict parse mode only)
    UnknownParameter { id: String },
}

impl ErrorCode for PatternError {
    fn code(&self) -> i32 {
        match self {
            PatternError::InvalidJson { .. } => PatternErrorCodes::INVALID_JSON,
            PatternError::InvalidTime { .. } => PatternErrorCodes::INVALID_TIME,
            PatternError::InvalidIntensity { .. } => PatternErrorCodes::INVALID_INTENSITY,
            PatternError::InvalidSharpness { .. } => PatternErrorCodes::INVALID_SHARPNESS,
            PatternError::InvalidDuration { .. } => PatternErrorCodes::INVALID_DURATION,
            PatternError::MissingDuration => PatternErrorCodes::MISSING_DURATION,
            PatternError::UnknownEventType { .. } => PatternErrorCodes::UNKNOWN_EVENT_TYPE,
            PatternError::UnknownParameter { .. } => PatternErrorCodes::UNKNOWN_PARAMETER,
        }
    }

    fn message(&self) -> String {
        match self {
            PatternError::InvalidJson { reason } => {
                format!("Malformed pattern JSON: {}", reason)
            }
            PatternError::InvalidTime { time } => {
                format!("Event time must be finite and >= 0 (got {})", time)
            }
            PatternError::InvalidIntensity { value } => {
                format!("Intensity must be within [0.0, 1.0] (got {})", value)
            }
            PatternError::InvalidSharpness { value } => {
                format!("Sharpness must be within [0.0, 1.0] (got {})", value)
            }
            PatternError::InvalidDuration { value } => {
                format!("Duration must be finite and > 0 (got {})", value)
            }
            PatternError::MissingDuration => {
                "Continuous event requires an EventDuration".to_string()
            }
            PatternError::UnknownEventType { event_type } => {
                format!("Unrecognized EventType \"{}\"", event_type)
            }
            PatternError::UnknownParameter { id } => {
                format!("Unrecognized ParameterID \"{}\"", id)
            }
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PatternError {}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        PatternError::InvalidJson {
            reason: err.to_string(),
        }
    }
}

// Engine error types and constants

use crate::error::{ErrorCode, PatternError};
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Engine error code constants exposed to Dart via FFI
///
/// These constants provide a single source of truth for error codes
/// shared between Rust and Dart. The flutter_rust_bridge will automatically
/// generate corresponding Dart constants.
///
/// Error code range: 1001-1005
#[frb(unignore)]
pub struct EngineErrorCodes {}

#[frb]
impl EngineErrorCodes {
    /// Device has no haptic actuator or the capability query returned false
    pub const UNSUPPORTED: i32 = 1001;

    /// Hardware engine start/stop failure
    pub const HARDWARE_FAILURE: i32 = 1002;

    /// Player construction or start failed after a successful parse
    pub const PLAYBACK_FAILED: i32 = 1003;

    /// Pattern payload was malformed or failed validation
    pub const INVALID_PATTERN: i32 = 1004;

    /// Mutex was poisoned
    pub const LOCK_POISONED: i32 = 1005;

    // Getter methods for FFI exposure (flutter_rust_bridge requires methods not const)

    /// Get UNSUPPORTED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn unsupported() -> i32 {
        Self::UNSUPPORTED
    }

    /// Get HARDWARE_FAILURE error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn hardware_failure() -> i32 {
        Self::HARDWARE_FAILURE
    }

    /// Get PLAYBACK_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn playback_failed() -> i32 {
        Self::PLAYBACK_FAILED
    }

    /// Get INVALID_PATTERN error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_pattern() -> i32 {
        Self::INVALID_PATTERN
    }

    /// Get LOCK_POISONED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn lock_poisoned() -> i32 {
        Self::LOCK_POISONED
    }
}

/// Log an engine error with structured context
///
/// Logs engine errors with structured fields including the numeric error
/// code, the component, and the human-readable message. Non-blocking and
/// will not panic on failure.
pub fn log_engine_error(err: &EngineError, context: &str) {
    error!(
        "Engine error in {}: code={}, component=HapticSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Engine-related errors
///
/// These errors cover haptic engine lifecycle operations and playback
/// scheduling against the hardware backend.
///
/// Error code range: 1001-1005
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Device has no haptic actuator or the capability query returned false
    Unsupported,

    /// Hardware engine start/stop failure; reason is the platform message
    HardwareFailure { reason: String },

    /// Player construction or start failed after a successful parse
    PlaybackFailed { reason: String },

    /// Pattern payload was malformed or failed validation
    InvalidPattern { reason: String },

    /// Mutex was poisoned
    LockPoisoned { component: String },
}

impl ErrorCode for EngineError {
    fn code(&self) -> i32 {
        match self {
            EngineError::Unsupported => EngineErrorCodes::UNSUPPORTED,
            EngineError::HardwareFailure { .. } => EngineErrorCodes::HARDWARE_FAILURE,
            EngineError::PlaybackFailed { .. } => EngineErrorCodes::PLAYBACK_FAILED,
            EngineError::InvalidPattern { .. } => EngineErrorCodes::INVALID_PATTERN,
            EngineError::LockPoisoned { .. } => EngineErrorCodes::LOCK_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            EngineError::Unsupported => {
                "Haptics not supported on this device. Check supports_haptics() first.".to_string()
            }
            EngineError::HardwareFailure { reason } => {
                format!("Haptic engine failure: {}", reason)
            }
            EngineError::PlaybackFailed { reason } => {
                format!("Failed to schedule haptic playback: {}", reason)
            }
            EngineError::InvalidPattern { reason } => {
                format!("Invalid haptic pattern: {}", reason)
            }
            EngineError::LockPoisoned { component } => {
                format!("Lock poisoned on {}", component)
            }
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EngineError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for EngineError {}

impl From<PatternError> for EngineError {
    fn from(err: PatternError) -> Self {
        EngineError::InvalidPattern {
            reason: err.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_codes() {
        assert_eq!(EngineError::Unsupported.code(), EngineErrorCodes::UNSUPPORTED);
        assert_eq!(
            EngineError::HardwareFailure {
                reason: "test".to_string()
            }
            .code(),
            EngineErrorCodes::HARDWARE_FAILURE
        );
        assert_eq!(
            EngineError::PlaybackFailed {
                reason: "test".to_string()
            }
            .code(),
            EngineErrorCodes::PLAYBACK_FAILED
        );
        assert_eq!(
            EngineError::InvalidPattern {
                reason: "test".to_string()
            }
            .code(),
            EngineErrorCodes::INVALID_PATTERN
        );
        assert_eq!(
            EngineError::LockPoisoned {
                component: "test".to_string()
            }
            .code(),
            EngineErrorCodes::LOCK_POISONED
        );
    }

    #[test]
    fn test_engine_error_messages() {
        let err = EngineError::Unsupported;
        assert!(err.message().contains("not supported"));

        let err = EngineError::HardwareFailure {
            reason: "thermal shutdown".to_string(),
        };
        assert_eq!(err.message(), "Haptic engine failure: thermal shutdown");

        let err = EngineError::PlaybackFailed {
            reason: "rejected".to_string(),
        };
        assert!(err.message().contains("rejected"));

        let err = EngineError::InvalidPattern {
            reason: "bad root".to_string(),
        };
        assert!(err.message().contains("bad root"));
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Unsupported;
        let display = format!("{}", err);
        assert!(display.contains("EngineError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_from_pattern_error() {
        let parse_err = PatternError::InvalidJson {
            reason: "expected object".to_string(),
        };
        let engine_err: EngineError = parse_err.into();
        match engine_err {
            EngineError::InvalidPattern { reason } => {
                assert!(reason.contains("expected object"));
            }
            _ => panic!("Expected InvalidPattern"),
        }
    }

    #[test]
    fn test_error_code_getters() {
        assert_eq!(EngineErrorCodes::unsupported(), 1001);
        assert_eq!(EngineErrorCodes::hardware_failure(), 1002);
        assert_eq!(EngineErrorCodes::playback_failed(), 1003);
        assert_eq!(EngineErrorCodes::invalid_pattern(), 1004);
        assert_eq!(EngineErrorCodes::lock_poisoned(), 1005);
    }
}

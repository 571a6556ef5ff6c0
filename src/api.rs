// Public API for flutter_rust_bridge integration
// This module provides FFI functions for Flutter to interact with the Rust
// haptic engine core

#![allow(dead_code)] // FFI functions are called from Dart, not detected by Rust analyzer

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::context::HapticContext;
use crate::engine::SessionEvent;
use crate::error::EngineError;
use crate::pattern::HapticPattern;

pub mod types;

pub use types::{EventRequest, PatternRequest};

// Re-export error code constants for FFI exposure
pub use crate::error::{EngineErrorCodes, PatternErrorCodes};


/// Global HapticContext instance - single dependency injection point
///
/// The hosting application obtains every session operation through this one
/// context; the session itself carries no ambient state and tests construct
/// their own contexts with scripted backends.
static HAPTIC_CONTEXT: Lazy<HapticContext> = Lazy::new(|| {
    crate::init_logging();
    HapticContext::new()
});

/// Get the version of the haptic bridge core
///
/// # Returns
///
/// * `Result<String>` - Version string
#[flutter_rust_bridge::frb(sync)]
pub fn get_version() -> Result<String> {
    Ok(env!("CARGO_PKG_VERSION").to_string())
}

/// Get a human-readable platform description
///
/// # Returns
///
/// * `Result<String>` - OS and architecture, e.g. "linux x86_64"
#[flutter_rust_bridge::frb(sync)]
pub fn get_platform_version() -> Result<String> {
    Ok(format!(
        "{} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    ))
}

/// Whether the device has a controllable haptic actuator
///
/// Pure capability read; never mutates engine state and is safe to call
/// before the engine exists. Callers are expected to branch on this before
/// attempting playback, but nothing is enforced - playback against an
/// unsupported device fails explicitly.
#[flutter_rust_bridge::frb(sync)]
pub fn supports_haptics() -> bool {
    HAPTIC_CONTEXT.supports_haptics()
}

/// Start the haptic engine
///
/// Constructs the engine handle on first use and starts it. No-op when the
/// engine is already running.
///
/// # Returns
/// * `Ok(())` - Engine started
/// * `Err(EngineError)` - Unsupported device, hardware failure, or lock
///   poisoning
#[flutter_rust_bridge::frb]
pub fn start_engine() -> Result<(), EngineError> {
    HAPTIC_CONTEXT.start_engine()
}

/// Stop the haptic engine
///
/// Safe to call even if the engine was never started. Anything currently
/// playing is truncated.
///
/// # Returns
/// * `Ok(())` - Engine stopped or was never started
/// * `Err(EngineError)` - Hardware failure or lock poisoning
#[flutter_rust_bridge::frb]
pub fn stop_engine() -> Result<(), EngineError> {
    HAPTIC_CONTEXT.stop_engine()
}

/// The engine's absolute clock in seconds
///
/// Returns `0.0` whenever the engine is not running. Never fails.
#[flutter_rust_bridge::frb(sync)]
pub fn current_time() -> f64 {
    HAPTIC_CONTEXT.current_time()
}

/// Play a pattern built on the Dart side
///
/// Validates the request through the event constructors, auto-starts the
/// engine if needed, and returns once playback is scheduled.
///
/// # Returns
/// * `Ok(())` - Playback scheduled
/// * `Err(EngineError)` - Validation, capability, hardware, or playback
///   failure
#[flutter_rust_bridge::frb]
pub fn play(pattern: PatternRequest) -> Result<(), EngineError> {
    let pattern = HapticPattern::try_from(pattern).map_err(EngineError::from)?;
    HAPTIC_CONTEXT.play(&pattern)
}

/// Play a pattern from its JSON wire form
///
/// The payload follows the `{"Pattern": [...]}` grammar. Unrecognized
/// event types are dropped or rejected according to the configured parse
/// mode.
#[flutter_rust_bridge::frb]
pub fn play_from_json(json: String) -> Result<(), EngineError> {
    HAPTIC_CONTEXT.play_json(&json)
}

/// Play a pattern from an opaque byte buffer
///
/// The buffer is interpreted as a raw UTF-8 JSON payload equivalent to
/// [`play_from_json`].
#[flutter_rust_bridge::frb]
pub fn play_from_bytes(data: Vec<u8>) -> Result<(), EngineError> {
    HAPTIC_CONTEXT.play_bytes(&data)
}

/// Stream of session events
///
/// Yields engine lifecycle and playback results (started, stopped,
/// scheduled, failed, recovered) while the process lives. This is the
/// asynchronous completion/failure channel for fire-and-trigger playback.
#[flutter_rust_bridge::frb(ignore)]
pub async fn session_events_stream() -> impl futures::Stream<Item = SessionEvent> {
    HAPTIC_CONTEXT.events_stream()
}

// Error code constant accessors for Dart/Flutter

/// Get EngineErrorCodes as a structured object with all error code constants
#[flutter_rust_bridge::frb(sync)]
pub fn get_engine_error_codes() -> EngineErrorCodes {
    EngineErrorCodes {}
}

/// Get PatternErrorCodes as a structured object with all error code constants
#[flutter_rust_bridge::frb(sync)]
pub fn get_pattern_error_codes() -> PatternErrorCodes {
    PatternErrorCodes {}
}

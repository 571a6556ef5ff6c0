//! Backend abstractions for the haptic engine core.

use tokio::sync::broadcast;

use crate::error::EngineError;
use crate::pattern::HapticEvent;

/// Asynchronous signal originating from the hardware layer.
///
/// Power mode changes, thermal events, and OS suspension can stop or reset
/// the engine outside of any call. The session subscribes once and performs
/// a best-effort restart on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    /// The engine stopped outside of any stop_engine call
    Stopped,
    /// The hardware subsystem reset and dropped all server-side state
    Reset,
}

/// Trait implemented by platform-specific haptic backends.
///
/// This is the opaque hardware collaborator: a capability query, engine
/// start/stop primitives, a clock read, and a one-shot player constructor.
/// `start` and `stop` must tolerate redundant calls.
pub trait HapticBackend: Send + Sync {
    /// Whether the device has a controllable haptic actuator. Pure read,
    /// safe to call before the engine exists.
    fn supports_haptics(&self) -> bool;

    fn start(&self) -> Result<(), EngineError>;

    fn stop(&self) -> Result<(), EngineError>;

    /// Engine's absolute clock in seconds; 0.0 when not running.
    fn current_time(&self) -> f64;

    /// Build a one-shot player for the full event list. Construction may be
    /// rejected by the hardware (pattern too dense, engine quota).
    fn prepare_player(&self, events: &[HapticEvent]) -> Result<Box<dyn HapticPlayer>, EngineError>;

    /// Subscribe to asynchronous stop/reset signals.
    fn subscribe_signals(&self) -> broadcast::Receiver<EngineSignal>;
}

/// A one-shot pattern player produced by [`HapticBackend::prepare_player`].
pub trait HapticPlayer: Send {
    /// Start playback at `at_time` seconds relative to now (0.0 = immediately).
    /// Returns once playback is scheduled, not once it completes.
    fn start(&self, at_time: f64) -> Result<(), EngineError>;
}

mod stub;
pub use stub::{ScheduledPlayback, StubBackend};

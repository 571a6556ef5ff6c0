// HapticContext: Dependency injection container
//
// Single construction point for the engine session and its platform
// backend. The FFI layer holds exactly one of these; tests build their own
// with a scripted backend.

use std::sync::Arc;

use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::AppConfig;
use crate::engine::backend::{HapticBackend, StubBackend};
use crate::engine::{EngineState, HapticSession, SessionEvent};
use crate::error::EngineError;
use crate::pattern::HapticPattern;

/// Owns the single engine session and wires configuration to it.
///
/// Callers obtain the session's operations from here rather than from any
/// ambient global; the one process-wide instance lives at the FFI boundary
/// in `api`.
pub struct HapticContext {
    session: HapticSession,
}

impl HapticContext {
    /// Create a context with platform defaults.
    pub fn new() -> Self {
        let config = Self::load_platform_config();
        let backend = Self::create_backend(&config);
        Self::with_backend(backend, &config)
    }

    /// Create a context around an injected backend.
    ///
    /// This is the seam hosting applications and tests use to supply a real
    /// platform backend or a scripted double.
    pub fn with_backend(backend: Arc<dyn HapticBackend>, config: &AppConfig) -> Self {
        Self {
            session: HapticSession::new(backend, config),
        }
    }

    fn load_platform_config() -> AppConfig {
        #[cfg(target_os = "android")]
        {
            AppConfig::load_android()
        }

        #[cfg(not(target_os = "android"))]
        {
            AppConfig::load()
        }
    }

    /// Default backend wiring.
    ///
    /// Real actuator backends implement [`HapticBackend`] on the platform
    /// side; out of the box the deterministic stub stands in so desktop
    /// builds and the test suite run without hardware.
    fn create_backend(_config: &AppConfig) -> Arc<dyn HapticBackend> {
        Arc::new(StubBackend::new())
    }

    // ========================================================================
    // ENGINE SESSION DELEGATIONS
    // ========================================================================

    pub fn supports_haptics(&self) -> bool {
        self.session.supports_haptics()
    }

    pub fn start_engine(&self) -> Result<(), EngineError> {
        self.session.start_engine()
    }

    pub fn stop_engine(&self) -> Result<(), EngineError> {
        self.session.stop_engine()
    }

    pub fn current_time(&self) -> f64 {
        self.session.current_time()
    }

    pub fn play(&self, pattern: &HapticPattern) -> Result<(), EngineError> {
        self.session.play(pattern)
    }

    pub fn play_json(&self, json: &str) -> Result<(), EngineError> {
        self.session.play_json(json)
    }

    pub fn play_bytes(&self, data: &[u8]) -> Result<(), EngineError> {
        self.session.play_bytes(data)
    }

    pub fn engine_state(&self) -> EngineState {
        self.session.state()
    }

    // ========================================================================
    // STREAM SUBSCRIPTIONS
    // ========================================================================

    /// Forward session events into an unbounded channel.
    ///
    /// Runs the forwarder on a dedicated thread with its own runtime so
    /// subscription works regardless of which runtime (if any) the caller
    /// holds.
    pub fn subscribe_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut broadcast_rx = self.session.subscribe_events();

        std::thread::spawn(move || {
            let rt = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime");
            rt.block_on(async move {
                while let Ok(event) = broadcast_rx.recv().await {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            });
        });

        rx
    }

    /// Session events as a stream, for the FFI layer.
    pub fn events_stream(&self) -> impl futures::Stream<Item = SessionEvent> {
        UnboundedReceiverStream::new(self.subscribe_events())
    }
}

impl Default for HapticContext {
    fn default() -> Self {
        Self::new()
    }
}

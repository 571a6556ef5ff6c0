// HapticSession: lifecycle owner for the hardware haptic engine handle
//
// Exactly one logical owner mutates engine lifecycle state. Playback is
// fire-and-trigger: play() returns once the hardware has accepted the
// schedule, not when the pattern finishes. The session subscribes to the
// backend's stop/reset signal channel once, at construction, and performs a
// single best-effort restart per signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::engine::backend::{EngineSignal, HapticBackend};
use crate::error::{log_engine_error, log_pattern_error, EngineError, PatternError};
use crate::pattern::{wire, HapticPattern, ParseMode};

/// Lifecycle state of the engine handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Engine handle never started
    Uninitialized,
    /// Engine running; clock is live
    Started,
    /// Engine stopped, by request or by a hardware signal
    Stopped,
    /// Last hardware start/stop attempt failed
    Errored,
}

/// Event published on the session's result channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub timestamp_ms: u64,
    pub kind: SessionEventKind,
    pub detail: Option<String>,
}

/// Types of session events supported by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    EngineStarted,
    EngineStopped,
    PlaybackScheduled { event_count: usize },
    PlaybackFailed,
    EngineRecovered,
    RecoveryFailed,
}

/// Stateful wrapper around one hardware haptic engine handle.
///
/// All state lives behind the injected backend and a single mutex; the
/// session carries no ambient globals. Concurrent `play` calls are not
/// queued here — interleaving of simultaneously scheduled patterns is
/// hardware-defined.
pub struct HapticSession {
    backend: Arc<dyn HapticBackend>,
    state: Arc<Mutex<EngineState>>,
    events_tx: broadcast::Sender<SessionEvent>,
    recovery_started: AtomicBool,
    start_instant: Instant,
    parse_mode: ParseMode,
}

impl HapticSession {
    /// Create a session around `backend`, configured per `config`.
    ///
    /// Subscribes to the backend signal channel immediately (unless
    /// `engine.auto_recover` is off); the recovery worker runs on a
    /// dedicated thread with its own runtime so no caller runtime is
    /// required.
    pub fn new(backend: Arc<dyn HapticBackend>, config: &AppConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.engine.event_channel_capacity);
        let session = Self {
            backend,
            state: Arc::new(Mutex::new(EngineState::Uninitialized)),
            events_tx,
            recovery_started: AtomicBool::new(false),
            start_instant: Instant::now(),
            parse_mode: config.parser.mode(),
        };
        if config.engine.auto_recover {
            session.spawn_recovery_worker();
        }
        session
    }

    /// Capability query; pure read, never mutates state, safe before the
    /// engine exists.
    pub fn supports_haptics(&self) -> bool {
        self.backend.supports_haptics()
    }

    /// Start the hardware engine (construct once, reuse).
    ///
    /// No-op when already started.
    ///
    /// # Errors
    /// - `Unsupported` when the capability query is false
    /// - `HardwareFailure` on backend start failure (state goes `Errored`)
    /// - `LockPoisoned` on state lock poisoning
    pub fn start_engine(&self) -> Result<(), EngineError> {
        let mut state = self.lock_state().map_err(|err| {
            log_engine_error(&err, "start_engine");
            err
        })?;
        self.start_locked(&mut state).map_err(|err| {
            log_engine_error(&err, "start_engine");
            err
        })
    }

    /// Stop the hardware engine. No-op if it was never started.
    ///
    /// Anything currently playing is silently truncated by the hardware.
    ///
    /// # Errors
    /// - `HardwareFailure` on backend stop failure (state goes `Errored`)
    /// - `LockPoisoned` on state lock poisoning
    pub fn stop_engine(&self) -> Result<(), EngineError> {
        let mut state = self.lock_state().map_err(|err| {
            log_engine_error(&err, "stop_engine");
            err
        })?;

        if *state == EngineState::Uninitialized {
            return Ok(());
        }

        self.backend.stop().map_err(|err| {
            *state = EngineState::Errored;
            log_engine_error(&err, "stop_engine");
            err
        })?;

        *state = EngineState::Stopped;
        self.emit_event(SessionEventKind::EngineStopped, None);
        Ok(())
    }

    /// Engine's absolute clock in seconds while started, else `0.0`.
    /// Never fails; lock poisoning degrades to `0.0`.
    pub fn current_time(&self) -> f64 {
        match self.state.lock() {
            Ok(state) if *state == EngineState::Started => self.backend.current_time(),
            Ok(_) => 0.0,
            Err(_) => {
                log::error!("[HapticSession] State lock poisoned; reporting time 0.0");
                0.0
            }
        }
    }

    /// Schedule a pattern for immediate playback (relative time zero = now).
    ///
    /// Auto-starts the engine when it is not running; a failed auto-start
    /// fails the call with the same error `start_engine` would produce. An
    /// empty pattern is a valid no-op schedule that never reaches the
    /// player constructor. Returns once playback is scheduled — this is
    /// fire-and-trigger, not fire-and-wait.
    ///
    /// # Errors
    /// - `Unsupported` / `HardwareFailure` from the auto-start path
    /// - `PlaybackFailed` when the hardware rejects the player
    /// - `LockPoisoned` on state lock poisoning
    pub fn play(&self, pattern: &HapticPattern) -> Result<(), EngineError> {
        let result = self.play_inner(pattern);
        if let Err(ref err) = result {
            log_engine_error(err, "play");
            self.emit_event(SessionEventKind::PlaybackFailed, Some(err.to_string()));
        }
        result
    }

    /// Parse a wire JSON payload with the session's parse mode, then play it.
    pub fn play_json(&self, json: &str) -> Result<(), EngineError> {
        let pattern = wire::deserialize(json, self.parse_mode).map_err(|err| {
            log_pattern_error(&err, "play_json");
            let err = EngineError::from(err);
            self.emit_event(SessionEventKind::PlaybackFailed, Some(err.to_string()));
            err
        })?;
        self.play(&pattern)
    }

    /// Play an opaque byte buffer, defined as a raw UTF-8 JSON payload
    /// equivalent to [`play_json`](Self::play_json).
    pub fn play_bytes(&self, data: &[u8]) -> Result<(), EngineError> {
        let json = std::str::from_utf8(data).map_err(|utf8_err| {
            let err = PatternError::InvalidJson {
                reason: format!("payload is not UTF-8: {}", utf8_err),
            };
            log_pattern_error(&err, "play_bytes");
            let err = EngineError::from(err);
            self.emit_event(SessionEventKind::PlaybackFailed, Some(err.to_string()));
            err
        })?;
        self.play_json(json)
    }

    /// Subscribe to the session's result channel.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Current lifecycle state; poisoning reads as `Errored`.
    pub fn state(&self) -> EngineState {
        self.state
            .lock()
            .map(|guard| *guard)
            .unwrap_or(EngineState::Errored)
    }

    // ========================================================================
    // PRIVATE HELPERS
    // ========================================================================

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, EngineState>, EngineError> {
        self.state.lock().map_err(|_| EngineError::LockPoisoned {
            component: "engine_state".to_string(),
        })
    }

    /// Start path shared by `start_engine` and the `play` auto-start.
    fn start_locked(&self, state: &mut EngineState) -> Result<(), EngineError> {
        if *state == EngineState::Started {
            return Ok(());
        }
        if !self.backend.supports_haptics() {
            return Err(EngineError::Unsupported);
        }
        match self.backend.start() {
            Ok(()) => {
                *state = EngineState::Started;
                self.emit_event(SessionEventKind::EngineStarted, None);
                Ok(())
            }
            Err(err) => {
                *state = EngineState::Errored;
                Err(err)
            }
        }
    }

    fn play_inner(&self, pattern: &HapticPattern) -> Result<(), EngineError> {
        {
            let mut state = self.lock_state()?;
            self.start_locked(&mut state)?;
        }

        if pattern.is_empty() {
            // Valid no-op schedule; the player constructor is not invoked.
            self.emit_event(SessionEventKind::PlaybackScheduled { event_count: 0 }, None);
            return Ok(());
        }

        // The state lock is released here on purpose: playback requests are
        // serialized by the hardware layer, not by this session.
        let player = self.backend.prepare_player(pattern.events())?;
        player.start(0.0)?;

        self.emit_event(
            SessionEventKind::PlaybackScheduled {
                event_count: pattern.len(),
            },
            None,
        );
        Ok(())
    }

    fn emit_event(&self, kind: SessionEventKind, detail: Option<String>) {
        Self::publish_event(&self.events_tx, self.start_instant, kind, detail);
    }

    fn publish_event(
        tx: &broadcast::Sender<SessionEvent>,
        start_instant: Instant,
        kind: SessionEventKind,
        detail: Option<String>,
    ) {
        let timestamp_ms = start_instant.elapsed().as_millis() as u64;
        let _ = tx.send(SessionEvent {
            timestamp_ms,
            kind,
            detail,
        });
    }

    /// Subscribe to backend stop/reset signals and restart once per signal.
    ///
    /// Runs on a dedicated thread with its own Tokio runtime because the
    /// Flutter Rust Bridge may not have a runtime available when the
    /// session is constructed. The worker holds only weak references so a
    /// dropped session is not kept alive by its own recovery loop.
    fn spawn_recovery_worker(&self) {
        if self
            .recovery_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let mut signal_rx = self.backend.subscribe_signals();
        let weak_backend: Weak<dyn HapticBackend> = Arc::downgrade(&self.backend);
        let weak_state = Arc::downgrade(&self.state);
        let events_tx = self.events_tx.clone();
        let start_instant = self.start_instant;

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime for recovery worker");

            rt.block_on(async move {
                loop {
                    let signal = match signal_rx.recv().await {
                        Ok(signal) => signal,
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            log::warn!(
                                "[HapticSession] Recovery worker lagged, {} signals missed",
                                missed
                            );
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    };

                    let (Some(backend), Some(state)) =
                        (weak_backend.upgrade(), weak_state.upgrade())
                    else {
                        break;
                    };

                    Self::handle_signal(signal, &backend, &state, &events_tx, start_instant);
                }
            });
        });
    }

    /// Best-effort restart after an asynchronous engine stop/reset. A failed
    /// restart surfaces no error here; the next explicit call observes the
    /// state and reports.
    fn handle_signal(
        signal: EngineSignal,
        backend: &Arc<dyn HapticBackend>,
        state: &Arc<Mutex<EngineState>>,
        events_tx: &broadcast::Sender<SessionEvent>,
        start_instant: Instant,
    ) {
        log::warn!(
            "[HapticSession] Engine signal {:?} from hardware layer; attempting restart",
            signal
        );

        let Ok(mut state) = state.lock() else {
            log::error!("[HapticSession] State lock poisoned during recovery");
            return;
        };
        *state = EngineState::Stopped;

        match backend.start() {
            Ok(()) => {
                *state = EngineState::Started;
                Self::publish_event(
                    events_tx,
                    start_instant,
                    SessionEventKind::EngineRecovered,
                    None,
                );
            }
            Err(err) => {
                *state = EngineState::Errored;
                log_engine_error(&err, "recovery_worker");
                Self::publish_event(
                    events_tx,
                    start_instant,
                    SessionEventKind::RecoveryFailed,
                    Some(err.to_string()),
                );
            }
        }
    }
}

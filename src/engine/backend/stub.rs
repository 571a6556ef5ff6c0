use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::broadcast;

use crate::error::EngineError;
use crate::pattern::HapticEvent;

use super::{EngineSignal, HapticBackend, HapticPlayer};

/// One playback request the stub accepted, as the hardware would see it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPlayback {
    pub at_time: f64,
    pub events: Vec<HapticEvent>,
}

/// Deterministic stub backend used for testing and desktop runs.
///
/// Simulates the engine lifecycle without real actuator I/O: records every
/// scheduled playback, runs a wall-clock engine timer, and lets tests
/// script the next failure or emit hardware signals.
pub struct StubBackend {
    supported: bool,
    running: AtomicBool,
    started_at: Mutex<Option<Instant>>,
    fail_next_start: Mutex<Option<String>>,
    fail_next_stop: Mutex<Option<String>>,
    fail_next_player: Mutex<Option<String>>,
    scheduled: Arc<Mutex<Vec<ScheduledPlayback>>>,
    signal_tx: broadcast::Sender<EngineSignal>,
}

impl StubBackend {
    pub fn new() -> Self {
        let (signal_tx, _) = broadcast::channel(16);
        Self {
            supported: true,
            running: AtomicBool::new(false),
            started_at: Mutex::new(None),
            fail_next_start: Mutex::new(None),
            fail_next_stop: Mutex::new(None),
            fail_next_player: Mutex::new(None),
            scheduled: Arc::new(Mutex::new(Vec::new())),
            signal_tx,
        }
    }

    /// A stub reporting no haptic actuator, for capability-gating tests.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Script the next `start` call to fail with `reason`.
    pub fn fail_next_start(&self, reason: &str) {
        *self.fail_next_start.lock().unwrap() = Some(reason.to_string());
    }

    /// Script the next `stop` call to fail with `reason`.
    pub fn fail_next_stop(&self, reason: &str) {
        *self.fail_next_stop.lock().unwrap() = Some(reason.to_string());
    }

    /// Script the next `prepare_player` call to fail with `reason`.
    pub fn fail_next_player(&self, reason: &str) {
        *self.fail_next_player.lock().unwrap() = Some(reason.to_string());
    }

    /// Simulate an asynchronous hardware stop/reset. The engine timer is
    /// cleared first, as the real subsystem would have already halted.
    pub fn emit_signal(&self, signal: EngineSignal) {
        self.running.store(false, Ordering::SeqCst);
        *self.started_at.lock().unwrap() = None;
        let _ = self.signal_tx.send(signal);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Every playback accepted so far, in scheduling order.
    pub fn scheduled_playbacks(&self) -> Vec<ScheduledPlayback> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HapticBackend for StubBackend {
    fn supports_haptics(&self) -> bool {
        self.supported
    }

    fn start(&self) -> Result<(), EngineError> {
        if let Some(reason) = self.fail_next_start.lock().unwrap().take() {
            return Err(EngineError::HardwareFailure { reason });
        }
        // Redundant starts are tolerated; the timer keeps its origin.
        if !self.running.swap(true, Ordering::SeqCst) {
            *self.started_at.lock().unwrap() = Some(Instant::now());
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        if let Some(reason) = self.fail_next_stop.lock().unwrap().take() {
            return Err(EngineError::HardwareFailure { reason });
        }
        self.running.store(false, Ordering::SeqCst);
        *self.started_at.lock().unwrap() = None;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        if !self.running.load(Ordering::SeqCst) {
            return 0.0;
        }
        self.started_at
            .lock()
            .unwrap()
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn prepare_player(&self, events: &[HapticEvent]) -> Result<Box<dyn HapticPlayer>, EngineError> {
        if let Some(reason) = self.fail_next_player.lock().unwrap().take() {
            return Err(EngineError::PlaybackFailed { reason });
        }
        Ok(Box::new(StubPlayer {
            events: events.to_vec(),
            sink: Arc::clone(&self.scheduled),
        }))
    }

    fn subscribe_signals(&self) -> broadcast::Receiver<EngineSignal> {
        self.signal_tx.subscribe()
    }
}

struct StubPlayer {
    events: Vec<HapticEvent>,
    sink: Arc<Mutex<Vec<ScheduledPlayback>>>,
}

impl HapticPlayer for StubPlayer {
    fn start(&self, at_time: f64) -> Result<(), EngineError> {
        self.sink.lock().unwrap().push(ScheduledPlayback {
            at_time,
            events: self.events.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_lifecycle() {
        let backend = StubBackend::new();
        assert!(backend.supports_haptics());
        assert!(!backend.is_running());

        backend.start().unwrap();
        assert!(backend.is_running());

        // Redundant start is a no-op
        backend.start().unwrap();
        assert!(backend.is_running());

        backend.stop().unwrap();
        assert!(!backend.is_running());

        // Redundant stop is a no-op
        backend.stop().unwrap();
    }

    #[test]
    fn test_stub_clock_zero_when_stopped() {
        let backend = StubBackend::new();
        assert_eq!(backend.current_time(), 0.0);

        backend.start().unwrap();
        assert!(backend.current_time() >= 0.0);

        backend.stop().unwrap();
        assert_eq!(backend.current_time(), 0.0);
    }

    #[test]
    fn test_stub_records_playbacks() {
        let backend = StubBackend::new();
        let events = vec![crate::pattern::HapticEvent::transient(0.0, 1.0, 0.5).unwrap()];

        let player = backend.prepare_player(&events).unwrap();
        player.start(0.0).unwrap();

        let scheduled = backend.scheduled_playbacks();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].at_time, 0.0);
        assert_eq!(scheduled[0].events, events);
    }

    #[test]
    fn test_stub_scripted_failures() {
        let backend = StubBackend::new();

        backend.fail_next_start("busy");
        assert!(matches!(
            backend.start().unwrap_err(),
            EngineError::HardwareFailure { reason } if reason == "busy"
        ));
        // Failure is one-shot
        backend.start().unwrap();

        backend.fail_next_player("quota");
        assert!(backend.prepare_player(&[]).is_err());
        assert!(backend.prepare_player(&[]).is_ok());
    }

    #[test]
    fn test_stub_signal_clears_running() {
        let backend = StubBackend::new();
        backend.start().unwrap();

        let mut rx = backend.subscribe_signals();
        backend.emit_signal(EngineSignal::Reset);

        assert!(!backend.is_running());
        assert_eq!(rx.try_recv().unwrap(), EngineSignal::Reset);
    }
}

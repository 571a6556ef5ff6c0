//! Engine session: lifecycle management for the hardware haptic engine.

pub mod backend;
mod session;

pub use session::{EngineState, HapticSession, SessionEvent, SessionEventKind};

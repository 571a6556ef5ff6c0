// Preset pattern factories
//
// Pure functions producing the stock patterns the bridge ships with. All
// offsets are fixed literals; intensity and sharpness are caller-supplied
// and validated by the event constructors.

use crate::error::PatternError;
use crate::pattern::{HapticEvent, HapticPattern};

/// Delay between the two taps of [`double_tap`] when none is given
pub const DEFAULT_DOUBLE_TAP_DELAY: f64 = 0.1;

/// Intensity scale applied to the second beat of each heartbeat pair
const HEARTBEAT_SECONDARY_SCALE: f64 = 0.7;

/// Single transient tap at pattern start
pub fn tap(intensity: f64, sharpness: f64) -> Result<HapticPattern, PatternError> {
    Ok(HapticPattern::from_events(vec![HapticEvent::transient(
        0.0, intensity, sharpness,
    )?]))
}

/// Two identical taps separated by `delay` seconds
///
/// Pass [`DEFAULT_DOUBLE_TAP_DELAY`] for the stock spacing.
pub fn double_tap(
    intensity: f64,
    sharpness: f64,
    delay: f64,
) -> Result<HapticPattern, PatternError> {
    Ok(HapticPattern::from_events(vec![
        HapticEvent::transient(0.0, intensity, sharpness)?,
        HapticEvent::transient(delay, intensity, sharpness)?,
    ]))
}

/// Two beat pairs, the second beat of each pair softened
///
/// Lub-dub at 0/0.05s, repeated at 0.8/0.85s.
pub fn heartbeat(intensity: f64, sharpness: f64) -> Result<HapticPattern, PatternError> {
    let soft = intensity * HEARTBEAT_SECONDARY_SCALE;
    Ok(HapticPattern::from_events(vec![
        HapticEvent::transient(0.0, intensity, sharpness)?,
        HapticEvent::transient(0.05, soft, sharpness)?,
        HapticEvent::transient(0.8, intensity, sharpness)?,
        HapticEvent::transient(0.85, soft, sharpness)?,
    ]))
}

/// One sustained event of `duration` seconds starting immediately
pub fn continuous_buzz(
    duration: f64,
    intensity: f64,
    sharpness: f64,
) -> Result<HapticPattern, PatternError> {
    Ok(HapticPattern::from_events(vec![HapticEvent::continuous(
        0.0, duration, intensity, sharpness,
    )?]))
}

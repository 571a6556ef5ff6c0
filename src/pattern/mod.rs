// Haptic pattern model
//
// In-memory representation of a timed sequence of haptic events. Patterns
// are value objects: built once through validating constructors, then
// immutable. The JSON wire format lives in `wire`, preset factories in
// `presets`.

pub mod presets;
pub mod wire;

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

pub use wire::{deserialize, serialize, ParseMode};

/// Intensity applied when a wire event carries no HapticIntensity parameter
pub const DEFAULT_INTENSITY: f64 = 1.0;

/// Sharpness applied when a wire event carries no HapticSharpness parameter
pub const DEFAULT_SHARPNESS: f64 = 0.5;

/// Kind of haptic stimulus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticEventKind {
    /// Brief, impulse-like stimulus with no meaningful duration
    Transient,
    /// Sustained stimulus with an explicit duration
    Continuous,
}

/// One scheduled haptic stimulus
///
/// Fields are validated at construction: `time` is finite and non-negative,
/// `intensity` and `sharpness` are within [0.0, 1.0] inclusive, and a
/// continuous event carries a finite, strictly positive `duration`.
/// Violating values fail construction; nothing is clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct HapticEvent {
    kind: HapticEventKind,
    time: f64,
    intensity: f64,
    sharpness: f64,
    duration: Option<f64>,
}

impl HapticEvent {
    /// Create a transient event at `time` seconds from pattern start
    ///
    /// # Errors
    /// - `InvalidTime` if `time` is negative or not finite
    /// - `InvalidIntensity` / `InvalidSharpness` if outside [0.0, 1.0]
    pub fn transient(time: f64, intensity: f64, sharpness: f64) -> Result<Self, PatternError> {
        Self::validate_common(time, intensity, sharpness)?;
        Ok(Self {
            kind: HapticEventKind::Transient,
            time,
            intensity,
            sharpness,
            duration: None,
        })
    }

    /// Create a continuous event lasting `duration` seconds
    ///
    /// # Errors
    /// - `InvalidDuration` if `duration` is zero, negative, or not finite,
    ///   additionally to the transient constraints
    pub fn continuous(
        time: f64,
        duration: f64,
        intensity: f64,
        sharpness: f64,
    ) -> Result<Self, PatternError> {
        Self::validate_common(time, intensity, sharpness)?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(PatternError::InvalidDuration { value: duration });
        }
        Ok(Self {
            kind: HapticEventKind::Continuous,
            time,
            intensity,
            sharpness,
            duration: Some(duration),
        })
    }

    fn validate_common(time: f64, intensity: f64, sharpness: f64) -> Result<(), PatternError> {
        if !time.is_finite() || time < 0.0 {
            return Err(PatternError::InvalidTime { time });
        }
        // RangeInclusive::contains rejects NaN as well
        if !(0.0..=1.0).contains(&intensity) {
            return Err(PatternError::InvalidIntensity { value: intensity });
        }
        if !(0.0..=1.0).contains(&sharpness) {
            return Err(PatternError::InvalidSharpness { value: sharpness });
        }
        Ok(())
    }

    pub fn kind(&self) -> HapticEventKind {
        self.kind
    }

    /// Offset in seconds from pattern start
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }

    /// Duration in seconds; `Some` only for continuous events
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }
}

/// An ordered, time-stamped collection of haptic events forming one
/// playable unit
///
/// Insertion order is preserved and defines replay order for events with
/// strictly increasing `time`; simultaneous `time` values are scheduled in
/// hardware-defined order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HapticPattern {
    events: Vec<HapticEvent>,
}

impl HapticPattern {
    /// Build a pattern from an explicit event list
    pub fn from_events(events: Vec<HapticEvent>) -> Self {
        Self { events }
    }

    /// An empty pattern; valid, plays nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HapticEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize to the JSON wire format
    pub fn to_json(&self) -> Result<String, PatternError> {
        wire::serialize(self)
    }

    /// Parse from the JSON wire format
    pub fn from_json(json: &str, mode: ParseMode) -> Result<Self, PatternError> {
        wire::deserialize(json, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_construction() {
        let event = HapticEvent::transient(0.5, 0.8, 0.6).unwrap();
        assert_eq!(event.kind(), HapticEventKind::Transient);
        assert_eq!(event.time(), 0.5);
        assert_eq!(event.intensity(), 0.8);
        assert_eq!(event.sharpness(), 0.6);
        assert_eq!(event.duration(), None);
    }

    #[test]
    fn test_continuous_construction() {
        let event = HapticEvent::continuous(0.0, 1.5, 1.0, 0.5).unwrap();
        assert_eq!(event.kind(), HapticEventKind::Continuous);
        assert_eq!(event.duration(), Some(1.5));
    }

    #[test]
    fn test_intensity_bounds_inclusive() {
        assert!(HapticEvent::transient(0.0, 0.0, 0.5).is_ok());
        assert!(HapticEvent::transient(0.0, 1.0, 0.5).is_ok());
        assert!(matches!(
            HapticEvent::transient(0.0, -0.01, 0.5),
            Err(PatternError::InvalidIntensity { .. })
        ));
        assert!(matches!(
            HapticEvent::transient(0.0, 1.01, 0.5),
            Err(PatternError::InvalidIntensity { .. })
        ));
    }

    #[test]
    fn test_sharpness_bounds_inclusive() {
        assert!(HapticEvent::transient(0.0, 1.0, 0.0).is_ok());
        assert!(HapticEvent::transient(0.0, 1.0, 1.0).is_ok());
        assert!(matches!(
            HapticEvent::transient(0.0, 1.0, -0.01),
            Err(PatternError::InvalidSharpness { .. })
        ));
        assert!(matches!(
            HapticEvent::transient(0.0, 1.0, 1.01),
            Err(PatternError::InvalidSharpness { .. })
        ));
    }

    #[test]
    fn test_negative_time_rejected() {
        assert!(matches!(
            HapticEvent::transient(-0.1, 1.0, 0.5),
            Err(PatternError::InvalidTime { .. })
        ));
        assert!(HapticEvent::transient(0.0, 1.0, 0.5).is_ok());
    }

    #[test]
    fn test_duration_must_be_positive() {
        assert!(matches!(
            HapticEvent::continuous(0.0, 0.0, 1.0, 0.5),
            Err(PatternError::InvalidDuration { .. })
        ));
        assert!(matches!(
            HapticEvent::continuous(0.0, -1.0, 1.0, 0.5),
            Err(PatternError::InvalidDuration { .. })
        ));
        assert!(HapticEvent::continuous(0.0, 0.001, 1.0, 0.5).is_ok());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(HapticEvent::transient(f64::NAN, 1.0, 0.5).is_err());
        assert!(HapticEvent::transient(f64::INFINITY, 1.0, 0.5).is_err());
        assert!(HapticEvent::transient(0.0, f64::NAN, 0.5).is_err());
        assert!(HapticEvent::continuous(0.0, f64::NAN, 1.0, 0.5).is_err());
        assert!(HapticEvent::continuous(0.0, f64::INFINITY, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_pattern_preserves_insertion_order() {
        let events = vec![
            HapticEvent::transient(0.2, 1.0, 0.5).unwrap(),
            HapticEvent::transient(0.0, 0.5, 0.5).unwrap(),
        ];
        let pattern = HapticPattern::from_events(events.clone());
        assert_eq!(pattern.events(), events.as_slice());
        assert_eq!(pattern.len(), 2);
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = HapticPattern::empty();
        assert!(pattern.is_empty());
        assert_eq!(pattern.len(), 0);
    }
}

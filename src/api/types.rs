use crate::error::PatternError;
use crate::pattern::{HapticEvent, HapticEventKind, HapticPattern};

/// Event description accepted over the bridge
///
/// Mirrors [`HapticEvent`] without its construction invariants; validation
/// happens when the request is converted through the event constructors.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EventRequest {
    pub kind: HapticEventKind,
    /// Offset in seconds from pattern start
    pub time: f64,
    /// Perceived strength, [0.0, 1.0]
    pub intensity: f64,
    /// Perceived crispness, [0.0, 1.0]
    pub sharpness: f64,
    /// Seconds; required for continuous events, ignored for transients
    pub duration: Option<f64>,
}

/// Pattern description accepted over the bridge
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PatternRequest {
    pub events: Vec<EventRequest>,
}

impl TryFrom<EventRequest> for HapticEvent {
    type Error = PatternError;

    fn try_from(request: EventRequest) -> Result<Self, Self::Error> {
        match request.kind {
            HapticEventKind::Transient => {
                HapticEvent::transient(request.time, request.intensity, request.sharpness)
            }
            HapticEventKind::Continuous => {
                let duration = request.duration.ok_or(PatternError::MissingDuration)?;
                HapticEvent::continuous(
                    request.time,
                    duration,
                    request.intensity,
                    request.sharpness,
                )
            }
        }
    }
}

impl TryFrom<PatternRequest> for HapticPattern {
    type Error = PatternError;

    fn try_from(request: PatternRequest) -> Result<Self, Self::Error> {
        let events = request
            .events
            .into_iter()
            .map(HapticEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HapticPattern::from_events(events))
    }
}

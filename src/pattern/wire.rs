// JSON wire format for haptic patterns
//
// The grammar is a root object with a single `Pattern` key holding an
// ordered array of event objects:
//
// {
//   "Pattern": [
//     {
//       "EventType": "HapticTransient" | "HapticContinuous",
//       "Time": <number >= 0>,
//       "EventDuration": <number > 0>,      // continuous only
//       "EventParameters": [
//         {"ParameterID": "HapticIntensity", "ParameterValue": <number 0..1>},
//         {"ParameterID": "HapticSharpness", "ParameterValue": <number 0..1>}
//       ]
//     }, ...
//   ]
// }
//
// Parsing goes through strongly typed serde intermediates rather than
// dynamic dictionary lookups. Numeric values are read permissively (any
// JSON number); range validation then applies through the event
// constructors.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PatternError;
use crate::pattern::{
    HapticEvent, HapticEventKind, HapticPattern, DEFAULT_INTENSITY, DEFAULT_SHARPNESS,
};

const EVENT_TYPE_TRANSIENT: &str = "HapticTransient";
const EVENT_TYPE_CONTINUOUS: &str = "HapticContinuous";
const PARAM_ID_INTENSITY: &str = "HapticIntensity";
const PARAM_ID_SHARPNESS: &str = "HapticSharpness";

/// How the deserializer treats unrecognized wire vocabulary
///
/// The reference behavior drops unknown `EventType` entries instead of
/// failing; `Lenient` preserves that, `Strict` rejects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Skip unknown EventType entries and ParameterIDs with a log line
    #[default]
    Lenient,
    /// Fail on any unknown EventType or ParameterID
    Strict,
}

/// Root wire object; exactly one meaningful key
#[derive(Debug, Serialize, Deserialize)]
struct WirePattern {
    #[serde(rename = "Pattern")]
    pattern: Vec<WireEvent>,
}

/// One event object on the wire
///
/// `EventType`, `Time`, and `EventParameters` are required; a missing field
/// fails the whole parse. `EventDuration` is present only for continuous
/// events.
#[derive(Debug, Serialize, Deserialize)]
struct WireEvent {
    #[serde(rename = "EventType")]
    event_type: String,
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "EventDuration", skip_serializing_if = "Option::is_none")]
    event_duration: Option<f64>,
    #[serde(rename = "EventParameters")]
    event_parameters: Vec<WireParameter>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireParameter {
    #[serde(rename = "ParameterID")]
    parameter_id: String,
    #[serde(rename = "ParameterValue")]
    parameter_value: f64,
}

/// Serialize a pattern to its wire JSON string
///
/// Parameters are emitted in fixed order: HapticIntensity, then
/// HapticSharpness.
pub fn serialize(pattern: &HapticPattern) -> Result<String, PatternError> {
    let wire = WirePattern {
        pattern: pattern.events().iter().map(event_to_wire).collect(),
    };
    serde_json::to_string(&wire).map_err(PatternError::from)
}

/// Parse a wire JSON string into a pattern
///
/// # Errors
/// - `InvalidJson` when the payload is not JSON, the `Pattern` key is
///   missing or not an array, or an event object lacks a required field
/// - `UnknownEventType` / `UnknownParameter` in strict mode
/// - the event constructors' validation errors for out-of-range values
pub fn deserialize(json: &str, mode: ParseMode) -> Result<HapticPattern, PatternError> {
    let wire: WirePattern = serde_json::from_str(json)?;

    let mut events = Vec::with_capacity(wire.pattern.len());
    for wire_event in wire.pattern {
        if let Some(event) = event_from_wire(wire_event, mode)? {
            events.push(event);
        }
    }
    Ok(HapticPattern::from_events(events))
}

fn event_to_wire(event: &HapticEvent) -> WireEvent {
    let event_type = match event.kind() {
        HapticEventKind::Transient => EVENT_TYPE_TRANSIENT,
        HapticEventKind::Continuous => EVENT_TYPE_CONTINUOUS,
    };
    WireEvent {
        event_type: event_type.to_string(),
        time: event.time(),
        event_duration: event.duration(),
        event_parameters: vec![
            WireParameter {
                parameter_id: PARAM_ID_INTENSITY.to_string(),
                parameter_value: event.intensity(),
            },
            WireParameter {
                parameter_id: PARAM_ID_SHARPNESS.to_string(),
                parameter_value: event.sharpness(),
            },
        ],
    }
}

/// Convert one wire event; `Ok(None)` means the entry was dropped in
/// lenient mode.
fn event_from_wire(
    wire: WireEvent,
    mode: ParseMode,
) -> Result<Option<HapticEvent>, PatternError> {
    let kind = match wire.event_type.as_str() {
        EVENT_TYPE_TRANSIENT => HapticEventKind::Transient,
        EVENT_TYPE_CONTINUOUS => HapticEventKind::Continuous,
        other => match mode {
            ParseMode::Lenient => {
                warn!("[Wire] Dropping event with unrecognized EventType \"{}\"", other);
                return Ok(None);
            }
            ParseMode::Strict => {
                return Err(PatternError::UnknownEventType {
                    event_type: other.to_string(),
                })
            }
        },
    };

    let mut intensity = DEFAULT_INTENSITY;
    let mut sharpness = DEFAULT_SHARPNESS;
    for parameter in &wire.event_parameters {
        match parameter.parameter_id.as_str() {
            PARAM_ID_INTENSITY => intensity = parameter.parameter_value,
            PARAM_ID_SHARPNESS => sharpness = parameter.parameter_value,
            other => match mode {
                ParseMode::Lenient => {
                    debug!("[Wire] Ignoring unrecognized ParameterID \"{}\"", other);
                }
                ParseMode::Strict => {
                    return Err(PatternError::UnknownParameter {
                        id: other.to_string(),
                    })
                }
            },
        }
    }

    let event = match kind {
        HapticEventKind::Transient => HapticEvent::transient(wire.time, intensity, sharpness)?,
        HapticEventKind::Continuous => {
            let duration = wire.event_duration.ok_or(PatternError::MissingDuration)?;
            HapticEvent::continuous(wire.time, duration, intensity, sharpness)?
        }
    };
    Ok(Some(event))
}

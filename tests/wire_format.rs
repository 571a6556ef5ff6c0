//! Black-box conformance tests for the pattern JSON wire format
//!
//! Exercises the public grammar end to end: round-trips, required tokens,
//! lenient vs strict vocabulary handling, and the validation contract.

use haptic_bridge::error::PatternError;
use haptic_bridge::pattern::{
    deserialize, presets, serialize, HapticEvent, HapticEventKind, HapticPattern, ParseMode,
};

#[test]
fn round_trip_reconstructs_equal_events() {
    let pattern = HapticPattern::from_events(vec![
        HapticEvent::transient(0.0, 1.0, 0.5).unwrap(),
        HapticEvent::transient(0.1, 0.25, 0.75).unwrap(),
        HapticEvent::continuous(0.2, 3.0, 0.5, 0.0).unwrap(),
    ]);

    let json = serialize(&pattern).unwrap();
    let parsed = deserialize(&json, ParseMode::Strict).unwrap();

    assert_eq!(parsed.len(), pattern.len());
    for (parsed_event, original) in parsed.events().iter().zip(pattern.events()) {
        assert_eq!(parsed_event.kind(), original.kind());
        assert_eq!(parsed_event.time(), original.time());
        assert_eq!(parsed_event.intensity(), original.intensity());
        assert_eq!(parsed_event.sharpness(), original.sharpness());
        assert_eq!(parsed_event.duration(), original.duration());
    }
}

#[test]
fn presets_round_trip_through_wire() {
    for pattern in [
        presets::tap(0.8, 0.6).unwrap(),
        presets::double_tap(1.0, 0.5, 0.1).unwrap(),
        presets::heartbeat(1.0, 0.5).unwrap(),
        presets::continuous_buzz(1.5, 0.7, 0.3).unwrap(),
    ] {
        let json = pattern.to_json().unwrap();
        let parsed = HapticPattern::from_json(&json, ParseMode::Strict).unwrap();
        assert_eq!(parsed, pattern);
    }
}

#[test]
fn serialized_form_carries_expected_tokens() {
    let pattern = HapticPattern::from_events(vec![
        HapticEvent::transient(0.0, 1.0, 0.5).unwrap(),
        HapticEvent::continuous(0.5, 1.0, 1.0, 0.5).unwrap(),
    ]);
    let json = serialize(&pattern).unwrap();

    for token in [
        "\"HapticTransient\"",
        "\"HapticContinuous\"",
        "\"HapticIntensity\"",
        "\"HapticSharpness\"",
    ] {
        assert!(json.contains(token), "missing {} in {}", token, json);
    }
}

#[test]
fn hand_written_payload_parses() {
    // Shape a caller would produce by hand, integer numbers included
    let json = r#"{
        "Pattern": [
            {
                "EventType": "HapticTransient",
                "Time": 0,
                "EventParameters": [
                    {"ParameterID": "HapticIntensity", "ParameterValue": 0.8},
                    {"ParameterID": "HapticSharpness", "ParameterValue": 0.6}
                ]
            },
            {
                "EventType": "HapticContinuous",
                "Time": 0.5,
                "EventDuration": 1,
                "EventParameters": [
                    {"ParameterID": "HapticSharpness", "ParameterValue": 0.1},
                    {"ParameterID": "HapticIntensity", "ParameterValue": 0.2}
                ]
            }
        ]
    }"#;

    let pattern = deserialize(json, ParseMode::Strict).unwrap();
    assert_eq!(pattern.len(), 2);

    let transient = &pattern.events()[0];
    assert_eq!(transient.kind(), HapticEventKind::Transient);
    assert_eq!(transient.intensity(), 0.8);
    assert_eq!(transient.sharpness(), 0.6);

    // Parameter order on input is free; only output order is fixed
    let continuous = &pattern.events()[1];
    assert_eq!(continuous.kind(), HapticEventKind::Continuous);
    assert_eq!(continuous.duration(), Some(1.0));
    assert_eq!(continuous.intensity(), 0.2);
    assert_eq!(continuous.sharpness(), 0.1);
}

#[test]
fn unknown_event_type_is_dropped_not_fatal() {
    let json = r#"{"Pattern": [
        {"EventType": "HapticTransient", "Time": 0, "EventParameters": []},
        {"EventType": "Unknown", "Time": 1, "EventParameters": []}
    ]}"#;

    let pattern = deserialize(json, ParseMode::Lenient).unwrap();
    assert_eq!(pattern.len(), 1);

    let err = deserialize(json, ParseMode::Strict).unwrap_err();
    assert_eq!(
        err,
        PatternError::UnknownEventType {
            event_type: "Unknown".to_string()
        }
    );
}

#[test]
fn empty_pattern_is_valid() {
    let pattern = deserialize(r#"{"Pattern": []}"#, ParseMode::Strict).unwrap();
    assert!(pattern.is_empty());
}

#[test]
fn malformed_roots_are_fatal() {
    for payload in [
        "not json at all",
        "[]",
        "{}",
        r#"{"Pattern": 42}"#,
        r#"{"Pattern": [{"Time": 0, "EventParameters": []}]}"#,
    ] {
        let err = deserialize(payload, ParseMode::Lenient).unwrap_err();
        assert!(
            matches!(err, PatternError::InvalidJson { .. }),
            "payload {:?} should be InvalidJson, got {:?}",
            payload,
            err
        );
    }
}

#[test]
fn validation_contract_applies_on_the_wire() {
    let json = r#"{"Pattern": [{"EventType": "HapticContinuous", "Time": 0,
        "EventDuration": 0.0, "EventParameters": []}]}"#;
    assert!(matches!(
        deserialize(json, ParseMode::Lenient).unwrap_err(),
        PatternError::InvalidDuration { .. }
    ));

    let json = r#"{"Pattern": [{"EventType": "HapticTransient", "Time": -0.5,
        "EventParameters": []}]}"#;
    assert!(matches!(
        deserialize(json, ParseMode::Lenient).unwrap_err(),
        PatternError::InvalidTime { .. }
    ));
}

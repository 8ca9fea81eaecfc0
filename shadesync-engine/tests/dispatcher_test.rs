mod common;

use serde_json::json;
use shadesync_api::{BlindPayload, Envelope, ReasonCode};
use shadesync_engine::EngineError;
use time::Duration;
use time::macros::datetime;

use crate::common::{MockEngine, START, channels, south_blind};

#[test]
fn test_sun_in_window_closes_to_shadow_position() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));

    let outputs = engine.sun(true, 30.0, 180.0);

    assert_eq!(outputs.len(), 1);
    let payload = &outputs[0].payload;
    assert_eq!(payload.channel, 1);
    assert_eq!(payload.blind_position, 100);
    assert!(payload.sun_in_window);
    assert_eq!(payload.reason_code, Some(ReasonCode::SunInWindow));
    assert_eq!(payload.reason_description.as_deref(), Some("Sun in window"));
    assert_eq!(payload.expiry, None);
    assert_eq!(outputs[0].data.altitude, Some(30.0));
    assert_eq!(outputs[0].data.blind_position, 100);
}

#[test]
fn test_sunset_moves_to_night_position() {
    let mut engine = MockEngine::new();
    engine.configure(BlindPayload {
        nightposition: Some(75.0),
        ..south_blind(1)
    });
    engine.sun(true, 30.0, 180.0);

    let outputs = engine.sun(false, -5.0, 180.0);

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.blind_position, 75);
    assert!(!outputs[0].payload.sun_in_window);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::SunBelowHorizon));
}

#[test]
fn test_repeated_reading_emits_nothing() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));

    assert_eq!(engine.sun(true, 30.0, 180.0).len(), 1);
    assert!(engine.sun(true, 30.0, 180.0).is_empty());
    // different reading, same outcome
    assert!(engine.sun(true, 31.0, 181.0).is_empty());
}

#[test]
fn test_manual_position_holds_until_expiry() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.sun(true, 30.0, 180.0);

    let outputs = engine.send(
        "blindPosition",
        json!({ "channel": 1, "blindPosition": 50, "expiryperiod": 10 }),
    );
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.blind_position, 50);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::Manual));
    assert_eq!(outputs[0].payload.expiry, Some(START + Duration::minutes(10)));

    engine.clock.advance(Duration::minutes(5));
    assert!(engine.sun(false, -5.0, 180.0).is_empty());
    assert_eq!(engine.dispatcher.blind(1).unwrap().state.blind_position, 50);

    engine.clock.advance(Duration::minutes(6));
    let outputs = engine.sun(false, -5.0, 180.0);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::SunBelowHorizon));
    assert_eq!(outputs[0].payload.expiry, None);
}

#[test]
fn test_manual_position_uses_configured_expiry_period() {
    let mut engine = MockEngine::new();
    engine.configure(BlindPayload {
        expiryperiod: Some(45.0),
        ..south_blind(1)
    });

    let outputs = engine.send("blindPosition", json!({ "channel": 1, "blindPosition": 25 }));

    assert_eq!(outputs[0].payload.expiry, Some(START + Duration::minutes(45)));
}

#[test]
fn test_manual_position_always_emitted() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.configure(south_blind(2));
    engine.sun(true, 30.0, 180.0);

    let command = json!({ "channel": 2, "blindPosition": 100 });
    let outputs = engine.send("blindPosition", command.clone());

    // position unchanged from the engine's choice, still reported, and only for channel 2
    assert_eq!(channels(&outputs), vec![2]);
    assert_eq!(outputs[0].payload.blind_position, 100);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::Manual));

    let outputs = engine.send("blindPosition", command);
    assert_eq!(channels(&outputs), vec![2]);
}

#[test]
fn test_reset_returns_control_to_engine() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.sun(true, 30.0, 180.0);
    engine.send("blindPosition", json!({ "channel": 1, "blindPosition": 25 }));

    let outputs = engine.send("blindPosition", json!({ "channel": 1, "reset": true }));

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.blind_position, 100);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::SunInWindow));
    assert_eq!(outputs[0].payload.expiry, None);
}

#[test]
fn test_reset_before_sun_reading_keeps_position() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.send("blindPosition", json!({ "channel": 1, "blindPosition": 25 }));

    let outputs = engine.send("blindPosition", json!({ "channel": 1, "reset": true }));

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.blind_position, 25);
    assert_eq!(outputs[0].payload.expiry, None);
}

#[test]
fn test_opposite_blind_inverts_command() {
    let mut engine = MockEngine::new();
    engine.configure(BlindPayload {
        increment: Some(10.0),
        opposite: Some(true),
        ..south_blind(1)
    });

    // tan(45°) = 1 -> 67 -> 70 on a 10 grid
    let outputs = engine.sun(true, 45.0, 180.0);

    assert_eq!(outputs[0].payload.logical_blind_position, 70);
    assert_eq!(outputs[0].payload.blind_position, 30);
    assert_eq!(outputs[0].data.blind_position, 30);
}

#[test]
fn test_overcast_weather_opens_blind() {
    let mut engine = MockEngine::new();
    engine.configure(BlindPayload {
        cloudsthreshold: Some(0.5),
        cloudsthresholdposition: Some(25.0),
        ..south_blind(1)
    });
    engine.sun(true, 30.0, 180.0);

    let outputs = engine.send("weather", json!({ "clouds": 0.8, "maxtemp": 18 }));

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].payload.blind_position, 25);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::Overcast));
}

#[test]
fn test_hot_forecast_closes_blind_out_of_window() {
    let mut engine = MockEngine::new();
    engine.configure(BlindPayload {
        temperaturethreshold: Some(28.0),
        temperaturethresholdposition: Some(75.0),
        ..south_blind(1)
    });
    engine.sun(true, 30.0, 90.0);

    let outputs = engine.send("weather", json!({ "maxtemp": "31.5" }));

    assert_eq!(outputs[0].payload.blind_position, 75);
    assert!(!outputs[0].payload.sun_in_window);
    assert_eq!(outputs[0].payload.reason_code, Some(ReasonCode::HighTemperature));
}

#[test]
fn test_mode_broadcast_recomputes_every_blind() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.configure(BlindPayload {
        orientation: Some(0.0),
        ..south_blind(2)
    });
    engine.sun(true, 30.0, 180.0);

    let outputs = engine.send("mode", json!({ "mode": "winter" }));

    assert_eq!(channels(&outputs), vec![1, 2]);
    assert_eq!(outputs[0].payload.blind_position, 0);
    assert_eq!(outputs[1].payload.blind_position, 100);
}

#[test]
fn test_command_for_unknown_channel_rejected() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));

    let error = engine
        .dispatcher
        .handle_message(&Envelope {
            topic: "blindPosition".to_string(),
            payload: json!({ "channel": 9, "blindPosition": 50 }),
        })
        .unwrap_err();

    assert_eq!(error, EngineError::ConfigNotFound(9));
}

#[test]
fn test_invalid_configuration_keeps_previous_one() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));

    let error = engine
        .dispatcher
        .configure(&BlindPayload {
            increment: Some(30.0),
            ..south_blind(1)
        })
        .unwrap_err();

    assert_eq!(error.violations()[0].field, "increment");
    assert_eq!(engine.dispatcher.blind(1).unwrap().config.increment, 25);
}

#[test]
fn test_invalid_sun_reading_keeps_environment() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.sun(true, 30.0, 180.0);

    let error = engine
        .dispatcher
        .handle_message(&Envelope {
            topic: "sun".to_string(),
            payload: json!({ "sunInSky": true, "altitude": 30, "azimuth": 400 }),
        })
        .unwrap_err();

    assert!(matches!(error, EngineError::SchemaViolation(_)));
    assert_eq!(engine.dispatcher.environment().sun.unwrap().azimuth, 180.0);
}

#[test]
fn test_oversized_expiry_period_rejected() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.sun(true, 30.0, 180.0);

    let error = engine
        .dispatcher
        .handle_message(&Envelope {
            topic: "blindPosition".to_string(),
            payload: json!({ "channel": 1, "blindPosition": 40, "expiryperiod": 1e10 }),
        })
        .unwrap_err();

    assert_eq!(error.violations()[0].field, "expiryperiod");
    assert_eq!(engine.dispatcher.blind(1).unwrap().state.blind_position, 100);

    // still serving
    let outputs = engine.send("blindPosition", json!({ "channel": 1, "blindPosition": 40 }));
    assert_eq!(outputs[0].payload.blind_position, 40);
}

#[test]
fn test_expiry_past_calendar_end_rejected() {
    let mut engine = MockEngine::new();
    engine.configure(south_blind(1));
    engine.clock.set(datetime!(9999-12-31 23:00 UTC));

    let error = engine
        .dispatcher
        .handle_message(&Envelope {
            topic: "blindPosition".to_string(),
            payload: json!({ "channel": 1, "blindPosition": 40 }),
        })
        .unwrap_err();

    assert_eq!(error.violations()[0].field, "expiryperiod");
    assert_eq!(engine.dispatcher.blind(1).unwrap().state.expiry, None);
}

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shadesync_api::{
    BlindPayload, BlindPositionPayload, Channel, Envelope, Mode, ModePayload, PayloadFields,
    SunPayload, Topic, WeatherPayload,
};

use crate::blind::{BlindConfig, MAX_EXPIRY_PERIOD};
use crate::environment::{SunPosition, Weather};
use crate::error::{EngineError, FieldViolation};
use crate::validation::Violations;

/// Validated inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Sun(SunPosition),
    Weather(Weather),
    Configure(BlindConfig),
    ManualPosition {
        channel: Channel,
        position: u8,
        /// Minutes; the blind's configured period applies when absent
        expiry_minutes: Option<f64>,
    },
    Reset {
        channel: Channel,
    },
    Mode(Mode),
}

impl TryFrom<&Envelope> for InputEvent {
    type Error = EngineError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        let topic = envelope
            .topic
            .parse::<Topic>()
            .map_err(|e| EngineError::MalformedInput(e.to_string()))?;

        if !envelope.payload.is_object() {
            return Err(EngineError::MalformedInput(format!(
                "payload for topic `{topic}` is not an object"
            )));
        }

        match topic {
            Topic::Sun => {
                let payload: SunPayload = decode(&envelope.payload)?;
                Ok(InputEvent::Sun(SunPosition::try_from(&payload)?))
            }
            Topic::Weather => {
                let payload: WeatherPayload = decode(&envelope.payload)?;
                Ok(InputEvent::Weather(Weather::try_from(&payload)?))
            }
            Topic::Blind => {
                let payload: BlindPayload = decode(&envelope.payload)?;
                Ok(InputEvent::Configure(BlindConfig::try_from(&payload)?))
            }
            Topic::BlindPosition => {
                let payload: BlindPositionPayload = decode(&envelope.payload)?;
                blind_position_event(&payload)
            }
            Topic::Mode => {
                let payload: ModePayload = decode(&envelope.payload)?;
                mode_event(&payload)
            }
        }
    }
}

/// Decode a payload object, reporting every field of the wrong type.
///
/// Unknown keys are ignored.
fn decode<T: DeserializeOwned + PayloadFields>(payload: &Value) -> Result<T, EngineError> {
    let error = match T::deserialize(payload) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };

    let mut violations = Vec::new();
    if let Value::Object(object) = payload {
        for &field in T::FIELDS {
            let Some(value) = object.get(field) else {
                continue;
            };
            let single = Value::Object(Map::from_iter([(field.to_string(), value.clone())]));
            if let Err(e) = T::deserialize(&single) {
                violations.push(FieldViolation::new(field, e.to_string()));
            }
        }
    }

    if violations.is_empty() {
        violations.push(FieldViolation::new("payload", error.to_string()));
    }
    Err(EngineError::SchemaViolation(violations))
}

fn blind_position_event(payload: &BlindPositionPayload) -> Result<InputEvent, EngineError> {
    let mut violations = Violations::new();
    let channel = violations.required("channel", payload.channel);

    if let Some(reset) = payload.reset {
        if !reset {
            violations.push("reset", "must be true to clear an override");
        }
        return match channel {
            Some(channel) if violations.is_empty() => Ok(InputEvent::Reset { channel }),
            _ => Err(violations.into_error()),
        };
    }

    let position = violations.required("blindPosition", payload.blind_position);
    let position = violations.percentage("blindPosition", position);
    let expiry_minutes =
        violations.positive_up_to("expiryperiod", payload.expiry_period, MAX_EXPIRY_PERIOD);

    match (channel, position) {
        (Some(channel), Some(position)) if violations.is_empty() => Ok(InputEvent::ManualPosition {
            channel,
            position,
            expiry_minutes,
        }),
        _ => Err(violations.into_error()),
    }
}

fn mode_event(payload: &ModePayload) -> Result<InputEvent, EngineError> {
    let mut violations = Violations::new();

    if let Some(text) = violations.required("mode", payload.mode.as_deref()) {
        match text.parse::<Mode>() {
            Ok(mode) => return Ok(InputEvent::Mode(mode)),
            Err(e) => violations.push("mode", e),
        }
    }

    Err(violations.into_error())
}

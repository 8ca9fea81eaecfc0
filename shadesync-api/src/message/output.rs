use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{Channel, Mode, ReasonCode};

/// Topic carried by every outbound message
pub const BLIND_TOPIC: &str = "blind";

/// Outbound message, one per blind whose visible state changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputMessage {
    pub topic: String,
    /// Full blind state snapshot
    pub payload: BlindStatePayload,
    /// Summary for telemetry and actuator translation
    pub data: BlindSummary,
}

impl OutputMessage {
    pub fn new(payload: BlindStatePayload, data: BlindSummary) -> Self {
        Self {
            topic: BLIND_TOPIC.to_string(),
            payload,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlindStatePayload {
    pub channel: Channel,
    /// Commanded position, inverted for reverse-wired actuators
    pub blind_position: u8,
    /// Position before inversion (0 = open, 100 = closed)
    pub logical_blind_position: u8,
    pub sun_in_window: bool,
    #[serde(rename = "blindPositionReasonCode")]
    pub reason_code: Option<ReasonCode>,
    #[serde(rename = "blindPositionReasonDesc")]
    pub reason_description: Option<String>,
    /// Present while a manual override is active
    #[serde(
        rename = "blindPositionExpiry",
        default,
        with = "time::serde::rfc3339::option"
    )]
    pub expiry: Option<OffsetDateTime>,
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlindSummary {
    pub channel: Channel,
    pub altitude: Option<f64>,
    pub azimuth: Option<f64>,
    pub blind_position: u8,
}

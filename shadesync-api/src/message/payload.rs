use serde::{Deserialize, Serialize};

use crate::de;
use crate::models::Channel;

/// Sun position reading, degrees at the boundary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SunPayload {
    /// Whether the sun is between the configured sunrise and sunset events
    #[serde(default, deserialize_with = "de::option_bool")]
    pub sun_in_sky: Option<bool>,
    /// Angle above the horizon
    #[serde(default, deserialize_with = "de::option_f64")]
    pub altitude: Option<f64>,
    /// Compass bearing, 0-360
    #[serde(default, deserialize_with = "de::option_f64")]
    pub azimuth: Option<f64>,
}

/// Weather reading, every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherPayload {
    /// Cloud cover fraction, 0-1
    #[serde(default, deserialize_with = "de::option_f64")]
    pub clouds: Option<f64>,
    /// Forecast maximum temperature
    #[serde(default, deserialize_with = "de::option_f64")]
    pub maxtemp: Option<f64>,
    /// UV index, 0-20
    #[serde(default, deserialize_with = "de::option_f64")]
    pub uvindex: Option<f64>,
}

/// Blind configuration as sent by the host, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlindPayload {
    #[serde(default, deserialize_with = "de::option_channel")]
    pub channel: Option<Channel>,
    /// Window facing, degrees
    #[serde(default, deserialize_with = "de::option_f64")]
    pub orientation: Option<f64>,
    /// Window span counter-clockwise of the orientation, degrees
    #[serde(default, deserialize_with = "de::option_f64")]
    pub noffset: Option<f64>,
    /// Window span clockwise of the orientation, degrees
    #[serde(default, deserialize_with = "de::option_f64")]
    pub poffset: Option<f64>,
    /// Height of the window top above the floor
    #[serde(default, deserialize_with = "de::option_f64")]
    pub top: Option<f64>,
    /// Height of the window bottom above the floor
    #[serde(default, deserialize_with = "de::option_f64")]
    pub bottom: Option<f64>,
    /// How far into the room direct sunlight may reach
    #[serde(default, deserialize_with = "de::option_f64")]
    pub depth: Option<f64>,
    /// Position step, divisor of 100
    #[serde(default, deserialize_with = "de::option_f64")]
    pub increment: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub maxopen: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub maxclosed: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub altitudethreshold: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub temperaturethreshold: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub temperaturethresholdposition: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub cloudsthreshold: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub cloudsthresholdposition: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub uvindexthreshold: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub uvindexthresholdposition: Option<f64>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub nightposition: Option<f64>,
    /// Manual override lifetime, minutes
    #[serde(default, deserialize_with = "de::option_f64")]
    pub expiryperiod: Option<f64>,
    /// `Summer` or `Winter`
    #[serde(default)]
    pub mode: Option<String>,
    /// Invert the commanded position for reverse-wired actuators
    #[serde(default, deserialize_with = "de::option_bool")]
    pub opposite: Option<bool>,
}

/// Manual position command, or an override reset when `reset` is present
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlindPositionPayload {
    #[serde(default, deserialize_with = "de::option_channel")]
    pub channel: Option<Channel>,
    #[serde(default, deserialize_with = "de::option_f64")]
    pub blind_position: Option<f64>,
    #[serde(default, rename = "expiryperiod", deserialize_with = "de::option_f64")]
    pub expiry_period: Option<f64>,
    #[serde(default, deserialize_with = "de::option_bool")]
    pub reset: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModePayload {
    #[serde(default)]
    pub mode: Option<String>,
}

/// Wire names of a payload's fields, for reporting decode failures per field
pub trait PayloadFields {
    const FIELDS: &'static [&'static str];
}

impl PayloadFields for SunPayload {
    const FIELDS: &'static [&'static str] = &["sunInSky", "altitude", "azimuth"];
}

impl PayloadFields for WeatherPayload {
    const FIELDS: &'static [&'static str] = &["clouds", "maxtemp", "uvindex"];
}

impl PayloadFields for BlindPayload {
    const FIELDS: &'static [&'static str] = &[
        "channel",
        "orientation",
        "noffset",
        "poffset",
        "top",
        "bottom",
        "depth",
        "increment",
        "maxopen",
        "maxclosed",
        "altitudethreshold",
        "temperaturethreshold",
        "temperaturethresholdposition",
        "cloudsthreshold",
        "cloudsthresholdposition",
        "uvindexthreshold",
        "uvindexthresholdposition",
        "nightposition",
        "expiryperiod",
        "mode",
        "opposite",
    ];
}

impl PayloadFields for BlindPositionPayload {
    const FIELDS: &'static [&'static str] = &["channel", "blindPosition", "expiryperiod", "reset"];
}

impl PayloadFields for ModePayload {
    const FIELDS: &'static [&'static str] = &["mode"];
}

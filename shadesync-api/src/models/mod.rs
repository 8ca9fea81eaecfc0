use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blind channel identifier
pub type Channel = u32;

/// Seasonal operating mode of a blind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keep direct sunlight out of the room
    #[default]
    #[serde(alias = "summer")]
    Summer,
    /// Let direct sunlight in, close when the sun is elsewhere
    #[serde(alias = "winter")]
    Winter,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Summer => "Summer",
            Mode::Winter => "Winter",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summer" => Ok(Mode::Summer),
            "winter" => Ok(Mode::Winter),
            other => Err(format!("unknown mode `{other}`")),
        }
    }
}

/// Justification attached to every computed blind position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReasonCode {
    /// Position set by a manual command
    #[serde(rename = "01")]
    Manual,
    /// Sun below the horizon
    #[serde(rename = "02")]
    SunBelowHorizon,
    /// Sun below the configured altitude threshold
    #[serde(rename = "03")]
    BelowAltitudeThreshold,
    /// Sun outside the window's azimuth range
    #[serde(rename = "04")]
    SunNotInWindow,
    /// Sun in the window, position derived from it
    #[serde(rename = "05")]
    SunInWindow,
    /// Cloud cover above threshold
    #[serde(rename = "06")]
    Overcast,
    /// Temperature forecast above threshold
    #[serde(rename = "07")]
    HighTemperature,
    /// UV index above threshold
    #[serde(rename = "08")]
    HighUvIndex,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 8] = [
        ReasonCode::Manual,
        ReasonCode::SunBelowHorizon,
        ReasonCode::BelowAltitudeThreshold,
        ReasonCode::SunNotInWindow,
        ReasonCode::SunInWindow,
        ReasonCode::Overcast,
        ReasonCode::HighTemperature,
        ReasonCode::HighUvIndex,
    ];

    /// Two-digit code as carried on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ReasonCode::Manual => "01",
            ReasonCode::SunBelowHorizon => "02",
            ReasonCode::BelowAltitudeThreshold => "03",
            ReasonCode::SunNotInWindow => "04",
            ReasonCode::SunInWindow => "05",
            ReasonCode::Overcast => "06",
            ReasonCode::HighTemperature => "07",
            ReasonCode::HighUvIndex => "08",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

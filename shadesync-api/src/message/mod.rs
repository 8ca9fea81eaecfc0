mod output;
mod payload;

pub use output::*;
pub use payload::*;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound message: a topic naming the event kind and an untyped payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Event kind, see [`Topic`]
    pub topic: String,
    /// Event body, expected to be a JSON object
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    pub fn new(topic: Topic, payload: Value) -> Self {
        Self {
            topic: topic.as_str().to_string(),
            payload,
        }
    }
}

/// Recognised inbound topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Sun position reading
    Sun,
    /// Weather reading
    Weather,
    /// Blind configuration
    Blind,
    /// Manual position or override reset
    BlindPosition,
    /// Mode broadcast to every blind
    Mode,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Sun => "sun",
            Topic::Weather => "weather",
            Topic::Blind => "blind",
            Topic::BlindPosition => "blindPosition",
            Topic::Mode => "mode",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl fmt::Display for UnknownTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown topic `{}`", self.0)
    }
}

impl std::error::Error for UnknownTopic {}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sun" => Ok(Topic::Sun),
            "weather" => Ok(Topic::Weather),
            "blind" => Ok(Topic::Blind),
            "blindPosition" => Ok(Topic::BlindPosition),
            "mode" => Ok(Topic::Mode),
            other => Err(UnknownTopic(other.to_string())),
        }
    }
}

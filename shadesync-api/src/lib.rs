pub mod de;
pub mod message;
pub mod models;

pub use message::{
    BlindPayload, BlindPositionPayload, BlindStatePayload, BlindSummary, Envelope, ModePayload,
    OutputMessage, PayloadFields, SunPayload, Topic, UnknownTopic, WeatherPayload,
};
pub use models::{Channel, Mode, ReasonCode};

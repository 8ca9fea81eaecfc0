//! Lenient field decoders.
//!
//! Blind configuration often arrives from form fields or environment
//! variables, where every value is text. These helpers accept either the
//! native JSON type or its textual form, and treat blank text as absent.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use crate::models::Channel;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChannelOrText {
    Number(u64),
    Text(String),
}

pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("`{text}` is not a number"))),
    }
}

pub fn option_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrText::Bool(value)) => Ok(Some(value)),
        Some(BoolOrText::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("`{text}` is not a boolean"))),
        },
    }
}

pub fn option_channel<'de, D>(deserializer: D) -> Result<Option<Channel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<ChannelOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(ChannelOrText::Number(value)) => value,
        Some(ChannelOrText::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(ChannelOrText::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("`{text}` is not a channel number")))?,
    };

    Channel::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("channel {value} is out of range")))
}

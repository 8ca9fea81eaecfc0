#![allow(dead_code)]

use serde_json::{Value, json};
use shadesync_api::{BlindPayload, Channel, Envelope, OutputMessage};
use shadesync_engine::{Dispatcher, ManualClock};
use time::OffsetDateTime;
use time::macros::datetime;

pub const START: OffsetDateTime = datetime!(2026-06-21 12:00 UTC);

pub struct MockEngine {
    pub dispatcher: Dispatcher<ManualClock>,
    pub clock: ManualClock,
}

impl MockEngine {
    pub fn new() -> Self {
        let clock = ManualClock::new(START);

        Self {
            dispatcher: Dispatcher::new(clock.clone()),
            clock,
        }
    }

    pub fn send(&mut self, topic: &str, payload: Value) -> Vec<OutputMessage> {
        self.dispatcher
            .handle_message(&Envelope {
                topic: topic.to_string(),
                payload,
            })
            .unwrap()
    }

    pub fn configure(&mut self, payload: BlindPayload) -> Vec<OutputMessage> {
        self.dispatcher.configure(&payload).unwrap()
    }

    pub fn sun(&mut self, sun_in_sky: bool, altitude: f64, azimuth: f64) -> Vec<OutputMessage> {
        self.send(
            "sun",
            json!({ "sunInSky": sun_in_sky, "altitude": altitude, "azimuth": azimuth }),
        )
    }
}

/// South-facing blind with a 0.5-2.0 window, one unit deep, 25 % steps
pub fn south_blind(channel: Channel) -> BlindPayload {
    BlindPayload {
        channel: Some(channel),
        orientation: Some(180.0),
        top: Some(2.0),
        bottom: Some(0.5),
        depth: Some(1.0),
        increment: Some(25.0),
        maxopen: Some(0.0),
        maxclosed: Some(100.0),
        mode: Some("Summer".to_string()),
        altitudethreshold: Some(10.0),
        ..Default::default()
    }
}

pub fn channels(outputs: &[OutputMessage]) -> Vec<Channel> {
    outputs.iter().map(|output| output.payload.channel).collect()
}

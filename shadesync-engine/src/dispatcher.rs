use std::collections::BTreeMap;

use shadesync_api::{
    BlindPayload, BlindStatePayload, BlindSummary, Channel, Envelope, Mode, OutputMessage,
};
use tracing::{debug, info};

use crate::blind::{Blind, BlindConfig};
use crate::clock::{Clock, SystemClock};
use crate::environment::{Environment, SunPosition, Weather};
use crate::error::{EngineError, Result};
use crate::event::InputEvent;
use crate::expiry::{reset_manual_position, set_manual_position};
use crate::policy::recompute;
use crate::reason::ReasonCatalog;

/// Owns every configured blind and routes events through the policy.
///
/// Events are handled one at a time to completion. A rejected event leaves
/// every blind untouched.
pub struct Dispatcher<C: Clock = SystemClock> {
    /// Blind table (channel -> blind)
    blinds: BTreeMap<Channel, Blind>,
    /// Last known sun and weather readings
    environment: Environment,
    catalog: ReasonCatalog,
    clock: C,
}

impl<C: Clock> Dispatcher<C> {
    pub fn new(clock: C) -> Self {
        Self {
            blinds: BTreeMap::new(),
            environment: Environment::default(),
            catalog: ReasonCatalog::default(),
            clock,
        }
    }

    pub fn with_catalog(mut self, catalog: ReasonCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn blind(&self, channel: Channel) -> Option<&Blind> {
        self.blinds.get(&channel)
    }

    pub fn blinds(&self) -> impl Iterator<Item = &Blind> {
        self.blinds.values()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Validate and handle a raw inbound message
    pub fn handle_message(&mut self, envelope: &Envelope) -> Result<Vec<OutputMessage>> {
        let event = InputEvent::try_from(envelope)?;
        self.handle(event)
    }

    /// Validate and install a blind configuration
    pub fn configure(&mut self, payload: &BlindPayload) -> Result<Vec<OutputMessage>> {
        let config = BlindConfig::try_from(payload)?;
        self.handle(InputEvent::Configure(config))
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Vec<OutputMessage>> {
        match event {
            InputEvent::Sun(sun) => Ok(self.update_sun(sun)),
            InputEvent::Weather(weather) => Ok(self.update_weather(weather)),
            InputEvent::Configure(config) => Ok(self.replace_blind(config)),
            InputEvent::Mode(mode) => Ok(self.broadcast_mode(mode)),
            InputEvent::ManualPosition {
                channel,
                position,
                expiry_minutes,
            } => self.set_manual_position(channel, position, expiry_minutes),
            InputEvent::Reset { channel } => self.reset_manual_position(channel),
        }
    }

    fn update_sun(&mut self, sun: SunPosition) -> Vec<OutputMessage> {
        debug!(
            sun_in_sky = sun.sun_in_sky,
            altitude = sun.altitude,
            azimuth = sun.azimuth,
            "Sun reading received"
        );
        self.environment.sun = Some(sun);
        self.recompute_all(None)
    }

    fn update_weather(&mut self, weather: Weather) -> Vec<OutputMessage> {
        debug!(
            clouds = ?weather.clouds,
            max_temp = ?weather.max_temp,
            uv_index = ?weather.uv_index,
            "Weather reading received"
        );
        self.environment.weather = weather;
        self.recompute_all(None)
    }

    /// A new configuration replaces the blind wholesale, state included
    fn replace_blind(&mut self, config: BlindConfig) -> Vec<OutputMessage> {
        let channel = config.channel;
        let mut blind = Blind::new(config);
        let mut outputs = Vec::new();

        if self.environment.sun.is_some() {
            let now = self.clock.now();
            blind.state = recompute(&blind.config, &blind.state, &self.environment, now);
            outputs.push(build_output(&blind, &self.environment, &self.catalog));
        }

        let replaced = self.blinds.insert(channel, blind).is_some();
        info!(channel, replaced, "Blind configured");

        outputs
    }

    fn broadcast_mode(&mut self, mode: Mode) -> Vec<OutputMessage> {
        info!(%mode, blinds = self.blinds.len(), "Mode broadcast");
        for blind in self.blinds.values_mut() {
            blind.config.mode = mode;
        }
        self.recompute_all(None)
    }

    fn set_manual_position(
        &mut self,
        channel: Channel,
        position: u8,
        expiry_minutes: Option<f64>,
    ) -> Result<Vec<OutputMessage>> {
        let now = self.clock.now();
        let blind = self
            .blinds
            .get_mut(&channel)
            .ok_or(EngineError::ConfigNotFound(channel))?;

        blind.state = set_manual_position(&blind.config, &blind.state, position, expiry_minutes, now)?;
        info!(channel, position, expiry = ?blind.state.expiry, "Manual position set");

        Ok(self.recompute_all(Some(channel)))
    }

    fn reset_manual_position(&mut self, channel: Channel) -> Result<Vec<OutputMessage>> {
        let blind = self
            .blinds
            .get_mut(&channel)
            .ok_or(EngineError::ConfigNotFound(channel))?;

        blind.state = reset_manual_position(&blind.state);
        info!(channel, "Manual position reset");

        Ok(self.recompute_all(Some(channel)))
    }

    /// Recompute every blind, emitting the ones whose visible state changed
    /// plus `always`, if given.
    fn recompute_all(&mut self, always: Option<Channel>) -> Vec<OutputMessage> {
        let now = self.clock.now();
        let mut outputs = Vec::new();

        for (channel, blind) in self.blinds.iter_mut() {
            let before = blind.state.visible();
            blind.state = recompute(&blind.config, &blind.state, &self.environment, now);
            let changed = blind.state.visible() != before;

            if changed || always == Some(*channel) {
                debug!(
                    channel = *channel,
                    position = blind.state.blind_position,
                    sun_in_window = blind.state.sun_in_window,
                    reason = ?blind.state.reason,
                    changed,
                    "Blind position emitted"
                );
                outputs.push(build_output(blind, &self.environment, &self.catalog));
            }
        }

        outputs
    }
}

fn build_output(blind: &Blind, environment: &Environment, catalog: &ReasonCatalog) -> OutputMessage {
    let state = &blind.state;
    let sun = environment.sun.as_ref();

    OutputMessage::new(
        BlindStatePayload {
            channel: blind.channel(),
            blind_position: state.blind_position,
            logical_blind_position: state.logical_blind_position,
            sun_in_window: state.sun_in_window,
            reason_code: state.reason,
            reason_description: state.reason.map(|code| catalog.describe(code).to_string()),
            expiry: state.expiry,
            mode: blind.config.mode,
        },
        BlindSummary {
            channel: blind.channel(),
            altitude: sun.map(|sun| sun.altitude),
            azimuth: sun.map(|sun| sun.azimuth),
            blind_position: state.blind_position,
        },
    )
}

use shadesync_api::{BlindPayload, Channel, Mode, ReasonCode};
use time::OffsetDateTime;

use crate::error::EngineError;
use crate::validation::Violations;

pub const DEFAULT_OFFSET: f64 = 90.0;
pub const DEFAULT_MAX_OPEN: u8 = 0;
pub const DEFAULT_MAX_CLOSED: u8 = 100;
pub const DEFAULT_NIGHT_POSITION: u8 = 100;
/// Minutes a manual position holds when the command names no period
pub const DEFAULT_EXPIRY_PERIOD: f64 = 120.0;
/// A hundred years, in minutes
pub const MAX_EXPIRY_PERIOD: f64 = 52_560_000.0;
pub const DEFAULT_TEMPERATURE_POSITION: u8 = 100;

/// Reading above `value` moves the blind to `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub value: f64,
    pub position: u8,
}

impl Threshold {
    pub fn exceeded_by(&self, reading: Option<f64>) -> bool {
        reading.is_some_and(|reading| reading > self.value)
    }
}

/// Validated per-channel configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BlindConfig {
    pub channel: Channel,
    pub orientation: f64,
    pub noffset: f64,
    pub poffset: f64,
    pub top: f64,
    pub bottom: f64,
    pub depth: f64,
    pub increment: u8,
    pub max_open: u8,
    pub max_closed: u8,
    pub altitude_threshold: Option<f64>,
    pub temperature: Option<Threshold>,
    pub clouds: Option<Threshold>,
    pub uv_index: Option<Threshold>,
    pub night_position: u8,
    /// Minutes
    pub expiry_period: f64,
    pub mode: Mode,
    pub opposite: bool,
}

impl TryFrom<&BlindPayload> for BlindConfig {
    type Error = EngineError;

    fn try_from(payload: &BlindPayload) -> Result<Self, Self::Error> {
        let mut violations = Violations::new();

        let channel = violations.required("channel", payload.channel);

        let orientation = violations.required("orientation", payload.orientation);
        let orientation = violations.in_range("orientation", orientation, 0.0..=360.0);
        let noffset = violations.in_range(
            "noffset",
            Some(payload.noffset.unwrap_or(DEFAULT_OFFSET)),
            0.0..=90.0,
        );
        let poffset = violations.in_range(
            "poffset",
            Some(payload.poffset.unwrap_or(DEFAULT_OFFSET)),
            0.0..=90.0,
        );

        let top = violations.required("top", payload.top);
        let top = violations.finite("top", top);
        let bottom = violations.required("bottom", payload.bottom);
        let bottom = non_negative(&mut violations, "bottom", bottom);
        if let (Some(top), Some(bottom)) = (top, bottom) {
            if top < bottom {
                violations.push("top", "must not be below bottom");
            }
        }
        let depth = violations.required("depth", payload.depth);
        let depth = non_negative(&mut violations, "depth", depth);

        let increment = violations.required("increment", payload.increment);
        let increment = match violations.percentage("increment", increment) {
            Some(0) => {
                violations.push("increment", "must be at least 1");
                None
            }
            Some(increment) if 100 % increment != 0 => {
                violations.push("increment", "must divide 100");
                None
            }
            other => other,
        };

        let max_open = position(
            &mut violations,
            "maxopen",
            payload.maxopen,
            Some(DEFAULT_MAX_OPEN),
            increment,
        );
        let max_closed = position(
            &mut violations,
            "maxclosed",
            payload.maxclosed,
            Some(DEFAULT_MAX_CLOSED),
            increment,
        );
        if let (Some(max_open), Some(max_closed)) = (max_open, max_closed) {
            if max_open > max_closed {
                violations.push("maxopen", "must not exceed maxclosed");
            }
        }

        let altitude_threshold = violations
            .in_range("altitudethreshold", payload.altitudethreshold, 0.0..=90.0)
            .filter(|threshold| *threshold != 0.0);

        let temperature_value = violations.finite("temperaturethreshold", payload.temperaturethreshold);
        let temperature = threshold(
            &mut violations,
            temperature_value,
            "temperaturethresholdposition",
            payload.temperaturethresholdposition,
            Some(DEFAULT_TEMPERATURE_POSITION),
            increment,
        );
        let clouds_value = violations.in_range("cloudsthreshold", payload.cloudsthreshold, 0.0..=1.0);
        let clouds = threshold(
            &mut violations,
            clouds_value,
            "cloudsthresholdposition",
            payload.cloudsthresholdposition,
            max_open,
            increment,
        );
        let uv_value = violations.in_range("uvindexthreshold", payload.uvindexthreshold, 0.0..=20.0);
        let uv_index = threshold(
            &mut violations,
            uv_value,
            "uvindexthresholdposition",
            payload.uvindexthresholdposition,
            max_closed,
            increment,
        );

        let night_position = position(
            &mut violations,
            "nightposition",
            payload.nightposition,
            Some(DEFAULT_NIGHT_POSITION),
            increment,
        );

        let expiry_period = violations.positive_up_to(
            "expiryperiod",
            Some(payload.expiryperiod.unwrap_or(DEFAULT_EXPIRY_PERIOD)),
            MAX_EXPIRY_PERIOD,
        );

        let mode = match payload.mode.as_deref().map(str::trim) {
            None | Some("") => Some(Mode::default()),
            Some(text) => match text.parse::<Mode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    violations.push("mode", e);
                    None
                }
            },
        };

        match (
            channel,
            orientation,
            noffset,
            poffset,
            top,
            bottom,
            depth,
            increment,
            max_open,
            max_closed,
            night_position,
            (expiry_period, mode),
        ) {
            (
                Some(channel),
                Some(orientation),
                Some(noffset),
                Some(poffset),
                Some(top),
                Some(bottom),
                Some(depth),
                Some(increment),
                Some(max_open),
                Some(max_closed),
                Some(night_position),
                (Some(expiry_period), Some(mode)),
            ) if violations.is_empty() => Ok(Self {
                channel,
                orientation,
                noffset,
                poffset,
                top,
                bottom,
                depth,
                increment,
                max_open,
                max_closed,
                altitude_threshold,
                temperature,
                clouds,
                uv_index,
                night_position,
                expiry_period,
                mode,
                opposite: payload.opposite.unwrap_or(false),
            }),
            _ => Err(violations.into_error()),
        }
    }
}

fn non_negative(violations: &mut Violations, field: &'static str, value: Option<f64>) -> Option<f64> {
    match violations.finite(field, value) {
        Some(v) if v < 0.0 => {
            violations.push(field, "must not be negative");
            None
        }
        other => other,
    }
}

fn position(
    violations: &mut Violations,
    field: &'static str,
    value: Option<f64>,
    default: Option<u8>,
    increment: Option<u8>,
) -> Option<u8> {
    let value = match value {
        Some(value) => violations.percentage(field, Some(value)),
        None => default,
    };
    violations.aligned(field, value, increment)
}

/// A zero or absent threshold disables the check; its position is still validated.
fn threshold(
    violations: &mut Violations,
    value: Option<f64>,
    position_field: &'static str,
    position_value: Option<f64>,
    default_position: Option<u8>,
    increment: Option<u8>,
) -> Option<Threshold> {
    let position = position(violations, position_field, position_value, default_position, increment);

    match (value, position) {
        (Some(value), Some(position)) if value != 0.0 => Some(Threshold { value, position }),
        _ => None,
    }
}

/// Live state of a blind, recomputed every cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlindState {
    /// Commanded position, inverted when the blind is `opposite`
    pub blind_position: u8,
    /// Position before inversion (0 = open, 100 = closed)
    pub logical_blind_position: u8,
    pub sun_in_window: bool,
    /// Absent until the first decision
    pub reason: Option<ReasonCode>,
    /// Present only while a manual override is active
    pub expiry: Option<OffsetDateTime>,
}

impl BlindState {
    pub fn commanded(
        config: &BlindConfig,
        logical_position: u8,
        sun_in_window: bool,
        reason: ReasonCode,
    ) -> Self {
        let logical_position = logical_position.min(100);

        Self {
            blind_position: apply_opposite(config.opposite, logical_position),
            logical_blind_position: logical_position,
            sun_in_window,
            reason: Some(reason),
            expiry: None,
        }
    }

    /// Externally visible part of the state, used for change detection
    pub fn visible(&self) -> (u8, bool, Option<ReasonCode>) {
        (self.blind_position, self.sun_in_window, self.reason)
    }
}

pub fn apply_opposite(opposite: bool, logical_position: u8) -> u8 {
    if opposite {
        100 - logical_position.min(100)
    } else {
        logical_position
    }
}

/// Configuration and state of one channel
#[derive(Debug, Clone, PartialEq)]
pub struct Blind {
    pub config: BlindConfig,
    pub state: BlindState,
}

impl Blind {
    pub fn new(config: BlindConfig) -> Self {
        Self {
            config,
            state: BlindState::default(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.config.channel
    }
}

//! Blind position policy.
//!
//! Each cycle is decided from scratch; the only memory carried between cycles
//! is a manual override that has not yet expired. Branches, first match wins:
//!
//! | Code | Condition                                          |
//! |------|----------------------------------------------------|
//! | 01   | manual override active (engine skipped)            |
//! | 02   | sun below horizon                                  |
//! | 07   | forecast maximum temperature above threshold       |
//! | 03   | summer, sun in window, below altitude threshold    |
//! | 06   | sun in window, cloud cover above threshold         |
//! | 08   | sun in window, UV index above threshold            |
//! | 05   | sun in window                                      |
//! | 04   | sun not in window                                  |

use shadesync_api::{Mode, ReasonCode};
use time::OffsetDateTime;

use crate::blind::{BlindConfig, BlindState};
use crate::environment::{Environment, SunPosition, Weather};
use crate::expiry::has_expired;
use crate::geometry::{is_sun_in_window, position_from_shadow};

/// Outcome of one policy evaluation, before inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub position: u8,
    pub sun_in_window: bool,
    pub reason: ReasonCode,
}

/// New state for a blind given the current environment.
///
/// Returns `prior` untouched while a manual override is active or before the
/// first sun reading has arrived.
pub fn recompute(
    config: &BlindConfig,
    prior: &BlindState,
    environment: &Environment,
    now: OffsetDateTime,
) -> BlindState {
    if !has_expired(prior.expiry, now) {
        return prior.clone();
    }

    let Some(sun) = environment.sun.as_ref() else {
        return prior.clone();
    };

    let decision = decide(config, sun, &environment.weather);

    BlindState::commanded(config, decision.position, decision.sun_in_window, decision.reason)
}

pub fn decide(config: &BlindConfig, sun: &SunPosition, weather: &Weather) -> Decision {
    if !sun.sun_in_sky {
        return Decision {
            position: config.night_position,
            sun_in_window: false,
            reason: ReasonCode::SunBelowHorizon,
        };
    }

    if let Some(temperature) = &config.temperature {
        if temperature.exceeded_by(weather.max_temp) {
            return Decision {
                position: temperature.position,
                sun_in_window: false,
                reason: ReasonCode::HighTemperature,
            };
        }
    }

    let sun_in_window =
        is_sun_in_window(config.orientation, config.noffset, config.poffset, sun.azimuth);

    let (position, reason) = match config.mode {
        Mode::Summer => summer(config, sun, weather, sun_in_window),
        Mode::Winter => winter(config, weather, sun_in_window),
    };

    Decision {
        position,
        sun_in_window,
        reason,
    }
}

fn summer(
    config: &BlindConfig,
    sun: &SunPosition,
    weather: &Weather,
    sun_in_window: bool,
) -> (u8, ReasonCode) {
    if !sun_in_window {
        return (config.max_open, ReasonCode::SunNotInWindow);
    }

    if config
        .altitude_threshold
        .is_some_and(|threshold| sun.altitude < threshold)
    {
        return (config.max_open, ReasonCode::BelowAltitudeThreshold);
    }

    if let Some(weather_position) = weather_override(config, weather) {
        return weather_position;
    }

    let shadow = position_from_shadow(
        sun.altitude,
        config.depth,
        config.top,
        config.bottom,
        config.increment,
    );

    (
        shadow.max(config.max_open).min(config.max_closed),
        ReasonCode::SunInWindow,
    )
}

fn winter(config: &BlindConfig, weather: &Weather, sun_in_window: bool) -> (u8, ReasonCode) {
    if !sun_in_window {
        return (config.max_closed, ReasonCode::SunNotInWindow);
    }

    weather_override(config, weather).unwrap_or((config.max_open, ReasonCode::SunInWindow))
}

/// Overcast is checked before UV
fn weather_override(config: &BlindConfig, weather: &Weather) -> Option<(u8, ReasonCode)> {
    if let Some(clouds) = &config.clouds {
        if clouds.exceeded_by(weather.clouds) {
            return Some((clouds.position, ReasonCode::Overcast));
        }
    }

    if let Some(uv_index) = &config.uv_index {
        if uv_index.exceeded_by(weather.uv_index) {
            return Some((uv_index.position, ReasonCode::HighUvIndex));
        }
    }

    None
}

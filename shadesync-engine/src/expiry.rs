//! Manual override bookkeeping.
//!
//! Expiry is checked lazily: nothing fires when an override lapses, the next
//! recompute simply finds it expired.

use shadesync_api::ReasonCode;
use time::{Duration, OffsetDateTime};

use crate::blind::{BlindConfig, BlindState};
use crate::error::{EngineError, FieldViolation, Result};

/// True when no override is active, or the active one has lapsed
pub fn has_expired(expiry: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    match expiry {
        Some(expiry) => now > expiry,
        None => true,
    }
}

/// Pin the blind at `position` until `expiry_minutes` (or the blind's
/// configured period) from `now`.
///
/// Fails when the expiry falls outside the representable date range.
pub fn set_manual_position(
    config: &BlindConfig,
    state: &BlindState,
    position: u8,
    expiry_minutes: Option<f64>,
    now: OffsetDateTime,
) -> Result<BlindState> {
    let minutes = expiry_minutes.unwrap_or(config.expiry_period);
    let expiry = Duration::checked_seconds_f64(minutes * 60.0)
        .and_then(|period| now.checked_add(period))
        .ok_or_else(|| {
            EngineError::SchemaViolation(vec![FieldViolation::new(
                "expiryperiod",
                format!("{minutes} minutes from now is out of range"),
            )])
        })?;

    Ok(BlindState {
        expiry: Some(expiry),
        ..BlindState::commanded(config, position, state.sun_in_window, ReasonCode::Manual)
    })
}

/// Drop the override, leaving the position where it is until the next recompute
pub fn reset_manual_position(state: &BlindState) -> BlindState {
    BlindState {
        expiry: None,
        ..state.clone()
    }
}

//! Window geometry: azimuth membership and shadow-derived positions.

/// Whether the sun's azimuth falls inside `[orientation - noffset, orientation + poffset]`,
/// inclusive on both ends, on the circular 0-360 degree domain.
pub fn is_sun_in_window(orientation: f64, noffset: f64, poffset: f64, azimuth: f64) -> bool {
    let low = orientation - noffset;
    let high = orientation + poffset;

    if low < 0.0 {
        (360.0 + low <= azimuth && azimuth <= 360.0) || (0.0 <= azimuth && azimuth <= high)
    } else if high > 360.0 {
        (0.0 <= azimuth && azimuth <= high - 360.0) || (low <= azimuth && azimuth <= 360.0)
    } else {
        low <= azimuth && azimuth <= high
    }
}

/// Blind position that keeps direct sunlight within `depth` of the window.
///
/// The height of an object casting a shadow exactly `depth` long is compared
/// against the window's `bottom` and `top`: a shadow shorter than the window
/// bottom needs the blind fully closed (100), one past the top needs it fully
/// open (0), and anything in between is interpolated and rounded up to the
/// next multiple of `increment`. The result is not clamped to the blind's
/// `maxopen`/`maxclosed` limits.
pub fn position_from_shadow(altitude: f64, depth: f64, top: f64, bottom: f64, increment: u8) -> u8 {
    let height = altitude.to_radians().tan() * depth;

    if height <= bottom {
        100
    } else if height >= top {
        0
    } else {
        let raw = (100.0 * (1.0 - (height - bottom) / (top - bottom))).ceil();
        quantize_up(raw.clamp(0.0, 100.0) as u32, increment)
    }
}

/// Round up to the next multiple of `increment`, capped at 100
pub fn quantize_up(position: u32, increment: u8) -> u8 {
    let increment = u32::from(increment.max(1));
    position.div_ceil(increment).saturating_mul(increment).min(100) as u8
}

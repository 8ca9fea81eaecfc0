use shadesync_api::{SunPayload, WeatherPayload};

use crate::error::EngineError;
use crate::validation::Violations;

/// Sun reading in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub sun_in_sky: bool,
    pub altitude: f64,
    pub azimuth: f64,
}

impl TryFrom<&SunPayload> for SunPosition {
    type Error = EngineError;

    fn try_from(payload: &SunPayload) -> Result<Self, Self::Error> {
        let mut violations = Violations::new();

        let sun_in_sky = violations.required("sunInSky", payload.sun_in_sky);
        let altitude = violations.required("altitude", payload.altitude);
        let altitude = violations.in_range("altitude", altitude, -90.0..=90.0);
        let azimuth = violations.required("azimuth", payload.azimuth);
        let azimuth = violations.in_range("azimuth", azimuth, 0.0..=360.0);

        match (sun_in_sky, altitude, azimuth) {
            (Some(sun_in_sky), Some(altitude), Some(azimuth)) if violations.is_empty() => Ok(Self {
                sun_in_sky,
                altitude,
                azimuth,
            }),
            _ => Err(violations.into_error()),
        }
    }
}

/// Weather reading; absent fields disable the matching thresholds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weather {
    pub clouds: Option<f64>,
    pub max_temp: Option<f64>,
    pub uv_index: Option<f64>,
}

impl TryFrom<&WeatherPayload> for Weather {
    type Error = EngineError;

    fn try_from(payload: &WeatherPayload) -> Result<Self, Self::Error> {
        let mut violations = Violations::new();

        let clouds = violations.in_range("clouds", payload.clouds, 0.0..=1.0);
        let max_temp = violations.finite("maxtemp", payload.maxtemp);
        let uv_index = violations.in_range("uvindex", payload.uvindex, 0.0..=20.0);

        if violations.is_empty() {
            Ok(Self {
                clouds,
                max_temp,
                uv_index,
            })
        } else {
            Err(violations.into_error())
        }
    }
}

/// Last known readings shared by every blind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub sun: Option<SunPosition>,
    pub weather: Weather,
}

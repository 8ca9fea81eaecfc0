use std::collections::BTreeMap;

use shadesync_api::ReasonCode;

/// Human-readable descriptions for reason codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonCatalog {
    descriptions: BTreeMap<ReasonCode, String>,
}

impl ReasonCatalog {
    pub fn english() -> Self {
        let descriptions = ReasonCode::ALL
            .into_iter()
            .map(|code| (code, english_description(code).to_string()))
            .collect();

        Self { descriptions }
    }

    /// English catalog with the given entries replaced, e.g. for a translation
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (ReasonCode, String)>,
    {
        let mut catalog = Self::english();
        catalog.descriptions.extend(overrides);
        catalog
    }

    pub fn describe(&self, code: ReasonCode) -> &str {
        self.descriptions
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| english_description(code))
    }
}

impl Default for ReasonCatalog {
    fn default() -> Self {
        Self::english()
    }
}

fn english_description(code: ReasonCode) -> &'static str {
    match code {
        ReasonCode::Manual => "Manually set",
        ReasonCode::SunBelowHorizon => "Sun below horizon",
        ReasonCode::BelowAltitudeThreshold => "Sun below altitude threshold",
        ReasonCode::SunNotInWindow => "Sun not in window",
        ReasonCode::SunInWindow => "Sun in window",
        ReasonCode::Overcast => "Overcast conditions",
        ReasonCode::HighTemperature => "Temperature forecast above threshold",
        ReasonCode::HighUvIndex => "UV index above threshold",
    }
}

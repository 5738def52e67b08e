//! Geographic bands for poverty guideline lookup.

use serde::{Deserialize, Serialize};

/// The 50 states, the District of Columbia, and the inhabited territories.
pub const RECOGNIZED_STATE_CODES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC", "PR", "GU", "VI", "AS", "MP",
];

/// A poverty guideline region. HHS publishes one table per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicBand {
    /// The 48 contiguous states, DC, and every other code.
    Continental,
    /// Alaska.
    Alaska,
    /// Hawaii.
    Hawaii,
}

impl GeographicBand {
    /// All bands, in table order.
    pub const ALL: [GeographicBand; 3] = [
        GeographicBand::Continental,
        GeographicBand::Alaska,
        GeographicBand::Hawaii,
    ];

    /// Selects the band for a state code.
    ///
    /// Matching ignores case and surrounding whitespace. Codes other than
    /// `AK` and `HI`, including unrecognized ones, use the continental band.
    ///
    /// # Examples
    ///
    /// ```
    /// use fee_waiver_engine::models::GeographicBand;
    ///
    /// assert_eq!(GeographicBand::for_state("ak"), GeographicBand::Alaska);
    /// assert_eq!(GeographicBand::for_state("CA"), GeographicBand::Continental);
    /// assert_eq!(GeographicBand::for_state("??"), GeographicBand::Continental);
    /// ```
    pub fn for_state(state_code: &str) -> Self {
        match normalize_state_code(state_code).as_str() {
            "AK" => GeographicBand::Alaska,
            "HI" => GeographicBand::Hawaii,
            _ => GeographicBand::Continental,
        }
    }

    /// Returns the wire name of this band.
    pub fn as_str(self) -> &'static str {
        match self {
            GeographicBand::Continental => "continental",
            GeographicBand::Alaska => "alaska",
            GeographicBand::Hawaii => "hawaii",
        }
    }
}

/// Upper-cases and trims a state code.
pub fn normalize_state_code(state_code: &str) -> String {
    state_code.trim().to_ascii_uppercase()
}

/// Returns true if the code names a state, DC, or an inhabited territory.
pub fn is_recognized_state_code(state_code: &str) -> bool {
    let normalized = normalize_state_code(state_code);
    RECOGNIZED_STATE_CODES.contains(&normalized.as_str())
}

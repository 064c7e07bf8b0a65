//! Air quality classification
//!
//! Each tier is inclusive of its upper bound: 550 ppm is still Ideal, 551 is Good.

use serde::{Deserialize, Serialize};

/// Air quality tier for a CO2 concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AirQuality {
    /// At or below the ideal bound
    #[serde(rename = "ideal")]
    Ideal,
    /// Acceptable
    #[serde(rename = "good")]
    Good,
    /// Ventilation advised
    #[serde(rename = "concerning")]
    Concerning,
    /// Above every bound
    #[serde(rename = "poor")]
    Poor,
}

impl AirQuality {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            AirQuality::Ideal => "Ideal",
            AirQuality::Good => "Good",
            AirQuality::Concerning => "Concerning",
            AirQuality::Poor => "Poor",
        }
    }

    /// Severity rank, 1 (Ideal) to 4 (Poor)
    pub fn tier(&self) -> u8 {
        match self {
            AirQuality::Ideal => 1,
            AirQuality::Good => 2,
            AirQuality::Concerning => 3,
            AirQuality::Poor => 4,
        }
    }
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds (inclusive) of the first three tiers, in ppm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Highest Ideal level
    pub ideal_max: f64,
    /// Highest Good level
    pub good_max: f64,
    /// Highest Concerning level; anything above is Poor
    pub concerning_max: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            ideal_max: 550.0,
            good_max: 800.0,
            concerning_max: 1000.0,
        }
    }
}

impl StatusThresholds {
    /// Tier for `ppm` under these bounds
    pub fn classify(&self, ppm: f64) -> AirQuality {
        if ppm <= self.ideal_max {
            AirQuality::Ideal
        } else if ppm <= self.good_max {
            AirQuality::Good
        } else if ppm <= self.concerning_max {
            AirQuality::Concerning
        } else {
            AirQuality::Poor
        }
    }

    /// Whether the bounds are finite, positive and strictly ascending
    pub fn is_ascending(&self) -> bool {
        let bounds = [self.ideal_max, self.good_max, self.concerning_max];
        bounds.iter().all(|b| b.is_finite() && *b > 0.0) && bounds.windows(2).all(|w| w[0] < w[1])
    }
}

/// Classify with the default thresholds
pub fn classify(ppm: f64) -> AirQuality {
    StatusThresholds::default().classify(ppm)
}

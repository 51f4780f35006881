use serde::{Deserialize, Serialize};

/// Coarse weather classification reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clouds,
    Haze,
    Rain,
    Clear,
    Drizzle,
    Snow,
    /// Anything else the provider sends, e.g. "Thunderstorm" or "Mist".
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::Clouds => "Clouds",
            Condition::Haze => "Haze",
            Condition::Rain => "Rain",
            Condition::Clear => "Clear",
            Condition::Drizzle => "Drizzle",
            Condition::Snow => "Snow",
            Condition::Other(name) => name,
        }
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        match value {
            "Clouds" => Condition::Clouds,
            "Haze" => Condition::Haze,
            "Rain" => Condition::Rain,
            "Clear" => Condition::Clear,
            "Drizzle" => Condition::Drizzle,
            "Snow" => Condition::Snow,
            other => Condition::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::from(value.as_str())
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one place, as returned by a single successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub place: String,
    pub country: String,
    pub condition: Condition,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: Option<f64>,
    /// Metres, as reported by the provider.
    pub visibility_m: Option<f64>,
}

impl WeatherReading {
    /// Visibility in kilometres, unrounded.
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m.map(|m| m / 1000.0)
    }
}

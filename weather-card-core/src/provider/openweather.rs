use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::FetchError,
    model::{Condition, WeatherReading},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CURRENT_WEATHER_PATH)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn current_weather(&self, place: &str) -> Result<WeatherReading, FetchError> {
        debug!("requesting current weather");

        let res = self
            .http
            .get(self.current_url())
            .query(&[("q", place), ("units", UNITS), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                warn!(error = %e, "request to OpenWeather failed");
                FetchError::new(format!("Failed to reach OpenWeather: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "failed to read OpenWeather response body");
            FetchError::new(format!("Failed to read OpenWeather response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather returned an error");
            return Err(FetchError::new(error_message(status, &body)));
        }

        parse_current(&body)
    }
}

/// Message from the provider's error body, or a generic one if it has none.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<OwError>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!("OpenWeather request failed with status {status}: {}", truncate_body(body))
        })
}

fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "failed to parse OpenWeather JSON");
        FetchError::new(format!("Failed to parse OpenWeather response: {e}"))
    })?;

    let weather = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::new("OpenWeather response contained no weather conditions"))?;

    Ok(WeatherReading {
        place: parsed.name,
        country: parsed.sys.and_then(|s| s.country).unwrap_or_default(),
        condition: Condition::from(weather.main),
        description: weather.description,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.and_then(|w| w.speed),
        visibility_m: parsed.visibility,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    const LONDON: &str = r#"{
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18.73, "feels_like": 17.9, "temp_min": 17.0, "temp_max": 20.1, "pressure": 1016, "humidity": 64},
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 240},
        "sys": {"country": "GB"},
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn parses_current_conditions() {
        let reading = parse_current(LONDON).unwrap();

        assert_eq!(reading.place, "London");
        assert_eq!(reading.country, "GB");
        assert_eq!(reading.condition, Condition::Clear);
        assert_eq!(reading.description, "clear sky");
        assert_eq!(reading.temperature_c, 18.73);
        assert_eq!(reading.feels_like_c, 17.9);
        assert_eq!(reading.humidity_pct, 64);
        assert_eq!(reading.wind_speed_mps, Some(4.12));
        assert_eq!(reading.visibility_m, Some(10000.0));
    }

    #[test]
    fn missing_wind_and_visibility_are_tolerated() {
        let body = r#"{
            "weather": [{"main": "Mist", "description": "mist"}],
            "main": {"temp": 3.0, "feels_like": 1.0, "humidity": 93},
            "sys": {},
            "name": "Nowhere"
        }"#;

        let reading = parse_current(body).unwrap();
        assert_eq!(reading.wind_speed_mps, None);
        assert_eq!(reading.visibility_m, None);
        assert_eq!(reading.country, "");
        assert_eq!(reading.condition, Condition::Other("Mist".into()));
    }

    #[test]
    fn wind_without_speed_is_tolerated() {
        let body = r#"{
            "weather": [{"main": "Clouds", "description": "few clouds"}],
            "main": {"temp": 9.0, "feels_like": 7.5, "humidity": 80},
            "wind": {"deg": 200},
            "visibility": 8000,
            "sys": {"country": "NO"},
            "name": "Bergen"
        }"#;

        let reading = parse_current(body).unwrap();
        assert_eq!(reading.wind_speed_mps, None);
        assert_eq!(reading.visibility_m, Some(8000.0));
    }

    #[test]
    fn empty_weather_list_is_an_error() {
        let body = r#"{"weather": [], "main": {"temp": 1.0, "feels_like": 1.0, "humidity": 1}, "name": "X"}"#;
        let err = parse_current(body).unwrap_err();
        assert!(err.message().contains("no weather conditions"));
    }

    #[test]
    fn error_message_prefers_provider_message() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"cod":"404","message":"city not found"}"#);
        assert_eq!(msg, "city not found");
    }

    #[test]
    fn error_message_falls_back_to_status_and_body() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(msg.contains("502"));
        assert!(msg.contains("<html>bad gateway</html>"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn current_url_joins_base_and_path() {
        let p = OpenWeatherProvider::with_base_url("K".into(), "http://localhost:1234/");
        assert_eq!(p.current_url(), "http://localhost:1234/data/2.5/weather");
    }
}

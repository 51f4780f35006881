//! OpenWeather provider against a mock HTTP server.

use weather_card_core::{Condition, Icon, OpenWeatherProvider, WeatherProvider};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn london_clear() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "base": "stations",
        "main": {
            "temp": 21.64,
            "feels_like": 21.2,
            "temp_min": 20.1,
            "temp_max": 22.9,
            "pressure": 1021,
            "humidity": 52
        },
        "visibility": 10000,
        "wind": {"speed": 5.14, "deg": 250},
        "clouds": {"all": 0},
        "dt": 1_700_000_000,
        "sys": {"country": "GB", "sunrise": 1_699_990_000, "sunset": 1_700_020_000},
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".into(), server.uri())
}

#[tokio::test]
async fn sends_place_units_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_clear()))
        .expect(1)
        .mount(&server)
        .await;

    let reading = provider_for(&server).current_weather("London").await.unwrap();

    assert_eq!(reading.place, "London");
    assert_eq!(reading.country, "GB");
    assert_eq!(reading.condition, Condition::Clear);
    assert_eq!(Icon::for_condition(&reading.condition), Some(Icon::Sunny));
    assert_eq!(reading.temperature_c.trunc() as i64, 21);
    assert_eq!(reading.humidity_pct, 52);
    assert_eq!(reading.wind_speed_mps, Some(5.14));
    assert_eq!(reading.visibility_km(), Some(10.0));
}

#[tokio::test]
async fn place_with_spaces_is_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_clear()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(provider_for(&server).current_weather("New York").await.is_ok());
}

#[tokio::test]
async fn unknown_place_surfaces_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server).current_weather("Atlantis").await.unwrap_err();
    assert_eq!(err.message(), "city not found");
}

#[tokio::test]
async fn invalid_key_surfaces_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).current_weather("London").await.unwrap_err();
    assert!(err.message().starts_with("Invalid API key"));
}

#[tokio::test]
async fn error_without_json_body_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = provider_for(&server).current_weather("London").await.unwrap_err();
    assert!(err.message().contains("503"));
    assert!(err.message().contains("upstream down"));
}

#[tokio::test]
async fn malformed_success_body_is_a_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": \"London\"}"))
        .mount(&server)
        .await;

    let err = provider_for(&server).current_weather("London").await.unwrap_err();
    assert!(err.message().contains("Failed to parse OpenWeather response"));
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_error_without_key_leak() {
    // Grab a free port, then close it again.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let provider =
        OpenWeatherProvider::with_base_url("SECRET_KEY".into(), format!("http://127.0.0.1:{port}"));
    let err = provider.current_weather("London").await.unwrap_err();

    assert!(err.message().starts_with("Failed to reach OpenWeather"));
    assert!(!err.message().contains("SECRET_KEY"));
}

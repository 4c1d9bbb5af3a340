//! Integration tests for WeatherAggregator using wiremock.
//!
//! These tests run the Open-Meteo client against a mock HTTP server and check
//! the degradation rules for each feed.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use serde_json::{Value, json};
use skycast_core::{
    ConditionCode, Coordinate, DataMode, Endpoints, FetchSettings, Locale, Location,
    OpenMeteoClient, PollenLevel, WeatherAggregator,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/v1/forecast";
const AIR_QUALITY_PATH: &str = "/v1/air-quality";

/// Forecast body with `hours` hourly samples and seven days.
fn forecast_body(hours: usize) -> Value {
    let times: Vec<String> = (0..hours)
        .map(|h| format!("2026-10-{:02}T{:02}:00", 17 + h / 24, h % 24))
        .collect();

    json!({
        "latitude": 38.72,
        "longitude": -9.14,
        "timezone": "Europe/Lisbon",
        "current": {
            "time": "2026-10-17T15:00",
            "temperature_2m": 21.3,
            "relative_humidity_2m": 62,
            "apparent_temperature": 20.8,
            "precipitation": 0.0,
            "weather_code": 2,
            "wind_speed_10m": 14.8,
            "uv_index": 4.1
        },
        "hourly": {
            "time": times,
            "temperature_2m": (0..hours).map(|h| 15.0 + (h % 24) as f64 * 0.5).collect::<Vec<_>>(),
            "precipitation_probability": (0..hours)
                .map(|h| if h % 3 == 0 { json!(null) } else { json!(30) })
                .collect::<Vec<_>>(),
            "weather_code": (0..hours).map(|h| if h < 12 { 2 } else { 80 }).collect::<Vec<_>>()
        },
        "daily": {
            "time": [
                "2026-10-17", "2026-10-18", "2026-10-19", "2026-10-20",
                "2026-10-21", "2026-10-22", "2026-10-23"
            ],
            "weather_code": [2, 61, 95, 3, 0, 71, 45],
            "temperature_2m_max": [23.1, 19.4, 18.0, 20.2, 24.9, 5.1, 17.7],
            "temperature_2m_min": [14.2, 13.0, 12.5, 11.9, 15.5, -2.4, 10.0],
            "precipitation_probability_max": [10, 80, 95, 20, 0, 60, 15]
        }
    })
}

fn air_quality_body() -> Value {
    json!({
        "current": {
            "time": "2026-10-17T15:00",
            "european_aqi": 38,
            "pm10": 14.2,
            "pm2_5": 6.3,
            "nitrogen_dioxide": 11.0,
            "ozone": 61.5,
            "sulphur_dioxide": 1.4,
            "grass_pollen": 60.0,
            "birch_pollen": 10.0
        }
    })
}

fn lisbon() -> Location {
    Location::new("Lisbon", Some("Alfama".to_string()), Coordinate::new(38.7223, -9.1393))
}

fn aggregator(server: &MockServer, forecast_timeout: Duration) -> WeatherAggregator {
    let endpoints = Endpoints {
        forecast_url: format!("{}{FORECAST_PATH}", server.uri()),
        air_quality_url: format!("{}{AIR_QUALITY_PATH}", server.uri()),
    };
    let settings = FetchSettings {
        forecast_timeout,
        air_quality_timeout: forecast_timeout.min(Duration::from_millis(300)),
        locale: Locale::En,
    };
    WeatherAggregator::new(Arc::new(OpenMeteoClient::new(endpoints)), settings)
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_live_snapshot_from_both_feeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "38.7223"))
        .and(query_param("longitude", "-9.1393"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(168)))
        .mount(&mock_server)
        .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(air_quality_body()),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;

    assert_eq!(snap.mode, DataMode::Live);
    assert_eq!(snap.location, lisbon());
    assert_eq!(snap.current.temperature, 21);
    assert_eq!(snap.current.condition, ConditionCode::PartlyCloudy);
    assert_eq!(snap.current.description, "Partly Cloudy");
    assert_eq!(snap.current.aqi, 38);
    assert_eq!(snap.current.pollen_level, PollenLevel::High);
    assert_eq!(snap.current.pollutants.o3, 61.5);

    assert_eq!(snap.hourly.len(), 24);
    assert_eq!(snap.hourly[0].label, "00:00");
    assert_eq!(snap.hourly[23].label, "23:00");
    assert_eq!(snap.hourly[0].precipitation_chance, 0);
    assert_eq!(snap.hourly[1].precipitation_chance, 30);
    assert_eq!(snap.hourly[12].condition, ConditionCode::Rain);

    assert_eq!(snap.daily.len(), 7);
    assert_eq!(snap.daily[0].day_label, "Sat");
    assert_eq!(snap.daily[2].condition, ConditionCode::Storm);
    assert_eq!(snap.daily[5].min_temp, -2);

    assert!(snap.alerts.is_empty());
}

#[tokio::test]
async fn test_air_quality_error_degrades_to_defaults() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200).set_body_json(forecast_body(48)),
    )
    .await;
    mount(&mock_server, AIR_QUALITY_PATH, ResponseTemplate::new(500).set_body_string("boom")).await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;

    assert_eq!(snap.mode, DataMode::Live);
    assert_eq!(snap.current.aqi, 30);
    assert_eq!(snap.current.pollen_level, PollenLevel::Low);
    assert_eq!(snap.current.pollutants.pm2_5, 0.0);
    assert_eq!(snap.current.temperature, 21);
}

#[tokio::test]
async fn test_partial_air_quality_is_read_field_by_field() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200).set_body_json(forecast_body(24)),
    )
    .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "current": { "pm10": 22.0, "ozone": null } })),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;

    assert_eq!(snap.current.aqi, 30);
    assert_eq!(snap.current.pollutants.pm10, 22.0);
    assert_eq!(snap.current.pollutants.o3, 0.0);
}

#[tokio::test]
async fn test_slow_air_quality_does_not_block_snapshot() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200).set_body_json(forecast_body(24)),
    )
    .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200)
            .set_body_json(air_quality_body())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let started = Instant::now();
    let snap = aggregator(&mock_server, Duration::from_secs(2)).fetch(lisbon()).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(snap.mode, DataMode::Live);
    assert_eq!(snap.current.aqi, 30);
}

#[tokio::test]
async fn test_forecast_error_status_serves_fallback() {
    let mock_server = MockServer::start().await;

    mount(&mock_server, FORECAST_PATH, ResponseTemplate::new(503)).await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(air_quality_body()),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;

    assert_eq!(snap.mode, DataMode::Fallback);
    assert_eq!(snap.location, lisbon());
    assert_eq!(snap.hourly.len(), 24);
    assert_eq!(snap.daily.len(), 7);
    assert!(snap.alerts.is_empty());
    assert_eq!(snap.current.aqi, 30);
}

#[tokio::test]
async fn test_malformed_forecast_serves_fallback() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "current": { "temperature_2m": 20.0 }, "hourly": {} })),
    )
    .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(air_quality_body()),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;
    assert_eq!(snap.mode, DataMode::Fallback);

    mock_server.reset().await;
    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;
    assert_eq!(snap.mode, DataMode::Fallback);
}

#[tokio::test]
async fn test_forecast_timeout_serves_fallback_within_bound() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200)
            .set_body_json(forecast_body(24))
            .set_delay(Duration::from_secs(10)),
    )
    .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(air_quality_body()),
    )
    .await;

    let started = Instant::now();
    let snap = aggregator(&mock_server, Duration::from_millis(500)).fetch(lisbon()).await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(snap.mode, DataMode::Fallback);
    assert_eq!(snap.hourly.len(), 24);
    assert_eq!(snap.daily.len(), 7);
}

#[tokio::test]
async fn test_unreachable_upstream_serves_fallback() {
    let endpoints = Endpoints {
        forecast_url: "http://127.0.0.1:1/v1/forecast".to_string(),
        air_quality_url: "http://127.0.0.1:1/v1/air-quality".to_string(),
    };
    let settings = FetchSettings {
        forecast_timeout: Duration::from_secs(2),
        air_quality_timeout: Duration::from_secs(1),
        locale: Locale::Pt,
    };
    let agg = WeatherAggregator::new(Arc::new(OpenMeteoClient::new(endpoints)), settings);

    let snap = agg.fetch_coordinate(Coordinate::new(-23.5505, -46.6333), "São Paulo", None).await;

    assert_eq!(snap.mode, DataMode::Fallback);
    assert_eq!(snap.location.display_name, "São Paulo");
    assert_eq!(snap.current.description, "Parcialmente Nublado");
    assert_eq!(snap.hourly.len(), 24);
    assert_eq!(snap.daily.len(), 7);
}

#[tokio::test]
async fn test_repeated_fetches_are_identical() {
    let mock_server = MockServer::start().await;

    mount(
        &mock_server,
        FORECAST_PATH,
        ResponseTemplate::new(200).set_body_json(forecast_body(169)),
    )
    .await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(air_quality_body()),
    )
    .await;

    let agg = aggregator(&mock_server, Duration::from_secs(5));
    let first = agg.fetch(lisbon()).await;
    let second = agg.fetch(lisbon()).await;

    assert_eq!(first.current, second.current);
    assert_eq!(first.hourly, second.hourly);
    assert_eq!(first.daily, second.daily);
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize"),
        serde_json::to_vec(&second).expect("serialize")
    );

    // no memoization: every fetch hits both endpoints
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_severe_weather_alerts_flow_through() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body(24);
    body["current"]["weather_code"] = json!(96);
    body["current"]["wind_speed_10m"] = json!(65.0);
    body["current"]["precipitation"] = json!(6.0);
    body["current"]["temperature_2m"] = json!(36.0);

    mount(&mock_server, FORECAST_PATH, ResponseTemplate::new(200).set_body_json(body)).await;
    mount(
        &mock_server,
        AIR_QUALITY_PATH,
        ResponseTemplate::new(200).set_body_json(json!({ "current": { "european_aqi": 85 } })),
    )
    .await;

    let snap = aggregator(&mock_server, Duration::from_secs(5)).fetch(lisbon()).await;

    let ids: Vec<_> = snap.alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["heat", "storm", "wind", "air-quality", "heavy-rain"]);
    assert_eq!(snap.current.condition, ConditionCode::Storm);
}

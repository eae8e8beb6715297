//! Integration tests for the geocoder and weather provider using wiremock.

use lawn_core::{AppError, NetworkError, ProviderConfig};
use lawn_weather::{Coordinates, Sky, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> WeatherProvider {
    let config = ProviderConfig {
        geocoding_url: server.uri(),
        forecast_url: server.uri(),
        air_quality_url: server.uri(),
        timeout_secs: 5,
    };
    WeatherProvider::new(&config).unwrap()
}

fn newton(admin1: &str, lat: f64, lon: f64) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Newton",
        "latitude": lat,
        "longitude": lon,
        "country_code": "US",
        "country": "United States",
        "admin1": admin1
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 41.05,
        "longitude": -74.75,
        "current_units": {
            "temperature_2m": "°F",
            "rain": "inch",
            "wind_speed_10m": "mp/h",
            "snow_depth": "m"
        },
        "current": {
            "time": "2026-10-18T09:00",
            "interval": 900,
            "temperature_2m": 58.4,
            "rain": 0.0,
            "wind_speed_10m": 6.3,
            "wind_gusts_10m": 21.0,
            "snow_depth": 0.0,
            "weather_code": 3
        },
        "daily_units": {
            "precipitation_sum": "inch"
        },
        "daily": {
            "time": ["2026-10-18"],
            "precipitation_sum": [0.31]
        }
    })
}

async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("precipitation_unit", "inch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_prefers_qualified_region() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Newton"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                newton("Massachusetts", 42.337, -71.209),
                newton("Kansas", 38.046, -97.345),
                newton("New Jersey", 41.058, -74.752),
            ]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let candidates = provider.geocoder().search("Newton, NJ", 2).await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].admin1.as_deref(), Some("New Jersey"));
    assert_eq!(candidates[1].admin1.as_deref(), Some("Massachusetts"));
}

#[tokio::test]
async fn test_search_with_no_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generationtime_ms": 0.5 })),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let candidates = provider.geocoder().search("Atlantis", 5).await.unwrap();
    assert!(candidates.is_empty());

    let err = provider.geocoder().resolve_first("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::LocationNotFound(q) if q == "Atlantis"));
}

#[tokio::test]
async fn test_fetch_conditions() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;

    let provider = provider_for(&server);
    let conditions = provider
        .fetch_conditions(Coordinates {
            latitude: 41.05,
            longitude: -74.75,
        })
        .await
        .unwrap();

    assert_eq!(conditions.temperature_f, 58.4);
    assert_eq!(conditions.wind_speed_mph, 6.3);
    assert_eq!(conditions.wind_gust_mph, 21.0);
    assert_eq!(conditions.precipitation_today_in, 0.31);
    assert_eq!(conditions.snow_depth_m, 0.0);
    assert_eq!(conditions.sky, Sky::Clouds);
}

#[tokio::test]
async fn test_fetch_conditions_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .fetch_conditions(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .unwrap_err();

    match err {
        WeatherError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream down"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_conditions_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temperature_2m": "warm" }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .fetch_conditions(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_air_quality_excludes_null_species() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "time": "2026-10-18T09:00",
                "alder_pollen": null,
                "birch_pollen": 4.0,
                "grass_pollen": 57.0,
                "mugwort_pollen": null,
                "olive_pollen": null,
                "ragweed_pollen": 9.5
            }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let pollen = provider
        .fetch_air_quality(Coordinates {
            latitude: 41.05,
            longitude: -74.75,
        })
        .await
        .unwrap();

    assert_eq!(pollen.reported_count(), 3);
    assert_eq!(pollen.max_index(), 57.0);
}

#[tokio::test]
async fn test_lookup_degrades_when_air_quality_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [newton("New Jersey", 41.058, -74.752)]
        })))
        .mount(&server)
        .await;
    mount_forecast(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let readings = provider.lookup("Newton", 5).await.unwrap();

    assert_eq!(readings.place.name, "Newton");
    assert_eq!(readings.conditions.temperature_f, 58.4);
    assert_eq!(readings.pollen.reported_count(), 0);
    assert_eq!(readings.pollen.max_index(), 0.0);
}

#[tokio::test]
async fn test_lookup_fails_when_weather_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [newton("New Jersey", 41.058, -74.752)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "grass_pollen": 5.0 }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.lookup("Newton", 5).await.unwrap_err();

    let core: lawn_core::WeatherError = err.into();
    assert!(matches!(core, lawn_core::WeatherError::DataUnavailable(_)));
}

#[tokio::test]
async fn test_slow_forecast_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ProviderConfig {
        geocoding_url: server.uri(),
        forecast_url: server.uri(),
        air_quality_url: server.uri(),
        timeout_secs: 1,
    };
    let provider = WeatherProvider::new(&config).unwrap();
    let err = provider
        .fetch_conditions(Coordinates {
            latitude: 41.05,
            longitude: -74.75,
        })
        .await
        .unwrap_err();

    let app: AppError = err.into();
    assert!(matches!(app, AppError::Network(NetworkError::Timeout)));
}

#[tokio::test]
async fn test_refused_connection_maps_to_connection_failed() {
    // Nothing listens on the discard port
    let config = ProviderConfig {
        geocoding_url: "http://127.0.0.1:9".into(),
        forecast_url: "http://127.0.0.1:9".into(),
        air_quality_url: "http://127.0.0.1:9".into(),
        timeout_secs: 5,
    };
    let provider = WeatherProvider::new(&config).unwrap();
    let err = provider.lookup("Newton", 5).await.unwrap_err();

    let app: AppError = err.into();
    assert!(matches!(app, AppError::Network(NetworkError::ConnectionFailed(_))));
    assert!(!app.is_location_not_found());
}

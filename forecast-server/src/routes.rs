//! HTTP surface: route table, handlers, and the outermost safety layers.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use forecast_core::ForecastResolver;

use crate::error::ApiError;

pub fn router(resolver: ForecastResolver) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/weather/{city_id}", get(weather))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(resolver)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "台灣縣市天氣預報 API",
        "endpoints": {
            "weather": "/api/weather/:cityId",
            "health": "/api/health",
        },
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn weather(
    State(resolver): State<ForecastResolver>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = resolver.resolve(&city_id).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::route_not_found(&method, &uri)
}

/// Last-resort net: a panicking handler still answers with the generic
/// JSON envelope instead of tearing down the connection.
fn handle_panic(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    ApiError::internal().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use forecast_core::{Config, valid_city_ids};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(api_key: Option<&str>, api_base: &str) -> Router {
        let config = Config {
            api_key: api_key.map(str::to_string),
            port: 0,
            api_base: api_base.to_string(),
            environment: "test".to_string(),
        };
        router(ForecastResolver::new(&config))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn service_descriptor_lists_endpoints() {
        let (status, body) = get_json(app(None, "http://unused"), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());
        assert_eq!(body["endpoints"]["health"], "/api/health");
        assert!(body["endpoints"]["weather"].as_str().unwrap().contains("/api/weather"));
    }

    #[tokio::test]
    async fn health_reports_ok_with_iso8601_timestamp() {
        let (status, body) = get_json(app(None, "http://unused"), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");

        let timestamp = body["timestamp"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
    }

    #[tokio::test]
    async fn unmatched_route_echoes_method_and_path() {
        let (status, body) = get_json(app(None, "http://unused"), "/foo").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("GET /foo"));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn wrong_method_on_known_path_is_also_a_404() {
        let response = app(None, "http://unused")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].as_str().unwrap().contains("POST /api/health"));
    }

    #[tokio::test]
    async fn unknown_city_is_a_400_listing_valid_ids() {
        let (status, body) = get_json(app(Some("key"), "http://unused"), "/api/weather/unknown").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "無效的城市 ID");

        let message = body["message"].as_str().unwrap();
        assert!(message.contains("unknown"));
        for id in valid_city_ids() {
            assert!(message.contains(id));
        }
    }

    #[tokio::test]
    async fn missing_credential_is_a_500_before_any_network_call() {
        let (status, body) = get_json(app(None, "http://unused"), "/api/weather/taipei").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "伺服器設定錯誤");
    }

    #[tokio::test]
    async fn forecast_success_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/rest/datastore/F-C0032-001"))
            .and(query_param("Authorization", "test-key"))
            .and(query_param("locationName", "高雄市"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": {
                    "datasetDescription": "三十六小時天氣預報",
                    "location": [{
                        "locationName": "高雄市",
                        "weatherElement": [
                            {"elementName": "Wx", "time": [{
                                "startTime": "2026-08-07 12:00:00",
                                "endTime": "2026-08-07 18:00:00",
                                "parameter": {"parameterName": "晴天"}
                            }]},
                            {"elementName": "PoP", "time": [{
                                "startTime": "2026-08-07 12:00:00",
                                "endTime": "2026-08-07 18:00:00",
                                "parameter": {"parameterName": "10"}
                            }]}
                        ]
                    }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) =
            get_json(app(Some("test-key"), &server.uri()), "/api/weather/kaohsiung").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["city"], "高雄市");
        assert_eq!(body["data"]["forecasts"][0]["weather"], "晴天");
        assert_eq!(body["data"]["forecasts"][0]["rain"], "10%");
    }

    #[tokio::test]
    async fn upstream_503_passes_through_with_details() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/rest/datastore/F-C0032-001"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})),
            )
            .mount(&server)
            .await;

        let (status, body) =
            get_json(app(Some("test-key"), &server.uri()), "/api/weather/taipei").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "氣象資料取得失敗");
        assert_eq!(body["details"]["message"], "maintenance");
    }

    #[tokio::test]
    async fn no_location_record_is_a_404() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/rest/datastore/F-C0032-001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": {"datasetDescription": "三十六小時天氣預報", "location": []}
            })))
            .mount(&server)
            .await;

        let (status, body) =
            get_json(app(Some("test-key"), &server.uri()), "/api/weather/hsinchu").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "查無資料");
        assert!(body["message"].as_str().unwrap().contains("新竹市"));
    }

    #[tokio::test]
    async fn panicking_handler_still_answers_with_the_envelope() {
        async fn boom() {
            panic!("boom")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "伺服器發生錯誤");
    }
}

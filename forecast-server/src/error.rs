//! JSON error envelope and resolver-error → HTTP status mapping.

use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use forecast_core::ResolveError;

/// Envelope returned by every failing route: `{error, message, [details]}`.
///
/// User-visible strings are Traditional Chinese; the service's sole consumer
/// is a zh-TW frontend.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn route_not_found(method: &Method, uri: &Uri) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "找不到路由",
            message: format!("{method} {uri} 不存在"),
            details: None,
        }
    }

    /// Generic envelope for anything the pipeline did not classify, including
    /// panics caught by the outermost layer.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "伺服器發生錯誤",
            message: "無法取得氣象資料，請稍後再試".to_string(),
            details: None,
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidCity { input, valid } => Self {
                status: StatusCode::BAD_REQUEST,
                error: "無效的城市 ID",
                message: format!(
                    "'{input}' 不是支援的城市，可用的城市：{}",
                    valid.join(", ")
                ),
                details: None,
            },
            ResolveError::MissingApiKey => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "伺服器設定錯誤",
                message: "尚未設定氣象資料授權碼，請聯絡管理員".to_string(),
                details: None,
            },
            // reqwest and axum share the same `http` StatusCode type, so the
            // upstream status passes through untranslated.
            ResolveError::Upstream { status, body } => Self {
                status,
                error: "氣象資料取得失敗",
                message: format!("中央氣象署回應異常狀態 {status}"),
                details: Some(upstream_details(&body)),
            },
            ResolveError::NoData { location } => Self {
                status: StatusCode::NOT_FOUND,
                error: "查無資料",
                message: format!("找不到 {location} 的天氣預報資料"),
                details: None,
            },
            ResolveError::MalformedUpstream { reason } => Self {
                status: StatusCode::BAD_GATEWAY,
                error: "氣象資料格式異常",
                message: "中央氣象署回傳的資料格式異常，請稍後再試".to_string(),
                details: Some(Value::String(reason)),
            },
            ResolveError::Network(_) => Self::internal(),
        }
    }
}

/// Upstream error bodies are usually JSON; pass them through structured when
/// they parse, raw otherwise.
fn upstream_details(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

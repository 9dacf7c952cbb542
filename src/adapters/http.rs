use crate::config::credentials::Credentials;
use crate::domain::model::NormalizedNumber;
use crate::domain::ports::AvailabilityService;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_AVAILABILITY_PATH: &str = "/api/v1/handle/availability/imessage";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub availability_path: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            availability_path: DEFAULT_AVAILABILITY_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// relay server 的 iMessage availability API client
pub struct HttpAvailabilityClient {
    client: Client,
    endpoint: Url,
    password: String,
}

impl HttpAvailabilityClient {
    pub fn new(credentials: &Credentials, settings: &ServiceSettings) -> Result<Self> {
        let raw_endpoint = format!(
            "{}{}",
            credentials.server_url.trim_end_matches('/'),
            settings.availability_path
        );
        let endpoint = validation::parse_http_url("server_url", &raw_endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            password: credentials.password.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, number: &NormalizedNumber) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("password", &self.password)
            .append_pair("address", number.as_str());
        url
    }
}

#[async_trait]
impl AvailabilityService for HttpAvailabilityClient {
    async fn is_available(&self, number: &NormalizedNumber) -> Result<bool> {
        // URL 帶有密碼，不要寫進 log
        tracing::debug!("Requesting availability for {} from {}", number, self.endpoint.path());

        let response = self
            .client
            .get(self.request_url(number))
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("API response status for {}: {}", number, response.status());

        // 不做 lossy 解碼，非 UTF-8 的回應直接算查詢失敗
        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        interpret_response(&value)
    }
}

/// 解析 availability 回應
///
/// `status == 200` 且 `data.available` 為 truthy 才算可收訊息。`status` 不是 200
/// 或缺少 `data` 都視為不可用而不是錯誤；只有回應結構本身無法解讀時才回傳 `Err`。
pub fn interpret_response(value: &Value) -> Result<bool> {
    let body = value.as_object().ok_or_else(|| CheckError::ResponseError {
        message: "top-level JSON is not an object".to_string(),
    })?;

    let status_ok = body
        .get("status")
        .and_then(Value::as_f64)
        .map(|status| status == 200.0)
        .unwrap_or(false);
    if !status_ok {
        return Ok(false);
    }

    match body.get("data") {
        None => Ok(false),
        Some(Value::Object(data)) => Ok(data.get("available").map(is_truthy).unwrap_or(false)),
        Some(other) => Err(CheckError::ResponseError {
            message: format!("`data` is not an object: {}", other),
        }),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

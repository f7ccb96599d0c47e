use crate::domain::{
    errors::{InfrastructureError, InfrastructureResult},
    logging::{LogComponent, get_logger},
};
use futures::future::{Either, select};
use gloo::net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub mod coingecko;

pub use coingecko::CoinGeckoClient;

/// HTTP client built on gloo for WASM
pub struct GlooHttpClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    timeout_ms: u32,
}

impl GlooHttpClient {
    pub fn new(base_url: String) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url,
            default_headers,
            timeout_ms: 30000,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn add_header(mut self, key: String, value: String) -> Self {
        self.default_headers.insert(key, value);
        self
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Absolute endpoints pass through untouched
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
        }
    }

    /// GET with JSON decoding, abandoned once `timeout_ms` elapses
    pub async fn get_json<T>(&self, endpoint: &str) -> InfrastructureResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.url_for(endpoint);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET JSON: {}", url));

        let request = Box::pin(self.fetch_json::<T>(&url));
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                get_logger().warn(
                    LogComponent::Infrastructure("HTTP"),
                    &format!("⏱️ GET {} timed out after {} ms", url, self.timeout_ms),
                );
                Err(InfrastructureError::Timeout(self.timeout_ms))
            }
        }
    }

    async fn fetch_json<T>(&self, url: &str) -> InfrastructureResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut request = Request::get(url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InfrastructureError::Network(format!("Request failed: {:?}", e)))?;

        if !HttpUtils::is_success_status(response.status()) {
            let error_msg = format!("HTTP error: {} - {}", response.status(), response.status_text());
            get_logger().error(LogComponent::Infrastructure("HTTP"), &error_msg);
            return Err(InfrastructureError::Network(error_msg));
        }

        let data = response
            .json::<T>()
            .await
            .map_err(|e| InfrastructureError::Serialization(format!("Failed to parse JSON: {:?}", e)))?;

        get_logger().debug(LogComponent::Infrastructure("HTTP"), "✅ GET JSON response parsed successfully");
        Ok(data)
    }
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new("https://api.coingecko.com/api/v3".to_string())
    }
}

/// Helpers for building requests
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Query parameters are emitted in key order so URLs are stable
    pub fn build_url_with_params(base_url: &str, params: &BTreeMap<&str, String>) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string: String = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, Self::url_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query_string)
    }

    /// Minimal percent-encoding for query values
    pub fn url_encode(input: &str) -> String {
        input
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('&', "%26")
            .replace('=', "%3D")
            .replace('?', "%3F")
            .replace('#', "%23")
    }
}

use std::time::Instant;

use async_trait::async_trait;
use edudesk_config::ApiConfig;
use edudesk_core::{ClientError, ClientResult};
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{ApiRequest, Method, Transport};

/// reqwest-backed transport with a client-side timeout and bounded retry for reads.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send_once(&self, request: &ApiRequest) -> ClientResult<Value> {
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        builder = builder.header("X-Request-Id", &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    method = %request.method,
                    path = %request.path,
                    latency_ms = %start.elapsed().as_millis(),
                    error = %e,
                    "Request failed"
                );
                return Err(map_reqwest_error(e));
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_reqwest_error)?;
        let latency = start.elapsed();

        match status {
            200..=299 => {
                info!(
                    request_id = %request_id,
                    method = %request.method,
                    path = %request.path,
                    status = %status,
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
            }
            500..=599 => {
                error!(
                    request_id = %request_id,
                    method = %request.method,
                    path = %request.path,
                    status = %status,
                    latency_ms = %latency.as_millis(),
                    "Server error"
                );
            }
            _ => {
                warn!(
                    request_id = %request_id,
                    method = %request.method,
                    path = %request.path,
                    status = %status,
                    latency_ms = %latency.as_millis(),
                    "Client error"
                );
            }
        }

        if !(200..=299).contains(&status) {
            return Err(ClientError::from_status(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let attempts = if request.method.is_retryable() {
            self.config.retry_attempts + 1
        } else {
            1
        };
        let mut backoff = self.config.retry_backoff();
        let mut attempt = 1;

        loop {
            match self.send_once(&request).await {
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        path = %request.path,
                        attempt,
                        backoff_ms = %backoff.as_millis(),
                        error = %e,
                        "Retrying request"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else if err.is_decode() {
        ClientError::Decode(err.to_string())
    } else {
        ClientError::Network(err.to_string())
    }
}

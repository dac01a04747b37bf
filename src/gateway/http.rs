use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::gateway::{decode_value, CounterGateway, GatewayError};

const COUNTER_PATH: &str = "/counter";
const INCREMENT_PATH: &str = "/counter/increment";
const RESET_PATH: &str = "/counter/reset";

/// Body of every counter endpoint: `{"value": N}`.
#[derive(Debug, Deserialize)]
struct CounterPayload {
    value: Value,
}

/// Counter service reached over HTTP.
///
/// - `GET  {base}/counter`
/// - `POST {base}/counter/increment`
/// - `POST {base}/counter/reset`
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, method: Method, path: &str) -> Result<i64, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Counter request");

        let response = self.client.request(method, &url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: CounterPayload = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        decode_value(&payload.value)
    }
}

impl CounterGateway for HttpGateway {
    async fn get(&self) -> Result<i64, GatewayError> {
        self.call(Method::GET, COUNTER_PATH).await
    }

    async fn increment(&self) -> Result<i64, GatewayError> {
        self.call(Method::POST, INCREMENT_PATH).await
    }

    async fn reset(&self) -> Result<i64, GatewayError> {
        self.call(Method::POST, RESET_PATH).await
    }
}

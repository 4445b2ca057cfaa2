// Trading API (XML RPC) client

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::token_cache::AccessToken;

pub const COMPATIBILITY_LEVEL: u32 = 1193;

// One outbound Trading API call: XML in, raw XML out
#[async_trait]
pub trait TradingApi: Send + Sync + 'static {
    async fn call(
        &self,
        call_name: &str,
        xml_body: String,
        token: &AccessToken,
    ) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct TradingClient {
    http: reqwest::Client,
    endpoint: String,
    site_id: u32,
}

impl TradingClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, site_id: u32) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            site_id,
        }
    }
}

#[async_trait]
impl TradingApi for TradingClient {
    async fn call(
        &self,
        call_name: &str,
        xml_body: String,
        token: &AccessToken,
    ) -> Result<String, ApiError> {
        debug!(call = call_name, site_id = self.site_id, "[TRADING] Sending request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-EBAY-API-CALL-NAME", call_name)
            .header("X-EBAY-API-SITEID", self.site_id.to_string())
            .header(
                "X-EBAY-API-COMPATIBILITY-LEVEL",
                COMPATIBILITY_LEVEL.to_string(),
            )
            .header("X-EBAY-API-IAF-TOKEN", token.value.as_str())
            .header("Content-Type", "text/xml")
            .body(xml_body)
            .send()
            .await
            .map_err(|e| {
                error!(call = call_name, error = %e, "[TRADING] Request failed");
                ApiError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(
                call = call_name,
                status = status.as_u16(),
                error = %e,
                "[TRADING] Reading response failed"
            );
            ApiError::from(e)
        })?;

        if !status.is_success() {
            if body.is_empty() {
                error!(call = call_name, status = status.as_u16(), "[TRADING] HTTP error");
            } else {
                error!(
                    call = call_name,
                    status = status.as_u16(),
                    body = %body,
                    "[TRADING] HTTP error"
                );
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

//! Azure OpenAI provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use revisor_protocols::error::ProviderError;
use revisor_protocols::provider::{ChatProvider, ChatReply, ChatRequest};

use crate::api::{ApiRequest, ApiResponse};
use crate::converter::convert_request;
use crate::parser::{parse_error, parse_response};

/// Connection settings for an Azure OpenAI resource.
///
/// Key and endpoint are optional so the service can start without them;
/// a completion attempted without both fails with `NotConfigured`.
#[derive(Debug, Clone)]
pub struct AzureSettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub api_version: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

/// Azure OpenAI chat-completions provider.
pub struct AzureOpenAIProvider {
    settings: AzureSettings,
    client: reqwest::Client,
}

impl AzureOpenAIProvider {
    pub fn new(settings: AzureSettings) -> Result<Self, ProviderError> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;
        Ok(Self { settings, client })
    }

    /// Whether both API key and endpoint are present.
    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some() && self.settings.endpoint.is_some()
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.settings
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("Azure OpenAI API key is not set".to_string()))
    }

    /// URL of the chat-completions route for `deployment`, without query.
    ///
    /// The deployment always lands in a single path segment, percent-encoded.
    fn chat_url(&self, deployment: &str) -> Result<Url, ProviderError> {
        if matches!(deployment, "" | "." | "..") {
            return Err(ProviderError::InvalidRequest(format!(
                "invalid deployment name {deployment:?}"
            )));
        }

        let endpoint = self.settings.endpoint.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured("Azure OpenAI endpoint is not set".to_string())
        })?;
        let mut url = Url::parse(endpoint).map_err(|e| {
            ProviderError::NotConfigured(format!("Azure OpenAI endpoint is invalid: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::NotConfigured(format!("Azure OpenAI endpoint is not a base URL: {endpoint}"))
            })?
            .pop_if_empty()
            .extend(["openai", "deployments", deployment, "chat", "completions"]);
        Ok(url)
    }

    async fn send_request(
        &self,
        url: Url,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(url)
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status, &text));
        }

        Ok(response)
    }

    fn transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.settings.timeout.as_secs())
        } else {
            ProviderError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAIProvider {
    fn id(&self) -> &str {
        "azure-openai"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError> {
        let api_key = self.api_key()?;
        let url = self.chat_url(&request.deployment)?;
        let api_request = convert_request(&request);

        debug!(
            deployment = %request.deployment,
            messages = api_request.messages.len(),
            "Sending chat completion"
        );

        let response = self.send_request(url, api_key, &api_request).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let reply = parse_response(api_response)?;
        debug!(
            finish_reason = reply.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = reply.usage.total_tokens,
            "Chat completion received"
        );
        Ok(reply)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;

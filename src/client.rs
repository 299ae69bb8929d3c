use std::error::Error as StdError;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{VisionConfig, API_KEY_HEADER};
use crate::error::ToolError;
use crate::models::ImageUrl;
use crate::tools::args::Query;

/// Issues one upstream call per tool invocation and turns the response
/// into tool output. Cheap to clone; holds no mutable state.
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    config: Arc<VisionConfig>,
}

impl VisionClient {
    pub fn new(config: Arc<VisionConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// POST `{"url": ...}` to the endpoint under `segments` and render the
    /// response as `T`.
    pub(crate) async fn post<T>(
        &self,
        segments: &[&str],
        query: &Query,
        body: &ImageUrl,
    ) -> Result<String, ToolError>
    where
        T: DeserializeOwned + Serialize,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| ToolError::Serialization(e.to_string()))?;
        self.send::<T>(Method::POST, segments, query, Some(bytes)).await
    }

    /// GET with no body and no query string.
    pub(crate) async fn get<T>(&self, segments: &[&str]) -> Result<String, ToolError>
    where
        T: DeserializeOwned + Serialize,
    {
        self.send::<T>(Method::GET, segments, &Query::new(), None).await
    }

    /// `{base_url}/{segments...}{?query}`. Each segment is percent-encoded on
    /// its own, so caller-supplied values cannot escape their segment.
    fn endpoint(&self, segments: &[&str], query: &Query) -> Result<Url, ToolError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ToolError::RequestBuild(format!("{}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ToolError::RequestBuild(format!("{} cannot be a base URL", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        if let Some(pairs) = query.pairs() {
            url.set_query(Some(&pairs));
        }
        Ok(url)
    }

    async fn send<T>(
        &self,
        method: Method,
        segments: &[&str],
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<String, ToolError>
    where
        T: DeserializeOwned + Serialize,
    {
        let url = self.endpoint(segments, query)?;

        debug!(
            method = %method,
            url = %url,
            has_query = !query.is_empty(),
            has_body = body.is_some(),
            "vision request"
        );

        let mut builder = self.http.request(method, url.clone());
        if let Some(bytes) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        if let Some(ref key) = self.config.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let request = builder
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|e| ToolError::RequestBuild(error_chain(&e)))?;

        let resp = self.http.execute(request).await.map_err(|e| {
            let message = error_chain(&e);
            warn!(url = %url, error = %message, "vision request failed");
            ToolError::Transport(message)
        })?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| ToolError::ReadBody(error_chain(&e)))?;

        if status >= 400 {
            warn!(url = %url, status, "vision API returned an error");
            return Err(ToolError::Api { status, body: text });
        }

        render::<T>(text)
    }
}

/// `outer: cause: root cause`. reqwest's own `Display` stops at the outer
/// error and hides why a connection failed.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Pretty-print a body that matches `T`; pass anything else through raw.
fn render<T>(text: String) -> Result<String, ToolError>
where
    T: DeserializeOwned + Serialize,
{
    let parsed: T = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "response did not match schema, returning raw body");
            return Ok(text);
        }
    };
    serde_json::to_string_pretty(&parsed).map_err(|e| ToolError::Format(e.to_string()))
}

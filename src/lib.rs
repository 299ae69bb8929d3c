pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tools;

use std::sync::Arc;

use tracing::info;

pub use client::VisionClient;
pub use config::{VisionConfig, API_KEY_HEADER};
pub use error::{ConfigError, ToolError};
pub use tools::{
    AnalyzeImageByDomainTool, AnalyzeImageTool, AreaOfInterestTool, DescribeImageTool,
    DetectObjectsTool, ListModelsTool, RecognizePrintedTextTool, TagImageTool, ToolHandler,
    ToolRegistry, VisionTool,
};

/// Every vision endpoint as a tool, all bound to one shared configuration.
pub fn vision_tools(config: VisionConfig) -> ToolRegistry {
    registry_with_client(VisionClient::new(Arc::new(config)))
}

/// Same as [`vision_tools`], reusing a prepared client (custom timeouts,
/// proxies, TLS roots).
pub fn registry_with_client(client: VisionClient) -> ToolRegistry {
    let registry = ToolRegistry::new()
        .register(AnalyzeImageByDomainTool::new(client.clone()))
        .register(AnalyzeImageTool::new(client.clone()))
        .register(DescribeImageTool::new(client.clone()))
        .register(AreaOfInterestTool::new(client.clone()))
        .register(ListModelsTool::new(client.clone()))
        .register(RecognizePrintedTextTool::new(client.clone()))
        .register(TagImageTool::new(client.clone()))
        .register(DetectObjectsTool::new(client.clone()));

    info!(
        base_url = %client.config().base_url,
        tools = registry.len(),
        "vision tools registered"
    );
    registry
}

/// Test utilities shared across modules.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::sync::Arc;

    use wiremock::MockServer;

    use crate::client::VisionClient;
    use crate::config::VisionConfig;

    /// Test API key (not a real key).
    pub const TEST_API_KEY: &str = "test-api-key";

    /// A client pointed at the mock server, optionally with a key.
    pub fn mock_client(server: &MockServer, api_key: Option<&str>) -> VisionClient {
        let mut config = VisionConfig::new(server.uri());
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        VisionClient::new(Arc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registry_for(server: &MockServer, key: &str) -> ToolRegistry {
        vision_tools(VisionConfig::new(server.uri()).with_api_key(key))
    }

    #[test]
    fn registers_every_endpoint_in_order() {
        let registry = vision_tools(VisionConfig::new("http://localhost"));
        assert_eq!(
            registry.tool_names(),
            vec![
                "post_models_model",
                "post_analyze",
                "post_describe",
                "post_areaofinterest",
                "get_models",
                "post_ocr",
                "post_tag",
                "post_detect",
            ]
        );
    }

    #[test]
    fn every_schema_is_well_formed() {
        let registry = vision_tools(VisionConfig::new("http://localhost"));
        for (name, schema) in registry.tool_names().into_iter().zip(registry.schemas()) {
            assert_eq!(schema["name"], name);
            assert!(schema["description"].as_str().is_some_and(|d| !d.is_empty()));
            assert_eq!(schema["input_schema"]["type"], "object");
            if name.starts_with("post_") {
                let required = schema["input_schema"]["required"].as_array().unwrap();
                assert!(required.contains(&json!("url")), "{name} must require url");
            }
        }
    }

    #[tokio::test]
    async fn empty_key_sends_no_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objects": []})))
            .mount(&server)
            .await;

        let registry = registry_for(&server, "");
        registry
            .execute("post_detect", &json!({"url": "https://example.com/a.jpg"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("ocp-apim-subscription-key").is_none());
        assert_eq!(requests[0].headers.get("accept").unwrap(), "application/json");
    }

    #[tokio::test]
    async fn key_header_carries_exact_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let registry = registry_for(&server, "k3y-value");
        registry
            .execute("post_tag", &json!({"url": "https://example.com/a.jpg"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].headers.get("ocp-apim-subscription-key").unwrap(),
            "k3y-value"
        );
    }

    #[tokio::test]
    async fn failures_come_back_as_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ocr"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"code":"InvalidImageUrl","message":"bad url"}"#),
            )
            .mount(&server)
            .await;

        let registry = registry_for(&server, "k");
        let err = registry
            .execute("post_ocr", &json!({"url": "nope"}))
            .await
            .unwrap_err();
        assert!(err.starts_with("API error"));
        assert!(err.contains(r#"{"code":"InvalidImageUrl","message":"bad url"}"#));

        let err = registry.execute("post_ocr", &json!(42)).await.unwrap_err();
        assert_eq!(err, "Invalid arguments object");
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tag"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"requestId": "tag"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .mount(&server)
            .await;

        let registry = registry_for(&server, "k");
        let tag_input = json!({"url": "https://example.com/a.jpg"});
        let models_input = json!({});
        let (tag, models) = tokio::join!(
            registry.execute("post_tag", &tag_input),
            registry.execute("get_models", &models_input),
        );

        assert!(tag.unwrap().contains("\"requestId\": \"tag\""));
        assert!(models.unwrap().contains("\"models\": []"));
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn prepared_client_is_used_for_every_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::builder()
            .user_agent("vision-tools-test")
            .build()
            .unwrap();
        let client = VisionClient::new(Arc::new(VisionConfig::new(server.uri()))).with_client(http);
        let registry = registry_with_client(client);
        assert_eq!(registry.len(), 8);

        registry.execute("get_models", &json!({})).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].headers.get("user-agent").unwrap(), "vision-tools-test");
    }
}

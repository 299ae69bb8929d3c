use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::ImageDescription;

/// `POST /describe`: human-readable captions ranked by confidence.
pub struct DescribeImageTool {
    client: VisionClient,
}

impl DescribeImageTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for DescribeImageTool {
    const NAME: &'static str = "post_describe";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Generate a description of an image in human-readable language with \
                complete sentences. More than one description can be generated for each image; \
                descriptions are ordered by confidence score. All descriptions are in English.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "maxCandidates": {
                        "type": "integer",
                        "description": "Maximum number of candidate descriptions to be returned. The default is 1."
                    },
                    "language": {
                        "type": "string",
                        "description": "Output language, default \"en\". Supported: en, es, ja, pt, zh."
                    },
                    "url": {
                        "type": "string",
                        "description": "Publicly reachable URL of an image."
                    }
                },
                "required": ["url"]
            }
        })
    }

    async fn invoke(&self, input: &Value) -> Result<String, ToolError> {
        let args = Arguments::from_input(input)?;

        let mut query = Query::new();
        query
            .push("maxCandidates", args.optional_u64("maxCandidates")?)
            .push("language", args.optional_str("language")?);

        let body = args.image_url()?;
        self.client
            .post::<ImageDescription>(&["describe"], &query, &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_client;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn forwards_candidates_and_language() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/describe"))
            .and(query_param("maxCandidates", "3"))
            .and(query_param("language", "es"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": {"tags": ["perro"], "captions": [{"text": "un perro", "confidence": 0.5}]},
                "requestId": "x"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = DescribeImageTool::new(mock_client(&server, None));
        let out = tool
            .invoke(&json!({"url": "https://example.com/a.jpg", "language": "es", "maxCandidates": 3}))
            .await
            .unwrap();

        let parsed: ImageDescription = serde_json::from_str(&out).unwrap();
        let captions = parsed.description.unwrap().captions.unwrap();
        assert_eq!(captions[0].text.as_deref(), Some("un perro"));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("maxCandidates=3&language=es"));
    }

    #[tokio::test]
    async fn integral_float_candidates_are_sent_as_integers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/describe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"requestId": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = DescribeImageTool::new(mock_client(&server, None));
        tool.invoke(&json!({"url": "https://example.com/a.jpg", "maxCandidates": 3.0}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("maxCandidates=3"));
    }

    #[tokio::test]
    async fn rejects_fractional_candidates() {
        let server = MockServer::start().await;
        let tool = DescribeImageTool::new(mock_client(&server, None));
        let err = tool
            .invoke(&json!({"url": "https://example.com/a.jpg", "maxCandidates": 1.5}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("maxCandidates"));

        let err = tool
            .invoke(&json!({"url": "https://example.com/a.jpg", "maxCandidates": -1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Conversion(_)), "{err:?}");
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::TagResult;

/// `POST /tag`.
pub struct TagImageTool {
    client: VisionClient,
}

impl TagImageTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for TagImageTool {
    const NAME: &'static str = "post_tag";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Generate a list of words, or tags, relevant to the content of the \
                supplied image. Tags are returned with confidence scores and may carry a hint \
                to disambiguate them.",
            "input_schema": {
                "type": "object",
                "properties": {
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
        query.push("language", args.optional_str("language")?);

        let body = args.image_url()?;
        self.client.post::<TagResult>(&["tag"], &query, &body).await
    }
}

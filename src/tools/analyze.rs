use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::ImageAnalysis;

/// `POST /analyze`: the full set of visual features for one image.
pub struct AnalyzeImageTool {
    client: VisionClient,
}

impl AnalyzeImageTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for AnalyzeImageTool {
    const NAME: &'static str = "post_analyze";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Extract a rich set of visual features based on the image content. \
                Optional parameters choose which features to return; by default, image \
                categories are returned. A successful response is returned as JSON. If the \
                request failed, the response contains an error code and a message.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "visualFeatures": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Visual feature types to return. Valid types: Categories, \
                            Tags, Description, Faces, ImageType, Color, Adult, Objects, Brands. \
                            Objects and Brands are only available in English."
                    },
                    "details": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Domain-specific details to return. Valid values: \
                            Celebrities, Landmarks."
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
            .push("visualFeatures", args.optional_list("visualFeatures")?)
            .push("details", args.optional_list("details")?)
            .push("language", args.optional_str("language")?);

        let body = args.image_url()?;
        self.client
            .post::<ImageAnalysis>(&["analyze"], &query, &body)
            .await
    }
}

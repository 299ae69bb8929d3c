use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::DetectResult;

/// `POST /detect`: objects with bounding boxes and classification lineage.
pub struct DetectObjectsTool {
    client: VisionClient,
}

impl DetectObjectsTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for DetectObjectsTool {
    const NAME: &'static str = "post_detect";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Perform object detection on the specified image. Each detected \
                object comes with a bounding box, a label, a confidence score and, where known, \
                its parent categories.",
            "input_schema": {
                "type": "object",
                "properties": {
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
        let body = args.image_url()?;
        self.client
            .post::<DetectResult>(&["detect"], &Query::new(), &body)
            .await
    }
}

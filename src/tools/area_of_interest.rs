use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::AreaOfInterestResult;

/// `POST /areaOfInterest`.
pub struct AreaOfInterestTool {
    client: VisionClient,
}

impl AreaOfInterestTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for AreaOfInterestTool {
    const NAME: &'static str = "post_areaofinterest";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Return a bounding box around the most important area of the image.",
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
            .post::<AreaOfInterestResult>(&["areaOfInterest"], &Query::new(), &body)
            .await
    }
}

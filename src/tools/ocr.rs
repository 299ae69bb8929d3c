use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::OcrResult;

/// `POST /ocr`: printed text, grouped into regions, lines and words.
pub struct RecognizePrintedTextTool {
    client: VisionClient,
}

impl RecognizePrintedTextTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for RecognizePrintedTextTool {
    const NAME: &'static str = "post_ocr";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Optical Character Recognition (OCR) detects text in an image and \
                extracts the recognized characters into a machine-usable character stream.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "detectOrientation": {
                        "type": "boolean",
                        "description": "Whether to detect the text orientation in the image. \
                            With true the service tries to detect the orientation and correct \
                            it before further processing (e.g. if it's upside-down)."
                    },
                    "language": {
                        "type": "string",
                        "description": "BCP-47 code of the text to be detected, or \"unk\" \
                            (the default) to auto-detect."
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
            .push("detectOrientation", args.optional_bool("detectOrientation")?)
            .push("language", args.optional_str("language")?);

        let body = args.image_url()?;
        self.client.post::<OcrResult>(&["ocr"], &query, &body).await
    }
}

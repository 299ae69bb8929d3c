use async_trait::async_trait;
use serde_json::{json, Value};

use super::args::{Arguments, Query};
use super::handler::VisionTool;
use crate::client::VisionClient;
use crate::error::ToolError;
use crate::models::{DomainModelResults, ListModelsResult};

/// `POST /models/{model}`: analysis by a domain-specific model such as
/// `celebrities` or `landmarks`.
pub struct AnalyzeImageByDomainTool {
    client: VisionClient,
}

impl AnalyzeImageByDomainTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for AnalyzeImageByDomainTool {
    const NAME: &'static str = "post_models_model";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "Recognize content within an image by applying a domain-specific \
                model. The list of domain-specific models supported by the service can be \
                retrieved with get_models. Currently the service provides celebrities and \
                landmarks.",
            "input_schema": {
                "type": "object",
                "properties": {
                    "model": {
                        "type": "string",
                        "description": "The domain-specific content to recognize."
                    },
                    "url": {
                        "type": "string",
                        "description": "Publicly reachable URL of an image."
                    }
                },
                "required": ["model", "url"]
            }
        })
    }

    async fn invoke(&self, input: &Value) -> Result<String, ToolError> {
        let args = Arguments::from_input(input)?;

        // Sent as a single escaped path segment. Dot segments would be
        // dropped by URL normalization and hit a different endpoint.
        let model = args.required_str("model")?;
        if matches!(model, "" | "." | "..") {
            return Err(ToolError::Conversion(format!(
                "argument `model` must name a model, got {model:?}"
            )));
        }

        let body = args.image_url()?;
        self.client
            .post::<DomainModelResults>(&["models", model], &Query::new(), &body)
            .await
    }
}

/// `GET /models`: the catalog of domain-specific models.
pub struct ListModelsTool {
    client: VisionClient,
}

impl ListModelsTool {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionTool for ListModelsTool {
    const NAME: &'static str = "get_models";

    fn schema() -> Value {
        json!({
            "name": Self::NAME,
            "description": "List the domain-specific models supported by the service, with the \
                categories each one applies to.",
            "input_schema": {
                "type": "object",
                "properties": {}
            }
        })
    }

    async fn invoke(&self, input: &Value) -> Result<String, ToolError> {
        // Takes no arguments, but an explicit non-object is still malformed.
        if !input.is_null() {
            Arguments::from_input(input)?;
        }
        self.client.get::<ListModelsResult>(&["models"]).await
    }
}

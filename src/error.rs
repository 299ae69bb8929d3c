/// Failure of a single tool invocation. Rendered to text at the handler
/// boundary so the caller always gets a well-formed reply.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid arguments object")]
    InvalidArguments,
    #[error("Failed to convert arguments to request type: {0}")]
    Conversion(String),
    #[error("Failed to encode request body: {0}")]
    Serialization(String),
    #[error("Failed to create request: {0}")]
    RequestBuild(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    ReadBody(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to format JSON: {0}")]
    Format(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VISION_BASE_URL is not set")]
    MissingBaseUrl,
}

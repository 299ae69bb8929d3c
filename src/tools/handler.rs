use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolError;

/// A tool's execution handler. `Ok` is the text result, `Err` a
/// human-readable failure; neither side ever panics.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, input: &Value) -> Result<String, String>;
}

/// A tool definition: advertised schema + handler for execution.
pub struct ToolDef {
    pub name: String,
    pub schema: Value,
    pub(crate) handler: Box<dyn ToolHandler>,
}

/// Endpoint-side half of a tool. Implementors report failures as
/// [`ToolError`]; the blanket [`ToolHandler`] impl renders them to text.
#[async_trait]
pub trait VisionTool: Send + Sync {
    /// Name the tool is registered and invoked under.
    const NAME: &'static str;

    /// Complete tool definition: `name`, `description`, `input_schema`.
    fn schema() -> Value;

    async fn invoke(&self, input: &Value) -> Result<String, ToolError>;
}

#[async_trait]
impl<T: VisionTool> ToolHandler for T {
    async fn call(&self, input: &Value) -> Result<String, String> {
        self.invoke(input).await.map_err(|e| e.to_string())
    }
}

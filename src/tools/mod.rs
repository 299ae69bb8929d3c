pub mod analyze;
pub(crate) mod args;
pub mod area_of_interest;
pub mod describe;
pub mod detect;
pub mod handler;
pub mod models;
pub mod ocr;
pub mod registry;
pub mod tag;

pub use analyze::AnalyzeImageTool;
pub use area_of_interest::AreaOfInterestTool;
pub use describe::DescribeImageTool;
pub use detect::DetectObjectsTool;
pub use handler::{ToolDef, ToolHandler, VisionTool};
pub use models::{AnalyzeImageByDomainTool, ListModelsTool};
pub use ocr::RecognizePrintedTextTool;
pub use registry::ToolRegistry;
pub use tag::TagImageTool;

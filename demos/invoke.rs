//! Command-line invocation layer for the vision tools.
//!
//! Usage:
//!   VISION_BASE_URL=https://westus.api.cognitive.microsoft.com/vision/v3.2 \
//!   VISION_API_KEY=... cargo run --example invoke -- --list
//!   cargo run --example invoke -- --search ocr
//!   cargo run --example invoke -- post_tag --args '{"url": "https://example.com/dog.jpg"}'
//!   cargo run --example invoke -- get_models

use clap::Parser;
use serde_json::Value;
use vision_tools::{vision_tools, VisionConfig};

#[derive(Parser)]
#[command(name = "invoke", about = "Invoke an image-analysis tool")]
struct Cli {
    /// Tool to invoke (e.g. post_analyze, get_models)
    tool: Option<String>,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    args: String,

    /// Print every tool schema and exit
    #[arg(long)]
    list: bool,

    /// Print tools whose name or description matches the query and exit
    #[arg(long)]
    search: Option<String>,
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("error: {e}"),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = VisionConfig::from_env().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let registry = vision_tools(config);

    if cli.list {
        print_json(&Value::Array(registry.schemas()));
        return;
    }

    if let Some(ref query) = cli.search {
        print_json(&Value::Array(registry.search(query)));
        return;
    }

    let Some(tool) = cli.tool else {
        eprintln!("error: name a tool, or pass --list. Available: {}", registry.tool_names().join(", "));
        std::process::exit(2);
    };

    let input: Value = serde_json::from_str(&cli.args).unwrap_or_else(|e| {
        eprintln!("error: --args is not valid JSON: {e}");
        std::process::exit(2);
    });

    match registry.execute(&tool, &input).await {
        Ok(text) => println!("{text}"),
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

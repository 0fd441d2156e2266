//! ext-driver command line runner
//!
//! Connects to a running Chrome/Chromium, makes sure the page-side helpers are loaded
//! and runs a JSON step script through the tool registry, printing one JSON result per
//! step.

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use ext_driver::sync::SyncConfig;
use ext_driver::tools::{ToolContext, ToolRegistry, ToolResult};
use ext_driver::{BrowserSession, ConnectionOptions};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ext-driver")]
#[command(version)]
#[command(about = "Run synchronised Ext JS UI steps against a running browser", long_about = None)]
struct Cli {
    /// WebSocket debugger URL of the browser
    #[arg(long, value_name = "URL", required_unless_present = "list_tools")]
    ws_url: Option<String>,

    /// Step script (JSON array of {"tool", "params"}); `-` reads stdin
    #[arg(value_name = "SCRIPT", required_unless_present = "list_tools")]
    script: Option<String>,

    /// Timing configuration (JSON)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Helper script to inject when the page lacks the helpers
    #[arg(long, value_name = "FILE")]
    helpers: Option<PathBuf>,

    /// Connection idle timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout: u64,

    /// Run the remaining steps after a failure
    #[arg(long)]
    keep_going: bool,

    /// Print the available tools and their parameter schemas, then exit
    #[arg(long)]
    list_tools: bool,
}

#[derive(Debug, Deserialize)]
struct Step {
    tool: String,

    #[serde(default)]
    params: Value,
}

fn read_steps(script: &str) -> Result<Vec<Step>> {
    let content = if script == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content).context("Failed to read steps from stdin")?;
        content
    } else {
        std::fs::read_to_string(script).with_context(|| format!("Failed to read step script {}", script))?
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid step script {}", script))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let registry = ToolRegistry::with_defaults();

    if cli.list_tools {
        println!("{}", serde_json::to_string_pretty(&registry.describe())?);
        return Ok(());
    }

    let (Some(ws_url), Some(script)) = (cli.ws_url, cli.script) else {
        bail!("--ws-url and a step script are required");
    };

    let config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };
    let steps = read_steps(&script)?;

    let mut options = ConnectionOptions::new(ws_url).timeout(cli.timeout);
    if let Some(helpers) = cli.helpers {
        options = options.helper_script(helpers);
    }

    let session = BrowserSession::connect(options)?;
    let driver = session.ext_driver(config)?;
    let mut context = ToolContext::new(driver.context());

    log::info!("Running {} step(s)", steps.len());
    let mut failures = 0;

    for (index, step) in steps.into_iter().enumerate() {
        let result = match registry.execute(&step.tool, step.params, &mut context) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Step {} ({}) failed: {}", index + 1, step.tool, e);
                ToolResult::failure(e.to_string())
            }
        };

        println!("{}", serde_json::json!({ "step": index + 1, "tool": step.tool, "result": result }));

        if !result.success {
            failures += 1;
            if !cli.keep_going {
                break;
            }
        }
    }

    if failures > 0 {
        bail!("{} step(s) failed", failures);
    }

    Ok(())
}

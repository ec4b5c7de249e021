//! ArkTS LSP tester
//!
//! Sends definition, references and signature-help queries to a running
//! ArkTS language server HTTP endpoint and prints what came back.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use arkts_lsp_tester::client::RequestClient;
use arkts_lsp_tester::config::{ClientConfig, DEFAULT_BASE_URL};
use arkts_lsp_tester::runner::{self, Target, TestKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which query to run.
    #[arg(long = "test", value_enum, default_value = "all")]
    test: TestKind,

    /// Path of the .ets file to query.
    #[arg(long)]
    file: String,

    /// Zero-based line number.
    #[arg(long)]
    line: u32,

    /// Zero-based character offset within the line.
    #[arg(long)]
    character: u32,

    /// Base URL of the LSP HTTP server.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Include the declaration in reference results (references test only).
    #[arg(long)]
    include_declaration: bool,

    /// Request timeout in seconds; 0 disables the timeout.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print outcomes as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// In `all` mode, exit non-zero when any query failed.
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    if !Path::new(&args.file).exists() {
        eprintln!("File does not exist: {}", args.file);
        return Ok(ExitCode::FAILURE);
    }

    let config = ClientConfig::default()
        .with_base_url(args.url.clone())
        .with_timeout(ClientConfig::timeout_from_secs(args.timeout_secs));
    let client = RequestClient::new(config)?;
    log::info!(
        "Querying {} ({:?}, timeout {:?})",
        client.config().base_url,
        args.test,
        client.config().timeout
    );

    let target = Target {
        file: args.file.clone(),
        line: args.line,
        character: args.character,
    };
    let execution = runner::run(&client, args.test, &target, args.include_declaration).await;

    if args.json {
        println!("{}", execution.render_json()?);
    } else {
        println!("{}", execution.render_text(&target, args.include_declaration));
    }

    if execution.is_failure(args.strict) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

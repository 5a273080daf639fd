//! CLI entry point for Quill.

pub mod commands;

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::models::ProviderKind;
use crate::types::TaskType;

/// Quill journal analysis gateway
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill: journal analysis gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve(ServeArgs),
    /// Analyze one entry and print the result as JSON
    Analyze(AnalyzeArgs),
    /// List registered models and provider availability
    Models(ModelsArgs),
}

/// Arguments for `quill serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides QUILL_BIND / PORT)
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for `quill analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Task to run (sentiment, summarize, insights)
    #[arg(value_parser = parse_task)]
    pub task: TaskType,

    /// Model id (defaults to QUILL_DEFAULT_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Journal text
    pub text: String,
}

/// Arguments for `quill models`.
#[derive(Parser, Debug)]
pub struct ModelsArgs {
    /// Only list models served by this provider (groq, huggingface, hf)
    #[arg(short, long, value_parser = parse_provider)]
    pub provider: Option<ProviderKind>,
}

fn parse_provider(raw: &str) -> Result<ProviderKind, String> {
    ProviderKind::parse(raw)
        .ok_or_else(|| format!("unknown provider '{raw}' (expected groq or huggingface)"))
}

fn parse_task(raw: &str) -> Result<TaskType, String> {
    TaskType::from_str(raw)
        .map_err(|_| format!("unknown task '{raw}' (expected sentiment, summarize or insights)"))
}

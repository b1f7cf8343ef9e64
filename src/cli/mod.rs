//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了CLI命令行接口。

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oxpart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(name = "run", about = "Execute a partition maintenance run")]
    Run(RunArgs),

    #[command(name = "plan", about = "Show the partition plan without applying it")]
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[arg(short, long, default_value = "oxpart.toml", help = "Path to the TOML config file")]
    pub config: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[arg(short, long, default_value = "oxpart.toml", help = "Path to the TOML config file")]
    pub config: PathBuf,

    #[arg(short, long, help = "Restrict the plan to a single table")]
    pub table: Option<String>,
}

mod plan;
mod run;

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Plan(args) => plan::execute(args).await,
    }
}

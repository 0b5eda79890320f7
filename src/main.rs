use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use wildgrid::{
    scenario::{Scenario, ScenarioLoader},
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "wildgrid survival session server")]
struct Cli {
    /// Path to a scenario YAML file (built-in 'frontier' scenario when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Bind host for the web UI
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for the web UI
    #[arg(long, default_value_t = 8460)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::frontier(),
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }

    web::run(WebServerConfig {
        scenario,
        host: cli.host,
        port: cli.port,
    })
    .await
}

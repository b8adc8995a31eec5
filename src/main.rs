use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use widget_host::{
    config::AppConfig,
    engine::{GuestValue, ScriptHost, ScriptInvocation},
    http_server,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing `app.yaml`.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serves the script execution API over HTTP.
    Serve,
    /// Executes a single widget script and prints its result and logs.
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the widget script.
    #[arg(long)]
    script: PathBuf,

    /// Base URL of the app the widget belongs to.
    #[arg(long)]
    app_url: String,

    /// Parameters as a JSON document, exposed to the script as `parameters`.
    #[arg(long, default_value = "null")]
    parameters: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(cli.config_dir.as_deref())?;
    tracing::debug!(server = ?config.server, script = ?config.script, "Configuration loaded.");

    let host = Arc::new(ScriptHost::new(&config)?);

    match cli.command {
        Commands::Serve => http_server::run_server_from_config(&config, host).await?,
        Commands::Run(args) => run_script(&host, args).await?,
    }

    Ok(())
}

async fn run_script(host: &ScriptHost, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let script = tokio::fs::read_to_string(&args.script).await?;
    let parameters: Value = serde_json::from_str(&args.parameters)?;

    let execution = host
        .execute(ScriptInvocation {
            script,
            app_url: args.app_url,
            parameters: GuestValue::from(parameters),
        })
        .await;

    let logs: Vec<&str> = execution.logs.iter().map(|entry| entry.message.as_str()).collect();
    let report = match &execution.result {
        Ok(result) => json!({ "result": result, "logs": logs }),
        Err(error) => json!({ "error": error.to_string(), "logs": logs }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Err(error) = execution.result {
        return Err(error.into());
    }
    Ok(())
}

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use varcodec::config::CodecConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let json = cli.json;
    if let Err(e) = start(cli).await {
        if json {
            println!("{}", serde_json::json!({"error": format!("{:#}", e)}));
        } else {
            eprintln!("❌ {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn start(cli: cli::Cli) -> anyhow::Result<()> {
    let config = CodecConfig::load(cli.config.as_deref())?;

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli::run(cli, config).await
}

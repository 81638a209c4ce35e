use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// flowsense - manufacturing ERP site backend
#[derive(Parser)]
#[command(name = "flowsense")]
#[command(about = "Contact relay for the FlowSense ERP website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send a contact form submission to a running site
    Submit(cli::submit::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = flowsense::Config::load(cli.config.clone())?;

    flowsense::observability::init_observability(
        "flowsense",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            cli::server::serve(config, host, port).await
        }
        Commands::Submit(args) => cli::submit::submit(args).await,
    }
}

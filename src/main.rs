//! cryptowelder process entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cryptowelder::bootstrap::launch;
use cryptowelder::config::ConfigLoader;
use cryptowelder::lifecycle::setup_tracing;
use cryptowelder::module::list_modules;
use tracing::error;

/// Command line interface for cryptowelder
#[derive(Parser, Debug)]
#[command(name = "cryptowelder")]
#[command(about = "Bootstraps and runs a cryptowelder module")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Module to load, overriding file and environment
    #[arg(short, long)]
    module: Option<String>,

    /// Print the registered modules and exit
    #[arg(long)]
    list_modules: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_modules {
        for (name, description) in list_modules() {
            println!("{name:<32} {description}");
        }
        return ExitCode::SUCCESS;
    }

    setup_tracing();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(module) = cli.module {
        loader = loader.with_module(module);
    }

    let result = match loader.load() {
        Ok(config) => launch(&config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Application failed");
            ExitCode::FAILURE
        }
    }
}

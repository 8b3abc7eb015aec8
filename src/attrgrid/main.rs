use attrgrid::config::ResolverConfig;
use attrgrid::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let load_config = || match &cli.config {
        Some(dir) => ResolverConfig::load(dir),
        None => Ok(ResolverConfig::default()),
    };

    match &cli.command {
        Commands::Models { file } => cli::handle_models(file),
        Commands::Resolve { file, models, json } => {
            cli::handle_resolve(file, load_config()?, models, *json)
        }
        Commands::Serialize {
            file,
            model,
            records,
            keyed,
        } => cli::handle_serialize(file, load_config()?, model, records, *keyed),
        Commands::Config { key, value } => {
            cli::handle_config(cli.config.as_deref(), key.as_deref(), value.as_deref())
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

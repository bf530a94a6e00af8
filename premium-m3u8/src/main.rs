use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::{fmt, prelude::*};

/// Write a single-variant premium HLS manifest for every configured channel
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Config file location
    #[clap(default_value = "config.json", value_parser)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging();

    let result = match std::env::current_dir() {
        Ok(cwd) => premium_m3u8::run(&args.config, &cwd).await,
        Err(e) => Err(e.into()),
    };
    match &result {
        Ok(report) => println!("\n{}", report),
        Err(err) => eprintln!("ERROR: {:#}", err),
    }

    process::exit(premium_m3u8::exit_code(&result));
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

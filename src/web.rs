#![cfg(not(tarpaulin_include))]

use calcweb::app;
use calcweb::config::Config;

/// Main entry point for the calculator web application
///
/// Reads settings from the environment (see [`Config`]), sets up logging and
/// serves until the process is stopped. Log verbosity follows `RUST_LOG` and
/// defaults to `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    app::run(config).await
}

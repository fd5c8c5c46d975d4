// ABOUTME: Main entry point for the image search CLI application
// ABOUTME: Parses arguments, sets up logging and exits non-zero when the action fails

use clap::Parser;
use image_search_cli::app;
use image_search_cli::cli::Cli;
use image_search_cli::cli_output::CliOutput;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match app::run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            CliOutput::new().error(&format!("{:#}", err));
            std::process::exit(1);
        }
    }
}

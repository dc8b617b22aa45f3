mod platform;

use std::process::ExitCode;

use clap::Parser;
use recommender_core::RequestState;

use platform::cli::Cli;
use platform::config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_overrides(&cli);

    platform::logging::initialize(
        cli.log,
        recommender_logging::level_from_name(&config.log_level),
        &config.log_file,
    );

    let result = match cli.query {
        Some(query) => platform::app::run_once(&config, query)
            .map(|state| state == RequestState::Success),
        None => platform::app::run_app(&config).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

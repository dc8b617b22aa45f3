use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use recommender_engine::ResponseContract;

use super::logging::LogDestination;

/// Movie Recommender - ask a recommendation service for movies by genre
#[derive(Parser, Debug)]
#[command(name = "movie-recommender")]
#[command(about = "Ask a recommendation service for movies by genre", long_about = None)]
pub struct Cli {
    /// Path to the RON configuration file (missing file means defaults)
    #[arg(long, default_value = "movie-recommender.ron")]
    pub config: PathBuf,

    /// Recommendation endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Response shape the endpoint answers with
    #[arg(long, value_enum)]
    pub contract: Option<ContractArg>,

    /// Give up on a request after this many seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Submit this query once, print the result, and exit
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractArg {
    DirectArray,
    NestedJson,
}

impl From<ContractArg> for ResponseContract {
    fn from(arg: ContractArg) -> Self {
        match arg {
            ContractArg::DirectArray => ResponseContract::DirectArray,
            ContractArg::NestedJson => ResponseContract::NestedJson,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "movie-recommender",
            "--contract",
            "nested-json",
            "--endpoint",
            "http://localhost:8080/api/recommend",
            "--log",
            "both",
            "--query",
            "noir",
        ])
        .unwrap();

        assert_eq!(cli.contract, Some(ContractArg::NestedJson));
        assert_eq!(cli.log, LogDestination::Both);
        assert_eq!(cli.query.as_deref(), Some("noir"));
        assert_eq!(cli.config, PathBuf::from("movie-recommender.ron"));
    }

    #[test]
    fn rejects_unknown_contract() {
        let result = Cli::try_parse_from(["movie-recommender", "--contract", "guess"]);
        assert!(result.is_err());
    }
}

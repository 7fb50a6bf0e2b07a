//! Command-line interface for the Fairweather ranking engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod rank;

pub use error::CliError;

const ARG_RANK_REQUEST: &str = "request-path";
const ARG_RANK_OUTPUT: &str = "output";
const ARG_RANK_MODEL: &str = "model";
const ARG_RANK_DISTANCE_MODEL: &str = "distance-model";
const ARG_RANK_DIVERSITY: &str = "diversity";
const ARG_RANK_MAX_RESULTS: &str = "max-results";
const ARG_RERANK_URL: &str = "rerank-url";
const ARG_RERANK_API_KEY: &str = "rerank-api-key";
const ARG_RERANK_TIMEOUT_MS: &str = "rerank-timeout-ms";
const ARG_RERANK_TOP_K: &str = "rerank-top-k";
const ENV_RANK_REQUEST: &str = "FAIRWEATHER_CMDS_RANK_REQUEST_PATH";

/// Run the Fairweather CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments, configuration, the request file or
/// the output fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fairweather",
    about = "Weather-aware venue ranking",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and rank the candidate venues of a JSON request.
    Rank(rank::RankArgs),
}

#[cfg(test)]
mod tests;

//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use fairweather_cli::CliError;

fn main() {
    match fairweather_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("fairweather: {err}");
            std::process::exit(1);
        }
    }
}

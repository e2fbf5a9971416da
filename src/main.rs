//! Revisa CLI — validate student submissions.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "revisa",
    version,
    about = "Assignment submission validator — compile, verify the contract, run the tests, one verdict"
)]
struct Cli {
    #[command(subcommand)]
    command: revisa::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = revisa::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

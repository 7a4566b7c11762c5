use clap::Parser;
use firelancer_cli::{Cli, commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let verbose = cli.global.verbose;

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if verbose {
                eprintln!("❌ Error: {error}");
                for cause in error.chain().skip(1) {
                    eprintln!("   Caused by: {cause}");
                }
            } else {
                eprintln!("❌ Error: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

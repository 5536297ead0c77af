//! aws-energy-labeler CLI entry point

use aws_energy_labeler::cli;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is installed by the labeling run itself, once the level is known
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        // Help still wins; any other argument error yields to the version flag
        Err(err) if err.use_stderr() && cli::wants_version(std::env::args_os()) => {
            cli::print_version();
            return ExitCode::SUCCESS;
        }
        Err(err) => err.exit(),
    };

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = cli::exit_code(&err);
            eprintln!("error: {:#}", err);
            if code == 2 {
                eprintln!("\nFor more information, try '--help'.");
            }
            ExitCode::from(code)
        }
    }
}

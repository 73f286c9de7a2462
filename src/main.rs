use std::process::ExitCode;

use clap::Parser;
use locsync::{
    cli::{Arguments, ExitStatus},
    logging,
};

fn main() -> ExitCode {
    let args = Arguments::parse();

    if let Err(err) = logging::init(args.verbose()) {
        eprintln!("Error: {}", err);
        return ExitStatus::Error.into();
    }

    match locsync::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

//! protogo CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use protogo_cli::{Args, describe_error, init_logging, run};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

use std::io;
use std::process::ExitCode;

use app::cli::{Args, Command};
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse();
    app::tracing_init::init_tracing_once();

    let result = match &args.command {
        Command::Decode(decode) => {
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            let mut stderr = io::stderr().lock();
            app::cli::decode::run(decode, stdin, &mut stdout, &mut stderr)
        }
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::warn!(failed, "some links could not be decoded");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

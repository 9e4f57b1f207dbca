//! The main entry point for the `find-and-replace` command-line application.
//!
//! Parses arguments, runs the library, and turns a run-level error into the
//! process exit code.

use find_and_replace::cli;
use find_and_replace::{Console, RunConfig, logger, runner};
use std::process;

fn main() {
    let args = cli::parse_args();
    logger::init(args.verbose);

    let config = RunConfig::from(args);
    log::debug!("{config:?}");

    let mut console = Console::stdio();
    match runner::run(&config, &mut console) {
        Ok(summary) => log::info!("finished: {summary:?}"),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("Error: {e}");
            }
            log::debug!("exiting after: {e}");
            process::exit(e.exit_code());
        }
    }
}

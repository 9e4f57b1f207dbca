//! `find-and-replace` locates files by glob and rewrites their contents with a
//! regex substitution.
//!
//! It provides the logic behind the `find-and-replace` command-line tool and can
//! also be used as a library. The main components are:
//!
//! - `locator`: expands a glob under a root directory, flat or recursive.
//! - `replacer`: the read, substitute, confirm and write cycle for one file.
//! - `runner`: the whole invocation, including dry runs and the global gate.
//! - `console`: the colored message channel and the yes/no/quit prompt.
//!
//! Everything runs sequentially on one thread; each file is read and written
//! whole.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod console;
pub mod errors;
pub mod locator;
pub mod logger;
pub mod preview;
pub mod replacer;
pub mod runner;

// Re-export main types for easier access by library users.
pub use config::{Mode, RunConfig};
pub use console::{Color, Console, Terminal, paint, print_colored};
pub use errors::{Error, Result};
pub use locator::find_files;
pub use replacer::{ProcessOutcome, Substitution, process_file};
pub use runner::{Summary, run};

/// The package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_is_defined() {
        assert!(!super::VERSION.is_empty());
    }
}

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Regex find-and-replace across the files matching a glob.
///
/// Each file with matches is previewed and confirmed before it is
/// rewritten in place, unless `--no-confirm` or `--dry-run` is given.
#[derive(Parser, Debug)]
#[command(
    name = "find-and-replace",
    author,
    version,
    about = "Find files by glob and apply a regex replacement to their contents",
    long_about = "find-and-replace - locate files matching a glob and rewrite them with a regex substitution.

The replacement may reference capture groups as \\1 or \\g<name>; a $ is always literal.

EXAMPLES:
  find-and-replace '*.py' src 'old_function' 'new_function'      # Confirm each file
  find-and-replace '*.py' . 'old_(\\w+)' 'new_\\1' -r -n        # Recursive, no prompts
  find-and-replace '*.md' docs 'colour' 'color' --dry-run       # Preview only"
)]
pub struct Args {
    /// Glob selecting the files to process (for example `*.py`).
    pub file_glob: String,

    /// The directory to search in.
    pub directory: PathBuf,

    /// The regular expression to search for.
    #[arg(allow_hyphen_values = true)]
    pub search_pattern: String,

    /// The replacement text. Can include capture groups from the pattern.
    #[arg(allow_hyphen_values = true)]
    pub replacement: String,

    /// Match the glob at any depth below the directory.
    #[arg(short, long)]
    pub recursive: bool,

    /// Apply changes without asking for confirmation.
    #[arg(short, long, env = "FIND_AND_REPLACE_NO_CONFIRM")]
    pub no_confirm: bool,

    /// Show what would change without modifying any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase diagnostic logging on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

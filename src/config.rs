use crate::cli::Args;
use std::path::PathBuf;

/// Everything one invocation needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub file_glob: String,
    pub directory: PathBuf,
    pub pattern: String,
    pub replacement: String,
    pub recursive: bool,
    pub no_confirm: bool,
    pub dry_run: bool,
}

/// How located files are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compute and show changes, never write.
    DryRun,
    /// Ask once for the whole run, then once per file.
    Interactive,
    /// Write every change without asking.
    Unattended,
}

impl RunConfig {
    /// Dry run takes precedence over `no_confirm`.
    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else if self.no_confirm {
            Mode::Unattended
        } else {
            Mode::Interactive
        }
    }
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            file_glob: args.file_glob,
            directory: args.directory,
            pattern: args.search_pattern,
            replacement: args.replacement,
            recursive: args.recursive,
            no_confirm: args.no_confirm,
            dry_run: args.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(flags: &[&str]) -> RunConfig {
        let mut argv = vec!["find-and-replace", "*.rs", "src", "foo", "bar"];
        argv.extend_from_slice(flags);
        RunConfig::from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_from_args() {
        let cfg = config(&["-r"]);
        assert_eq!(cfg.file_glob, "*.rs");
        assert_eq!(cfg.directory, PathBuf::from("src"));
        assert_eq!(cfg.pattern, "foo");
        assert_eq!(cfg.replacement, "bar");
        assert!(cfg.recursive);
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(config(&[]).mode(), Mode::Interactive);
        assert_eq!(config(&["-n"]).mode(), Mode::Unattended);
        assert_eq!(config(&["--dry-run"]).mode(), Mode::DryRun);
        assert_eq!(config(&["-n", "--dry-run"]).mode(), Mode::DryRun);
    }
}

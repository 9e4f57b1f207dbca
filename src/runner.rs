use crate::config::{Mode, RunConfig};
use crate::confirm::{self, Confirmation};
use crate::console::Terminal;
use crate::errors::{Error, Result};
use crate::locator;
use crate::preview;
use crate::replacer::{self, ProcessOutcome, Substitution};
use std::path::PathBuf;

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files located.
    pub total: usize,
    /// Files rewritten, or that would be in a dry run.
    pub modified: usize,
    /// Files that could not be read or written.
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Modified => self.modified += 1,
            ProcessOutcome::Unmodified => {}
            ProcessOutcome::Failed => self.failed += 1,
        }
    }
}

/// The main entry point for a `find-and-replace` invocation.
///
/// 1. The pattern is compiled before any file is touched.
/// 2. Files are located once.
/// 3. Each file is previewed, or confirmed and processed, in locator order.
/// 4. A summary is printed.
///
/// Every run-level error is shown on the terminal before it is returned, so
/// the caller only has to map it to an exit code.
pub fn run(config: &RunConfig, term: &mut dyn Terminal) -> Result<Summary> {
    let substitution = match Substitution::new(&config.pattern, &config.replacement) {
        Ok(substitution) => substitution,
        Err(e) => {
            term.error(&format!("Error: {e}"))?;
            return Err(e);
        }
    };

    let files = locator::find_files(
        &config.file_glob,
        &config.directory,
        config.recursive,
        term,
    )?;
    if files.is_empty() {
        term.warn(&Error::NoFilesFound.to_string())?;
        return Err(Error::NoFilesFound);
    }

    match config.mode() {
        Mode::DryRun => dry_run(&substitution, &files, term),
        Mode::Interactive => {
            confirm_run(config, &files, term)?;
            process_all(&substitution, &files, false, term)
        }
        Mode::Unattended => process_all(&substitution, &files, true, term),
    }
}

/// The global gate: lists the files and asks once before any of them is touched.
fn confirm_run(config: &RunConfig, files: &[PathBuf], term: &mut dyn Terminal) -> Result<()> {
    term.plain(&format!(
        "Found {} file(s) matching '{}':",
        files.len(),
        config.file_glob
    ))?;
    for path in files {
        term.plain(&format!("  {}", path.display()))?;
    }

    match confirm::ask(term, "Proceed with replacement? [y/n]: ")? {
        Confirmation::Proceed => Ok(()),
        Confirmation::Skip | Confirmation::AbortProcess => {
            term.warn(&Error::UserCancelled.to_string())?;
            Err(Error::UserCancelled)
        }
    }
}

fn process_all(
    substitution: &Substitution,
    files: &[PathBuf],
    no_confirm: bool,
    term: &mut dyn Terminal,
) -> Result<Summary> {
    let mut summary = Summary {
        total: files.len(),
        ..Summary::default()
    };

    for path in files {
        let outcome = replacer::apply_to_file(substitution, path, no_confirm, term)?;
        log::debug!("{}: {:?}", path.display(), outcome);
        summary.record(outcome);
    }

    term.success(&format!(
        "Done. Modified {} of {} file(s).",
        summary.modified, summary.total
    ))?;
    if summary.failed > 0 {
        term.error(&format!("{} file(s) could not be processed.", summary.failed))?;
    }
    Ok(summary)
}

fn dry_run(
    substitution: &Substitution,
    files: &[PathBuf],
    term: &mut dyn Terminal,
) -> Result<Summary> {
    let mut summary = Summary {
        total: files.len(),
        ..Summary::default()
    };

    for path in files {
        let original = match replacer::read_text(path) {
            Ok(text) => text,
            Err(e) => {
                term.error(&format!("Error: {e}"))?;
                summary.record(ProcessOutcome::Failed);
                continue;
            }
        };

        let replaced = substitution.apply(&original);
        if !replaced.changed {
            term.warn(&format!("No matches found in: {}", path.display()))?;
            continue;
        }

        term.success(&format!(
            "Would modify: {} ({} replacement(s))",
            path.display(),
            replaced.matches
        ))?;
        preview::show_changes(term, &original, &replaced.text)?;
        summary.record(ProcessOutcome::Modified);
    }

    term.success(&format!(
        "Dry run: {} of {} file(s) would be modified. No files were changed.",
        summary.modified, summary.total
    ))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{scripted, transcript};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.py"), "import old_lib\nold_lib.run()\n").unwrap();
        fs::write(root.join("b.py"), "print('untouched')\n").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/c.py"), "from old_lib import x\n").unwrap();
        temp_dir
    }

    fn config(root: &Path) -> RunConfig {
        RunConfig {
            file_glob: "*.py".to_string(),
            directory: root.to_path_buf(),
            pattern: "old_lib".to_string(),
            replacement: "new_lib".to_string(),
            recursive: false,
            no_confirm: true,
            dry_run: false,
        }
    }

    #[test]
    fn test_unattended_run() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("");

        let summary = run(&config(root), &mut console).unwrap();

        assert_eq!(
            summary,
            Summary {
                total: 2,
                modified: 1,
                failed: 0
            }
        );
        assert_eq!(
            fs::read_to_string(root.join("a.py")).unwrap(),
            "import new_lib\nnew_lib.run()\n"
        );
        // Not recursive, so the nested file stays as it was.
        assert!(fs::read_to_string(root.join("sub/c.py")).unwrap().contains("old_lib"));
        assert!(transcript(&console).contains("Done. Modified 1 of 2 file(s)."));
    }

    #[test]
    fn test_recursive_run() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("");
        let cfg = RunConfig {
            recursive: true,
            ..config(root)
        };

        let summary = run(&cfg, &mut console).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.modified, 2);
        assert!(fs::read_to_string(root.join("sub/c.py")).unwrap().contains("new_lib"));
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let mut console = scripted("");
        let cfg = RunConfig {
            pattern: "[invalid".to_string(),
            directory: PathBuf::from("/nonexistent"),
            ..config(Path::new("/"))
        };

        let err = run(&cfg, &mut console).unwrap_err();

        assert!(matches!(err, Error::InvalidPattern(_)));
        assert_ne!(err.exit_code(), 0);
        // Nothing was located: the missing directory is never mentioned.
        let out = transcript(&console);
        assert!(out.contains("Invalid regex pattern"));
        assert!(!out.contains("does not exist"));
    }

    #[test]
    fn test_no_files_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut console = scripted("");

        let err = run(&config(temp_dir.path()), &mut console).unwrap_err();

        assert!(matches!(err, Error::NoFilesFound));
        assert_ne!(err.exit_code(), 0);
        assert!(transcript(&console).contains("\x1b[1;33mNo matching files found.\x1b[0m"));
    }

    #[test]
    fn test_missing_directory_counts_as_no_files() {
        let mut console = scripted("");

        let err = run(&config(Path::new("/nonexistent")), &mut console).unwrap_err();

        assert!(matches!(err, Error::NoFilesFound));
        let out = transcript(&console);
        assert!(out.contains("does not exist"));
        assert!(out.contains("No matching files found."));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("");
        let cfg = RunConfig {
            dry_run: true,
            no_confirm: false,
            ..config(root)
        };

        let summary = run(&cfg, &mut console).unwrap();

        assert_eq!(summary.modified, 1);
        assert!(fs::read_to_string(root.join("a.py")).unwrap().contains("old_lib"));
        let out = transcript(&console);
        assert!(out.contains("Would modify: "));
        assert!(out.contains("+    1 | import new_lib"));
        assert!(!out.contains("Proceed with replacement?"));
        assert!(!out.contains("[q]uit"));
    }

    #[test]
    fn test_global_gate_cancel() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("n\n");
        let cfg = RunConfig {
            no_confirm: false,
            ..config(root)
        };

        let err = run(&cfg, &mut console).unwrap_err();

        assert!(matches!(err, Error::UserCancelled));
        assert!(fs::read_to_string(root.join("a.py")).unwrap().contains("old_lib"));
        assert!(transcript(&console).contains("\x1b[1;33mOperation cancelled.\x1b[0m"));
    }

    #[test]
    fn test_interactive_run_per_file_answers() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("y\ny\nn\n");
        let cfg = RunConfig {
            no_confirm: false,
            recursive: true,
            ..config(root)
        };

        let summary = run(&cfg, &mut console).unwrap();

        // a.py accepted, b.py has no match, sub/c.py declined.
        assert_eq!(summary.modified, 1);
        assert!(fs::read_to_string(root.join("a.py")).unwrap().contains("new_lib"));
        assert!(fs::read_to_string(root.join("sub/c.py")).unwrap().contains("old_lib"));
        assert!(transcript(&console).contains("Skipping file."));
    }

    #[test]
    fn test_interactive_quit_stops_the_run() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("y\nq\n");
        let cfg = RunConfig {
            no_confirm: false,
            recursive: true,
            ..config(root)
        };

        let err = run(&cfg, &mut console).unwrap_err();

        assert!(matches!(err, Error::UserQuit));
        assert!(fs::read_to_string(root.join("a.py")).unwrap().contains("old_lib"));
        assert!(fs::read_to_string(root.join("sub/c.py")).unwrap().contains("old_lib"));
    }

    #[test]
    fn test_zero_modified_by_choice_is_success() {
        let temp_dir = project();
        let root = temp_dir.path();
        let mut console = scripted("y\nn\n");
        let cfg = RunConfig {
            no_confirm: false,
            ..config(root)
        };

        let summary = run(&cfg, &mut console).unwrap();

        assert_eq!(summary.modified, 0);
        assert!(transcript(&console).contains("Done. Modified 0 of 2 file(s)."));
    }
}

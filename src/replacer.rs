use crate::confirm::{self, Confirmation};
use crate::console::Terminal;
use crate::errors::{Error, Result};
use crate::preview;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// A compiled search pattern together with its replacement template.
///
/// Group references in the replacement are written `\1` or `\g<name>`; a `$`
/// is always literal.
#[derive(Debug, Clone)]
pub struct Substitution {
    regex: Regex,
    replacement: String,
}

/// The result of applying a [`Substitution`] to some text.
pub struct Replaced<'a> {
    /// The substituted text; borrowed when nothing matched.
    pub text: Cow<'a, str>,
    /// How many non-overlapping matches were replaced.
    pub matches: usize,
    /// Whether `text` differs from the input.
    pub changed: bool,
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The file was rewritten.
    Modified,
    /// Nothing matched, the change was a no-op, or the user skipped it.
    Unmodified,
    /// The file could not be read or written.
    Failed,
}

impl ProcessOutcome {
    pub fn is_modified(self) -> bool {
        self == ProcessOutcome::Modified
    }
}

impl Substitution {
    /// Compiles `pattern` and prepares `replacement`.
    ///
    /// References to groups the pattern does not define are rejected.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        let replacement = expand_backrefs(replacement, &regex)?;
        log::debug!("compiled pattern '{}' with replacement '{}'", regex, replacement);
        Ok(Self { regex, replacement })
    }

    /// Replaces every non-overlapping match in `content`.
    pub fn apply<'a>(&self, content: &'a str) -> Replaced<'a> {
        let matches = self.regex.find_iter(content).count();
        if matches == 0 {
            return Replaced {
                text: Cow::Borrowed(content),
                matches,
                changed: false,
            };
        }

        let text = self.regex.replace_all(content, self.replacement.as_str());
        let changed = text != content;
        Replaced {
            text,
            matches,
            changed,
        }
    }
}

/// Translates a replacement into the regex crate's template syntax.
///
/// `\N` and `\g<name>` (or `\g<N>`) become `${..}` group references, `\n`,
/// `\t` and `\\` are unescaped, and every `$` is escaped so it stays literal.
/// Other backslashes pass through untouched.
fn expand_backrefs(replacement: &str, regex: &Regex) -> Result<String> {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => {
                out.push_str("$$");
                continue;
            }
            '\\' => {}
            _ => {
                out.push(c);
                continue;
            }
        }

        match chars.peek().copied() {
            Some(d) if d.is_ascii_digit() => {
                let mut group = String::new();
                while group.len() < 2 {
                    match chars.peek() {
                        Some(d) if d.is_ascii_digit() => {
                            group.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                out.push_str(&group_reference(&group, regex)?);
            }
            Some('g') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.next() == Some('<') {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in lookahead.by_ref() {
                        if c == '>' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if closed && !name.is_empty() {
                        out.push_str(&group_reference(&name, regex)?);
                        chars = lookahead;
                        continue;
                    }
                }
                out.push('\\');
            }
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push('\\'),
        }
    }

    Ok(out)
}

/// `${group}` for a group index or name that `regex` defines.
fn group_reference(group: &str, regex: &Regex) -> Result<String> {
    let known = match group.parse::<usize>() {
        Ok(index) => index < regex.captures_len(),
        Err(_) => regex.capture_names().flatten().any(|name| name == group),
    };
    if !known {
        return Err(Error::InvalidReplacement(format!(
            "unknown group '{group}' in replacement"
        )));
    }
    Ok(format!("${{{group}}}"))
}

/// Reads a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

/// Runs the read, substitute, confirm and write cycle for one file.
///
/// Read and write failures are reported in red and give
/// [`ProcessOutcome::Failed`]. Quitting at the prompt returns
/// [`Error::UserQuit`]; the caller is expected to end the process.
pub fn apply_to_file(
    substitution: &Substitution,
    path: &Path,
    no_confirm: bool,
    term: &mut dyn Terminal,
) -> Result<ProcessOutcome> {
    let original = match read_text(path) {
        Ok(text) => text,
        Err(e) => {
            term.error(&format!("Error: {e}"))?;
            return Ok(ProcessOutcome::Failed);
        }
    };

    let replaced = substitution.apply(&original);
    if !replaced.changed {
        term.warn(&format!("No matches found in: {}", path.display()))?;
        return Ok(ProcessOutcome::Unmodified);
    }

    if !no_confirm {
        term.plain(&format!(
            "Found {} match(es) in: {}",
            replaced.matches,
            path.display()
        ))?;
        preview::show_changes(term, &original, &replaced.text)?;

        let question = format!("Apply changes to {}? [y]es/[n]o/[q]uit: ", path.display());
        match confirm::ask(term, &question)? {
            Confirmation::Proceed => {}
            Confirmation::Skip => {
                term.warn("Skipping file.")?;
                return Ok(ProcessOutcome::Unmodified);
            }
            Confirmation::AbortProcess => {
                term.warn("Quitting.")?;
                return Err(Error::UserQuit);
            }
        }
    }

    if let Err(e) = fs::write(path, replaced.text.as_bytes()) {
        term.error(&format!("Error: {}", Error::write(path, e)))?;
        return Ok(ProcessOutcome::Failed);
    }

    log::info!("wrote {} bytes to {}", replaced.text.len(), path.display());
    term.success(&format!(
        "Modified: {} ({} replacement(s))",
        path.display(),
        replaced.matches
    ))?;
    Ok(ProcessOutcome::Modified)
}

/// Compiles `pattern` and processes one file, returning whether it changed.
///
/// An invalid pattern is reported in red and yields `false` rather than an
/// error. The only errors returned are [`Error::UserQuit`] and terminal I/O.
pub fn process_file(
    path: &Path,
    pattern: &str,
    replacement: &str,
    no_confirm: bool,
    term: &mut dyn Terminal,
) -> Result<bool> {
    let substitution = match Substitution::new(pattern, replacement) {
        Ok(substitution) => substitution,
        Err(e) => {
            term.error(&format!("Error: {e}"))?;
            return Ok(false);
        }
    };

    apply_to_file(&substitution, path, no_confirm, term).map(ProcessOutcome::is_modified)
}

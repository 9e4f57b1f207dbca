use crate::console::{Color, Terminal};
use crate::errors::Result;
use similar::{ChangeTag, TextDiff};

/// The most changed lines shown for a single file.
pub const MAX_PREVIEW_LINES: usize = 50;

/// One changed line of a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub color: Color,
    pub text: String,
}

/// Lists removed and added lines between `old` and `new`.
///
/// Removed lines carry their old line number and a `-`, added lines their new
/// line number and a `+`. Unchanged lines are left out.
pub fn changed_lines(old: &str, new: &str) -> Vec<PreviewLine> {
    let diff = TextDiff::from_lines(old, new);

    diff.iter_all_changes()
        .filter_map(|change| {
            let content = change.value().trim_end_matches(['\n', '\r']);
            match change.tag() {
                ChangeTag::Delete => Some(PreviewLine {
                    color: Color::Red,
                    text: format!("-{:>5} | {}", change.old_index()? + 1, content),
                }),
                ChangeTag::Insert => Some(PreviewLine {
                    color: Color::Green,
                    text: format!("+{:>5} | {}", change.new_index()? + 1, content),
                }),
                ChangeTag::Equal => None,
            }
        })
        .collect()
}

/// Writes the preview of a change to the terminal.
pub fn show_changes(term: &mut dyn Terminal, old: &str, new: &str) -> Result<()> {
    let lines = changed_lines(old, new);

    for line in lines.iter().take(MAX_PREVIEW_LINES) {
        term.emit(&line.text, line.color)?;
    }
    if lines.len() > MAX_PREVIEW_LINES {
        term.plain(&format!(
            "... {} more changed line(s) not shown",
            lines.len() - MAX_PREVIEW_LINES
        ))?;
    }
    Ok(())
}

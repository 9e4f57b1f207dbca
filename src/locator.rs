use crate::console::Terminal;
use crate::errors::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Finds the files under `root` whose names match `pattern`.
///
/// Problems with the root or the pattern are reported in red and produce an
/// empty list, so callers handle "nothing to do" in one place. Only failures
/// of the terminal itself are returned as errors.
pub fn find_files(
    pattern: &str,
    root: &Path,
    recursive: bool,
    term: &mut dyn Terminal,
) -> Result<Vec<PathBuf>> {
    match locate(pattern, root, recursive) {
        Ok(files) => Ok(files),
        Err(e) => {
            term.error(&format!("Error: {e}"))?;
            Ok(Vec::new())
        }
    }
}

/// Lists regular files matching `pattern`, either directly inside `root` or
/// at any depth below it.
///
/// The order is the traversal order: entries sorted by name within each
/// directory, depth first.
pub fn locate(pattern: &str, root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::DirectoryNotFound(root.to_path_buf()));
    }
    if escapes_root(pattern) {
        return Err(Error::GlobOutsideRoot(pattern.to_string()));
    }

    let files = if recursive {
        locate_recursive(pattern, root)?
    } else {
        locate_flat(pattern, root)?
    };

    log::debug!(
        "located {} file(s) for '{}' under {} (recursive: {})",
        files.len(),
        pattern,
        root.display(),
        recursive
    );
    Ok(files)
}

/// True for absolute globs and globs with `..`, which could match outside the root.
fn escapes_root(pattern: &str) -> bool {
    Path::new(pattern).components().any(|component| {
        matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    })
}

/// Applies the pattern to `root/pattern` only.
fn locate_flat(pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
    // Metacharacters in the root are literal; only the file pattern is a glob.
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let full_pattern = Path::new(&escaped_root).join(pattern);

    let mut files = Vec::new();
    for entry in glob::glob_with(&full_pattern.to_string_lossy(), MATCH_OPTIONS)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => log::trace!("skipping non-file {}", path.display()),
            Err(e) => log::warn!("skipping unreadable entry: {e}"),
        }
    }
    Ok(files)
}

/// Walks the whole tree and keeps files whose trailing path components match.
fn locate_recursive(pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if matches_at_any_depth(&pattern, relative) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// True when some suffix of `relative` (by whole components) matches.
///
/// A bare `*.py` therefore matches by file name, while `pkg/*.py` matches
/// files inside any directory called `pkg`.
fn matches_at_any_depth(pattern: &Pattern, relative: &Path) -> bool {
    let components: Vec<_> = relative.components().collect();
    (0..components.len()).any(|start| {
        let tail: PathBuf = components[start..].iter().collect();
        pattern.matches_path_with(&tail, MATCH_OPTIONS)
    })
}

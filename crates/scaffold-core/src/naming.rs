//! Project and package name handling

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn package_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
            .expect("package name pattern is valid")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn disallowed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\-~]+").expect("disallowed pattern is valid"))
}

/// Check whether `name` can be used as-is for the `name` field of a package.json
///
/// Accepts an optional `@scope/` prefix followed by a lowercase package segment.
pub fn is_valid_package_name(name: &str) -> bool {
    package_name_regex().is_match(name)
}

/// Normalize an arbitrary project name into a valid package name
///
/// Trims, lowercases, turns whitespace runs into a single `-`, drops one
/// leading `.` or `_`, then replaces every run of disallowed characters with `-`.
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = whitespace_regex().replace_all(&lowered, "-");
    let stripped = dashed
        .strip_prefix(&['.', '_'][..])
        .unwrap_or(dashed.as_ref());
    disallowed_regex().replace_all(stripped, "-").into_owned()
}

/// Clean up a target directory argument: trim and strip trailing slashes
///
/// Returns `None` when nothing usable is left.
pub fn format_target_dir(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Project name derived from the target directory (`.` means the current directory's name)
pub fn project_name(target_dir: &str, cwd: &Path) -> String {
    if target_dir == "." {
        cwd.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target_dir.to_string())
    } else {
        target_dir.to_string()
    }
}

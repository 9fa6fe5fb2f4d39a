use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

/// Contents of `path`, or an empty string when the file does not exist.
///
/// Any other I/O failure is an error naming the path.
pub fn read_optional(path: &Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// First whitespace-delimited token of `query` and the rest after it.
///
/// `rest` is `None` when no whitespace follows the token.
pub fn split_command(query: &str) -> (&str, Option<&str>) {
    let query = query.trim_start();
    match query.find(char::is_whitespace) {
        Some(idx) => {
            let ws = query[idx..].chars().next().map_or(1, char::len_utf8);
            (&query[..idx], Some(&query[idx + ws..]))
        }
        None => (query, None),
    }
}

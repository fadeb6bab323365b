//! Loading email and name lists from files

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{CorrelateError, Result};

/// Parse a list from text
///
/// A JSON array of strings when the whole text parses as one, otherwise one
/// entry per line. Line endings are trimmed and empty lines skipped; other
/// whitespace is kept so the engine's own blank-name filtering applies.
pub fn parse_list(text: &str) -> Vec<String> {
    if text.trim_start().starts_with('[') {
        match serde_json::from_str(text) {
            Ok(list) => return list,
            Err(err) => debug!(error = %err, "not a JSON array, reading lines"),
        }
    }
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a list from `path`, or from standard input when `path` is `-`
pub fn load_list(path: &Path) -> Result<Vec<String>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CorrelateError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CorrelateError::Io {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(parse_list(&text))
}

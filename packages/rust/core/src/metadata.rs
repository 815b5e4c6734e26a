//! Description-file parser.
//!
//! Description files are plain text where lines starting with a marker
//! character (`%` by default) carry metadata of the form `% key: value`:
//!
//! ```text
//! % name: Sending a message
//! This step adds a `send` call.
//! ```
//!
//! Marked lines never reach the rendered body.

use std::collections::HashMap;
use std::path::Path;

use stepdoc_shared::{Result, StepdocError};

/// Default metadata marker.
pub const DEFAULT_MARKER: char = '%';

/// Separator between a metadata key and its value.
const DELIMITER: char = ':';

/// A description split into body text and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    /// All unmarked lines, verbatim and in order.
    pub body: String,
    /// Lower-cased, trimmed keys mapped to trimmed values.
    pub metadata: HashMap<String, String>,
}

impl ParsedText {
    /// Look up a metadata value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Look up a metadata value that must be present. `resource` names the
    /// file the text came from, for the error message.
    pub fn require(&self, key: &str, resource: &Path) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| StepdocError::missing_metadata(key, resource))
    }
}

/// Split `text` into body and metadata using `marker` as the metadata prefix.
///
/// A marked line is split on `:` and only the first two segments are kept, so
/// `% url: http://x` yields the value `http` rather than the full URL. Marked
/// lines without a `:` are comments and contribute nothing.
pub fn parse_text(text: &str, marker: char) -> ParsedText {
    let mut parsed = ParsedText::default();

    for line in text.split_inclusive('\n') {
        let Some(rest) = line.strip_prefix(marker) else {
            parsed.body.push_str(line);
            continue;
        };

        let mut segments = rest.split(DELIMITER);
        if let (Some(key), Some(value)) = (segments.next(), segments.next()) {
            parsed
                .metadata
                .insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    parsed
}

//! The `<KEY> value` header shared by every TNTP file.

use std::collections::HashMap;
use std::io::BufRead;

use crate::{TntpError, TntpResult};

pub const END_OF_METADATA: &str = "<END OF METADATA>";
pub const NUMBER_OF_ZONES: &str = "<NUMBER OF ZONES>";
pub const NUMBER_OF_NODES: &str = "<NUMBER OF NODES>";

/// Strip a `~` comment and surrounding whitespace.
pub(crate) fn strip_comment(line: &str) -> &str {
    line.split('~').next().unwrap_or("").trim()
}

/// Parsed metadata block.  Keys keep their angle brackets; each value
/// remembers the line it came from.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: HashMap<String, (usize, String)>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(|(_, value)| value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// A required count such as [`NUMBER_OF_ZONES`].
    pub fn count(&self, key: &'static str) -> TntpResult<usize> {
        let (line, value) = self
            .entries
            .get(key)
            .filter(|(_, v)| !v.is_empty())
            .ok_or(TntpError::MissingMetadata(key))?;
        value
            .parse()
            .map_err(|_| TntpError::parse(*line, format!("{key} is not a count: {value:?}")))
    }
}

/// Line-numbered reader over a TNTP file.  Comments are stripped and blank
/// lines skipped.
pub(crate) struct Lines<R> {
    inner:  R,
    buffer: String,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, buffer: String::new(), number: 0 }
    }

    /// Next non-empty, comment-free line with its 1-based line number, or
    /// `None` at end of input.
    pub fn next_line(&mut self) -> TntpResult<Option<(usize, &str)>> {
        loop {
            self.buffer.clear();
            if self.inner.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.number += 1;
            if !strip_comment(&self.buffer).is_empty() {
                return Ok(Some((self.number, strip_comment(&self.buffer))));
            }
        }
    }

    /// Read the header up to and including `<END OF METADATA>`.
    pub fn metadata(&mut self) -> TntpResult<Metadata> {
        let mut entries = HashMap::new();
        loop {
            let Some((number, line)) = self.next_line()?.map(|(n, l)| (n, l.to_string())) else {
                return Err(TntpError::MissingMetadata(END_OF_METADATA));
            };
            if line == END_OF_METADATA {
                return Ok(Metadata { entries });
            }
            let (key, value) = match line.split_once('>') {
                Some((key, value)) => (format!("{}>", key.trim()), value.trim().to_string()),
                None => (line.clone(), String::new()),
            };
            entries.insert(key, (number, value));
        }
    }
}

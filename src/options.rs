/// Controls how the parser treats input it cannot interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub invalid_lines: InvalidLines,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn invalid_lines(mut self, policy: InvalidLines) -> Self {
        self.invalid_lines = policy;
        self
    }
}

/// What to do with a line that is neither a `[section]` header nor a `key=value` entry.
///
/// Malformed headers are always rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidLines {
    /// Fail the parse with [`Error::Syntax`](crate::Error::Syntax).
    #[default]
    Reject,
    /// Log the line, record its number in
    /// [`Document::skipped_lines`](crate::Document::skipped_lines) and carry on.
    Skip,
}

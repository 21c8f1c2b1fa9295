use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::parser::{Parser, trim};
use crate::section::Section;
use crate::value::Value;
use crate::view::SectionView;
use crate::writer;

/// The parse tree: sections by name, in insertion order.
///
/// Values are added relative to an *active section*, which is the section most recently added
/// with [`Document::add_section`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
    active: Option<String>,
    skipped_lines: Vec<usize>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` with the default [`ParseOptions`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self> {
        let mut document = Self::new();
        document.read_from(text.as_bytes(), options)?;
        Ok(document)
    }

    /// Replaces the content of the document with the sections read from `reader`.
    ///
    /// The document is cleared first. If the parse fails, the sections read before the failing
    /// line stay in the document.
    pub fn read_from<R: BufRead>(&mut self, reader: R, options: ParseOptions) -> Result<()> {
        self.clear();
        Parser::new(reader, options).parse_into(self)
    }

    /// Writes every section as a `[name]` header followed by its `key=value` lines.
    pub fn write_to<W: Write>(&self, sink: W) -> std::io::Result<()> {
        writer::write_document(self, sink)
    }

    /// Creates an empty section and makes it the active section.
    ///
    /// Names the parser could not read back (padded with spaces or tabs, or spanning lines) are
    /// rejected.
    pub fn add_section(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::section_missing("section name cannot be empty"));
        }

        if trim(name) != name || name.contains(['\n', '\r']) {
            return Err(Error::section_missing(format!(
                "section name {name:?} cannot be written as a header"
            )));
        }

        if self.sections.contains_key(name) {
            return Err(Error::section_missing(format!("{name} already exists")));
        }

        _ = self
            .sections
            .insert(name.to_owned(), Section::new(name.to_owned()));
        self.active = Some(name.to_owned());
        Ok(())
    }

    /// Removes a section if present. The active section is left as is.
    pub fn remove_section(&mut self, name: &str) {
        _ = self.sections.shift_remove(name);
    }

    /// Stores the canonical text of `value` under `key` in the active section.
    ///
    /// The key must survive a save: no padding, no `=`, no leading `[`, no line breaks. The value
    /// must not contain line breaks.
    pub fn add_value(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let Some(active) = self.active.as_deref() else {
            return Err(Error::section_missing("section name not set"));
        };

        if key.is_empty() {
            return Err(Error::section_missing(format!(
                "key cannot be empty in {active}"
            )));
        }

        if trim(key) != key || key.starts_with('[') || key.contains(['=', '\n', '\r']) {
            return Err(Error::section_missing(format!(
                "key {key:?} cannot be written as an entry in {active}"
            )));
        }

        let value = value.into().into_text();
        if value.contains(['\n', '\r']) {
            return Err(Error::section_missing(format!(
                "value for {key} in {active} cannot span lines"
            )));
        }

        let Some(section) = self.sections.get_mut(active) else {
            return Err(Error::section_missing(format!("{active} not found")));
        };

        section.insert(key.to_owned(), value);
        Ok(())
    }

    /// Returns a typed view over a snapshot of the named section.
    pub fn get(&self, name: &str) -> Result<SectionView> {
        self.section(name)
            .cloned()
            .map(SectionView::new)
            .ok_or_else(|| Error::section_missing(format!("{name} not found")))
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Line numbers (1-based) of invalid lines skipped by the last parse.
    #[must_use]
    pub fn skipped_lines(&self) -> &[usize] {
        &self.skipped_lines
    }

    pub(crate) fn record_skipped(&mut self, line: usize) {
        self.skipped_lines.push(line);
    }

    fn clear(&mut self) {
        self.sections.clear();
        self.active = None;
        self.skipped_lines.clear();
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}

use std::io::BufRead;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::options::{InvalidLines, ParseOptions};

/// Represents an on-going parse.
#[derive(Debug)]
pub(crate) struct Parser<R> {
    reader: R,
    options: ParseOptions,
    line: usize,
}

impl<R: BufRead> Parser<R> {
    #[must_use]
    pub(crate) fn new(reader: R, options: ParseOptions) -> Self {
        Self {
            reader,
            options,
            line: 0,
        }
    }

    /// Feed every line into `document`, stopping at the first error.
    pub(crate) fn parse_into(mut self, document: &mut Document) -> Result<()> {
        let mut buffer = String::with_capacity(256);

        while self.read_line(&mut buffer)? {
            match classify(&buffer) {
                Line::Blank => {}
                Line::Section(name) => {
                    let name = name.map_err(|reason| self.syntax(&buffer, reason))?;
                    log::trace!("line {}: section [{name}]", self.line);
                    document.add_section(name)?;
                }
                Line::Entry(key, value) => document.add_value(key, value)?,
                Line::Invalid => match self.options.invalid_lines {
                    InvalidLines::Reject => {
                        return Err(self.syntax(&buffer, "expected `[section]` or `key=value`"));
                    }
                    InvalidLines::Skip => {
                        log::warn!("invalid line {}: {:?}", self.line, buffer.trim());
                        document.record_skipped(self.line);
                    }
                },
            }
        }

        Ok(())
    }

    /// Read the next line into `buffer` without its terminator. Returns `false` at end of input.
    fn read_line(&mut self, buffer: &mut String) -> Result<bool> {
        buffer.clear();

        let read = self
            .reader
            .read_line(buffer)
            .map_err(|source| Error::Io { path: None, source })?;

        if read == 0 {
            return Ok(false);
        }

        self.line += 1;

        if buffer.ends_with('\n') {
            _ = buffer.pop();
            if buffer.ends_with('\r') {
                _ = buffer.pop();
            }
        }

        Ok(true)
    }

    fn syntax(&self, text: &str, reason: &'static str) -> Error {
        Error::Syntax {
            line: self.line,
            text: text.to_owned(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Section(std::result::Result<&'a str, &'static str>),
    Entry(&'a str, &'a str),
    Invalid,
}

fn classify(raw: &str) -> Line<'_> {
    let line = trim(raw);

    if line.is_empty() {
        Line::Blank
    } else if let Some(rest) = line.strip_prefix('[') {
        Line::Section(
            rest.strip_suffix(']')
                .map(trim)
                .ok_or("section header is missing `]`"),
        )
    } else if let Some((key, value)) = line.split_once('=') {
        Line::Entry(trim(key), trim(value))
    } else {
        Line::Invalid
    }
}

/// Spaces and tabs only; other whitespace is part of the data.
pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn classify_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify(" \t "), Line::Blank);
        assert_eq!(classify("[Books]"), Line::Section(Ok("Books")));
        assert_eq!(classify("  [ My Books ]\t"), Line::Section(Ok("My Books")));
        assert_eq!(classify("[]"), Line::Section(Ok("")));
        assert!(matches!(classify("["), Line::Section(Err(_))));
        assert!(matches!(classify("[Books"), Line::Section(Err(_))));
        assert_eq!(classify("key = value"), Line::Entry("key", "value"));
        assert_eq!(classify("url=a=b"), Line::Entry("url", "a=b"));
        assert_eq!(classify("key="), Line::Entry("key", ""));
        assert_eq!(classify("key_without_value"), Line::Invalid);
    }

    #[test]
    fn multiple_sections() {
        let text = "
[Books]
title = Harry Potter
year=2017

[Movies]
\ttitle\t=\tAlien
";

        let doc = Document::parse(text).expect("failed to parse hardcoded INI text");

        assert_eq!(doc.section_count(), 2);
        let books = doc.get("Books").expect("parsed");
        assert_eq!(books.get_string("title").expect("parsed"), "Harry Potter");
        assert_eq!(books.get_int("year").expect("parsed"), 2017);
        assert_eq!(
            doc.get("Movies")
                .and_then(|v| v.get_string("title"))
                .expect("parsed"),
            "Alien"
        );
    }

    #[test]
    fn crlf_line_endings() {
        let doc = Document::parse("[Books]\r\ntitle=Emma\r\n").expect("valid input");
        assert_eq!(
            doc.get("Books")
                .and_then(|v| v.get_string("title"))
                .expect("parsed"),
            "Emma"
        );
    }

    #[test]
    fn empty_value_is_kept() {
        let doc = Document::parse("[Books]\ntitle=\n").expect("valid input");
        let books = doc.get("Books").expect("parsed");

        assert!(books.contains_key("title"));
        assert!(matches!(
            books.get_string("title"),
            Err(Error::ValueMissing { .. })
        ));
    }

    #[test]
    fn invalid_line_is_rejected_by_default() {
        let err = Document::parse("[Books]\ntitle=Emma\nkey_without_value\n")
            .expect_err("line 3 is invalid");

        assert!(matches!(
            err,
            Error::Syntax { line: 3, ref text, .. } if text == "key_without_value"
        ));
    }

    #[test]
    fn invalid_line_can_be_skipped() {
        let options = ParseOptions::new().invalid_lines(InvalidLines::Skip);
        let doc = Document::parse_with("[Books]\nkey_without_value\nyear=2017\n", options)
            .expect("invalid lines are skipped");

        assert_eq!(doc.skipped_lines(), &[2]);
        assert_eq!(
            doc.get("Books").and_then(|v| v.get_int("year")).expect("parsed"),
            2017
        );
    }

    #[test]
    fn lone_bracket_is_a_syntax_error() {
        let options = ParseOptions::new().invalid_lines(InvalidLines::Skip);
        let err = Document::parse_with("[\n", options).expect_err("header is malformed");

        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn empty_header_is_section_missing() {
        let err = Document::parse("[ ]\n").expect_err("name is empty");
        assert_eq!(err.kind(), ErrorKind::SectionMissing);
    }

    #[test]
    fn duplicate_header_aborts() {
        let mut doc = Document::new();
        let err = doc
            .read_from(
                "[Books]\ntitle=Emma\n[Books]\nyear=1815\n".as_bytes(),
                ParseOptions::default(),
            )
            .expect_err("Books appears twice");

        assert_eq!(err.kind(), ErrorKind::SectionMissing);
        // The part read before the failure stays in the document.
        assert_eq!(doc.section_count(), 1);
    }

    #[test]
    fn entry_before_any_section() {
        let err = Document::parse("title=Emma\n").expect_err("no section yet");
        assert_eq!(err.kind(), ErrorKind::SectionMissing);
    }

    #[test]
    fn last_line_without_newline() {
        let doc = Document::parse("[Books]\nyear=2017").expect("valid input");
        assert_eq!(
            doc.get("Books").and_then(|v| v.get_int("year")).expect("parsed"),
            2017
        );
    }
}

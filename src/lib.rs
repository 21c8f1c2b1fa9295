#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Read and write INI files: `[section]` headers followed by `key=value` lines.
//!
//! ```text
//! [Books]
//! title=Harry Potter
//! year=2017
//! ```
//!
//! Values are stored as text and converted when read through a [`SectionView`].

mod document;
mod error;
mod options;
mod parser;
mod section;
mod value;
mod view;
mod writer;

use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

pub use document::Document;
pub use error::{Error, ErrorKind, Expected, Result};
pub use options::{InvalidLines, ParseOptions};
pub use section::Section;
pub use value::Value;
pub use view::SectionView;

/// UTF-8 Byte Order Mark, written by some Windows editors at the start of a text file.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A [`Document`] bound to a file on disk.
///
/// The file is only touched by [`IniFile::parse`] and [`IniFile::save`] (and their `*_from`/`*_to`
/// variants); every other operation works on the in-memory document.
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    path: Option<PathBuf>,
    options: ParseOptions,
    document: Document,
}

impl IniFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ParseOptions::default())
    }

    #[must_use]
    pub fn with_options(path: impl Into<PathBuf>, options: ParseOptions) -> Self {
        Self {
            path: Some(path.into()),
            options,
            document: Document::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replaces the document with the content of the bound file.
    pub fn parse(&mut self) -> Result<()> {
        let path = self.bound_path()?;
        let data = fs::read(&path).map_err(|source| Error::Io {
            path: Some(path.clone()),
            source,
        })?;

        self.document
            .read_from(strip_bom(&data), self.options)
            .map_err(|err| match err {
                Error::Io { path: None, source } => Error::Io {
                    path: Some(path.clone()),
                    source,
                },
                other => other,
            })?;

        log::debug!(
            "parsed {} ({} sections)",
            path.display(),
            self.document.section_count()
        );

        Ok(())
    }

    /// Binds `path` and parses it.
    pub fn parse_from(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = Some(path.into());
        self.parse()
    }

    /// Writes the document to the bound file, replacing its content.
    pub fn save(&self) -> Result<()> {
        let path = self.bound_path()?;
        let file = fs::File::create(&path).map_err(|source| Error::Io {
            path: Some(path.clone()),
            source,
        })?;

        self.document.write_to(file).map_err(|source| Error::Io {
            path: Some(path.clone()),
            source,
        })?;

        log::debug!(
            "saved {} ({} sections)",
            path.display(),
            self.document.section_count()
        );

        Ok(())
    }

    /// Binds `path` and saves to it.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = Some(path.into());
        self.save()
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    fn bound_path(&self) -> Result<PathBuf> {
        self.path.clone().ok_or_else(|| Error::Io {
            path: None,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name bound"),
        })
    }
}

impl Deref for IniFile {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl DerefMut for IniFile {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(BOM_UTF8).unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_skipped() {
        let data = b"\xEF\xBB\xBF[Books]\nyear=2017\n";
        let mut doc = Document::new();
        doc.read_from(strip_bom(data), ParseOptions::default())
            .expect("failed to parse hardcoded INI text");

        assert!(doc.contains_section("Books"));
    }

    #[test]
    fn unbound_file_cannot_be_parsed_or_saved() {
        let mut file = IniFile::default();

        assert_eq!(file.path(), None);
        assert_eq!(file.parse().map_err(|e| e.kind()), Err(ErrorKind::Io));
        assert_eq!(file.save().map_err(|e| e.kind()), Err(ErrorKind::Io));
    }

    #[test]
    fn store_operations_through_deref() {
        let mut file = IniFile::new("unused.ini");
        file.add_section("Books").expect("new section");
        file.add_value("year", 2017).expect("active section set");

        assert_eq!(file.section_count(), 1);
        assert_eq!(
            file.get("Books").and_then(|v| v.get_int("year")).expect("added"),
            2017
        );
    }

    #[test]
    fn into_document_keeps_content() {
        let mut file = IniFile::new("unused.ini");
        file.add_section("Books").expect("new section");
        file.add_value("title", "Emma").expect("active section set");
        let expected = (*file).clone();

        let doc = file.into_document();

        assert_eq!(doc, expected);
        assert_eq!(doc.active_section(), Some("Books"));
    }
}

use std::io::{self, BufWriter, Write};

use crate::document::Document;

/// Writes sections in insertion order, separated by a blank line.
pub(crate) fn write_document<W: Write>(document: &Document, writer: W) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);

    for (i, section) in document.sections().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }

        writeln!(writer, "[{}]", section.name())?;

        for (key, value) in section.entries() {
            writeln!(writer, "{key}={value}")?;
        }
    }

    writer.flush()
}

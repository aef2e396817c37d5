/// Output formatting for the CLI
///
/// - JSON: one pretty-printed document (a metadata object or a path map)
/// - NDJSON: one compact line per document, `{"path": ..., "meta": ...}` for maps
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,

    /// Newline-delimited JSON (streaming)
    Ndjson,
}

#[derive(Serialize)]
struct NdjsonEntry<'a, T> {
    path: &'a str,
    meta: &'a T,
}

pub struct OutputWriter<W: Write> {
    format: OutputFormat,
    writer: W,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self { format, writer }
    }

    /// Write a single metadata document (`null` for "no registration")
    pub fn write_document<T: Serialize>(&mut self, document: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json => writeln!(self.writer, "{}", serde_json::to_string_pretty(document)?)?,
            OutputFormat::Ndjson => writeln!(self.writer, "{}", serde_json::to_string(document)?)?,
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Write a path -> metadata map
    pub fn write_map<T: Serialize>(&mut self, map: &BTreeMap<String, T>) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(self.writer, "{}", serde_json::to_string_pretty(map)?)?;
            }
            OutputFormat::Ndjson => {
                for (path, meta) in map {
                    let entry = NdjsonEntry { path, meta };
                    writeln!(self.writer, "{}", serde_json::to_string(&entry)?)?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

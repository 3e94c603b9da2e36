use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::InputEncoding;
use crate::error::{ConvertError, Result};

/// One row of a UN/LOCODE code list part. The files carry no header, so the
/// fields are read by position in this order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct LocodeRow {
    /// Change indicator (`+`, `#`, `X`, ...)
    pub change: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub location: String,
    pub name: String,
    pub name_wo_diacritics: String,
    pub subdivision: String,
    /// Function classifier, e.g. `1-3-----`
    pub function: String,
    pub status: String,
    pub date: String,
    pub iata: String,
    pub coordinates: String,
    pub remarks: String,
}

/// Streaming reader over a single code list part.
pub struct LocodeReader {
    path: PathBuf,
    encoding: InputEncoding,
    inner: csv::Reader<File>,
    record: csv::ByteRecord,
}

impl LocodeReader {
    pub fn open<P: AsRef<Path>>(path: P, encoding: InputEncoding) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ConvertError::MissingInputFile { path });
        }

        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|source| ConvertError::Read {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            encoding,
            inner,
            record: csv::ByteRecord::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next row, `None` at end of file.
    pub fn next_row(&mut self) -> Result<Option<LocodeRow>> {
        let more = self
            .inner
            .read_byte_record(&mut self.record)
            .map_err(|source| ConvertError::Read {
                path: self.path.clone(),
                source,
            })?;
        if !more {
            return Ok(None);
        }

        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        let decoded = match self.encoding {
            InputEncoding::Utf8 => csv::StringRecord::from_byte_record(self.record.clone())
                .map_err(|_| ConvertError::Encoding {
                    path: self.path.clone(),
                    line,
                })?,
            InputEncoding::Latin1 => self
                .record
                .iter()
                .map(|field| field.iter().map(|&b| b as char).collect::<String>())
                .collect(),
        };

        let row = decoded
            .deserialize(None)
            .map_err(|source| ConvertError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(row))
    }
}

impl Iterator for LocodeReader {
    type Item = Result<LocodeRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

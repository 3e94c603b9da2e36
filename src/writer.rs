use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::error::{ConvertError, Result};
use crate::tables::Table;

/// Check that the serde layout of `T` lists exactly `T::COLUMNS`.
pub fn validate_contract<T: Table>() -> Result<()> {
    let found = serialized_header(&T::default()).map_err(|source| ConvertError::Write {
        path: PathBuf::from(T::NAME),
        source,
    })?;

    if found.iter().map(String::as_str).ne(T::COLUMNS.iter().copied()) {
        return Err(ConvertError::SchemaMismatch {
            table: T::NAME,
            expected: T::COLUMNS.iter().map(|c| c.to_string()).collect(),
            found,
        });
    }
    Ok(())
}

fn serialized_header<T: Table>(sample: &T) -> std::result::Result<Vec<String>, csv::Error> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.serialize(sample)?;
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes.as_slice());
    let header = match rdr.records().next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => Vec::new(),
    };
    Ok(header)
}

/// An open output table. The header row is written on creation; rows are
/// appended one at a time.
pub struct TableWriter<T: Table> {
    path: PathBuf,
    inner: Writer<File>,
    rows: u64,
    _table: PhantomData<T>,
}

impl<T: Table> TableWriter<T> {
    /// Create (or truncate) `<dir>/<T::NAME>.csv` and write its header.
    pub fn create(dir: &Path) -> Result<Self> {
        validate_contract::<T>()?;

        let path = dir.join(format!("{}.csv", T::NAME));
        let inner = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Necessary)
            .from_path(&path)
            .map_err(|source| ConvertError::Write {
                path: path.clone(),
                source,
            })?;

        let mut writer = Self {
            path,
            inner,
            rows: 0,
            _table: PhantomData,
        };
        let header = T::COLUMNS;
        writer
            .inner
            .write_record(header)
            .map_err(|source| writer.write_error(source))?;
        Ok(writer)
    }

    pub fn append(&mut self, row: &T) -> Result<()> {
        self.inner
            .serialize(row)
            .map_err(|source| self.write_error(source))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and close the file, returning the number of data rows written.
    pub fn finish(mut self) -> Result<u64> {
        self.inner.flush().map_err(|e| ConvertError::Write {
            path: self.path.clone(),
            source: e.into(),
        })?;
        Ok(self.rows)
    }

    fn write_error(&self, source: csv::Error) -> ConvertError {
        ConvertError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Write a whole table at once: header followed by `rows`.
pub fn write_table<T: Table>(dir: &Path, rows: &[T]) -> Result<u64> {
    let mut writer = TableWriter::<T>::create(dir)?;
    for row in rows {
        writer.append(row)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Actor, ActorName, DataSource, Publisher, Territory};
    use serde::Serialize;

    #[derive(Default, Serialize)]
    struct Swapped {
        b: String,
        a: String,
    }

    impl Table for Swapped {
        const NAME: &'static str = "Swapped";
        const COLUMNS: &'static [&'static str] = &["a", "b"];
    }

    #[test]
    fn output_tables_match_their_contracts() {
        validate_contract::<Publisher>().unwrap();
        validate_contract::<DataSource>().unwrap();
        validate_contract::<Actor>().unwrap();
        validate_contract::<ActorName>().unwrap();
        validate_contract::<Territory>().unwrap();
    }

    #[test]
    fn reordered_fields_are_rejected() {
        let err = validate_contract::<Swapped>().unwrap_err();
        assert!(matches!(err, ConvertError::SchemaMismatch { table: "Swapped", .. }));
    }

    #[test]
    fn header_is_written_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TableWriter::<Territory>::create(dir.path()).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);

        let written = std::fs::read_to_string(dir.path().join("Territory.csv")).unwrap();
        assert_eq!(written, "actor_id,lat,lng,datasource_id\r\n");
    }

    #[test]
    fn rows_are_quoted_only_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher {
            id: "UNECE".into(),
            name: "Commission, Europe".into(),
            url: "https://unece.org/".into(),
        };
        assert_eq!(write_table(dir.path(), &[publisher]).unwrap(), 1);

        let written = std::fs::read_to_string(dir.path().join("Publisher.csv")).unwrap();
        assert_eq!(
            written,
            "id,name,URL\r\nUNECE,\"Commission, Europe\",https://unece.org/\r\n"
        );
    }

    #[test]
    fn create_truncates_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Actor.csv"), "stale contents\n").unwrap();

        TableWriter::<Actor>::create(dir.path()).unwrap().finish().unwrap();
        let written = std::fs::read_to_string(dir.path().join("Actor.csv")).unwrap();
        assert_eq!(written, "actor_id,type,name,is_part_of,datasource_id\r\n");
    }
}

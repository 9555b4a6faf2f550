//! Row dumps: CSV cell listings read into a [`Row`].
//!
//! A dump is a CSV file with a `family,qualifier,value` header and one cell
//! per line. With hex values enabled the value column is decoded from hex,
//! which is how binary cells (packed integers, floats) are written into
//! dumps.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use cellmap_model::Row;

/// Errors raised while reading a row dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Dump file missing or unreadable.
    #[error("failed to read row dump {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse row dump {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Value column is not valid hex.
    #[error("invalid hex value for {family}:{qualifier} in {path}: {source}")]
    HexValue {
        path: PathBuf,
        family: String,
        qualifier: String,
        #[source]
        source: hex::FromHexError,
    },
}

/// Result type for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;

#[derive(Debug, Deserialize)]
struct CellLine {
    family: String,
    qualifier: String,
    value: String,
}

/// Read a row dump into a sorted [`Row`].
pub fn read_row_dump(path: &Path, hex_values: bool) -> Result<Row> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;

    let mut builder = Row::builder();
    let mut cells = 0usize;
    for line in reader.deserialize::<CellLine>() {
        let cell = line.map_err(|source| csv_error(path, source))?;

        let value = if hex_values {
            hex::decode(cell.value.trim()).map_err(|source| DumpError::HexValue {
                path: path.to_path_buf(),
                family: cell.family.clone(),
                qualifier: cell.qualifier.clone(),
                source,
            })?
        } else {
            cell.value.into_bytes()
        };

        builder = builder.cell(cell.family, cell.qualifier, value);
        cells += 1;
    }

    tracing::debug!(path = %path.display(), cells, "loaded row dump");
    Ok(builder.build())
}

fn csv_error(path: &Path, source: csv::Error) -> DumpError {
    let message = source.to_string();
    match source.into_kind() {
        csv::ErrorKind::Io(io) => DumpError::FileRead {
            path: path.to_path_buf(),
            source: io,
        },
        _ => DumpError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_dump(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn reads_text_values() {
        let file = write_dump("family,qualifier,value\ncf,q1,A\ncf,q2,B\n");
        let row = read_row_dump(file.path(), false).unwrap();

        assert_eq!(row.cell_count(), 2);
        assert_eq!(row.value(b"cf", b"q1"), Some(b"A".as_slice()));
    }

    #[test]
    fn reads_hex_values() {
        let file = write_dump("family,qualifier,value\ninfo,age,00000029\n");
        let row = read_row_dump(file.path(), true).unwrap();

        assert_eq!(
            row.value(b"info", b"age"),
            Some(41i32.to_be_bytes().as_slice())
        );
    }

    #[test]
    fn bad_hex_names_the_cell() {
        let file = write_dump("family,qualifier,value\ninfo,age,zz\n");
        let error = read_row_dump(file.path(), true).unwrap_err();

        assert!(matches!(error, DumpError::HexValue { ref qualifier, .. } if qualifier == "age"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = read_row_dump(Path::new("/no/such/dump.csv"), false).unwrap_err();
        assert!(matches!(error, DumpError::FileRead { .. }));
    }
}

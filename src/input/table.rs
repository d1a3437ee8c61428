use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

/// A delimited-text table kept as strings so every input column can be
/// written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Column index by header name, ignoring surrounding whitespace.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn require_column(&self, name: &str, path: &Path) -> Result<usize, InputError> {
        self.column(name).ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    }

    /// Cell text, or `None` for short rows and blank cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(col)?;
        if value.trim().is_empty() {
            None
        } else {
            Some(value.as_str())
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = decode_record(rdr.byte_headers()?);
        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            let mut row = decode_record(&record?);
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }
}

// Invalid UTF-8 (e.g. Latin-1 exports) is replaced with U+FFFD.
fn decode_record(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

pub fn read_table(path: &Path) -> Result<Table, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = Table::from_reader(reader, delimiter_for(path)).map_err(|source| {
        InputError::Csv {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if table.headers.iter().all(|h| h.trim().is_empty()) {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    Ok(table)
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Tab for `.tsv` and `.tsv.gz`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".tsv") || name.ends_with(".tab") {
        b'\t'
    } else {
        b','
    }
}

//! Typed reading of delimiter separated files
//!
//! Every line of the file becomes one tuple. The tuple type fixes the number of columns and the
//! type of each column, so a file `1.5,2,label` is read as `(f64, i32, String)`.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Position, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;

use crate::error::{DatasetError, Result};

/// A row type with a fixed number of columns
pub trait Row: DeserializeOwned {
    const ARITY: usize;
}

macro_rules! impl_row {
    ($($arity:literal => ($($field:ident),+);)+) => {
        $(
            impl<$($field: DeserializeOwned),+> Row for ($($field,)+) {
                const ARITY: usize = $arity;
            }
        )+
    };
}

impl_row! {
    1 => (A);
    2 => (A, B);
    3 => (A, B, C);
    4 => (A, B, C, D);
    5 => (A, B, C, D, E);
    6 => (A, B, C, D, E, F);
    7 => (A, B, C, D, E, F, G);
    8 => (A, B, C, D, E, F, G, H);
    9 => (A, B, C, D, E, F, G, H, I);
    10 => (A, B, C, D, E, F, G, H, I, J);
    11 => (A, B, C, D, E, F, G, H, I, J, K);
    12 => (A, B, C, D, E, F, G, H, I, J, K, L);
}

/// Format of a delimiter separated file
///
/// Defaults to `,` as delimiter and no header line.
///
/// ```
/// use lstsq_datasets::SeparatedReader;
///
/// let file = SeparatedReader::new()
///     .delimiter(';')
///     .has_headers(true)
///     .from_reader::<(f64, String), _>("x;name\n1.5;a\n2; b\n".as_bytes())
///     .unwrap();
///
/// assert_eq!(file.len(), 2);
/// assert_eq!(file[1], (2.0, "b".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatedReader {
    delimiter: char,
    has_headers: bool,
}

impl Default for SeparatedReader {
    fn default() -> Self {
        SeparatedReader {
            delimiter: ',',
            has_headers: false,
        }
    }
}

impl SeparatedReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column delimiter, has to be a single ASCII character
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip the first line of the file
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub(crate) fn csv_reader<R: Read>(&self, rdr: R) -> Result<csv::Reader<R>> {
        if !self.delimiter.is_ascii() {
            return Err(DatasetError::InvalidDelimiter(self.delimiter));
        }

        Ok(ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr))
    }

    /// Read and convert every line of the file at `path`
    pub fn open<T: Row, P: AsRef<Path>>(&self, path: P) -> Result<SeparatedFile<T>> {
        self.from_reader(open_file(path.as_ref())?)
    }

    /// Read and convert every line of `rdr`
    ///
    /// Fails on the first line whose column count differs from the arity of `T` or whose fields
    /// cannot be converted. Empty lines are skipped.
    pub fn from_reader<T: Row, R: Read>(&self, rdr: R) -> Result<SeparatedFile<T>> {
        let mut reader = self.csv_reader(rdr)?;
        let mut record = StringRecord::new();
        let mut rows = Vec::new();

        while reader.read_record(&mut record)? {
            let line = record.position().map_or(0, Position::line);
            if record.len() != T::ARITY {
                return Err(DatasetError::ColumnCount {
                    line,
                    expected: T::ARITY,
                    actual: record.len(),
                });
            }

            let row = record
                .deserialize::<T>(None)
                .map_err(|source| DatasetError::Parse { line, source })?;
            rows.push(row);
        }

        Ok(SeparatedFile { rows })
    }
}

pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parsed rows of a delimiter separated file
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatedFile<T> {
    rows: Vec<T>,
}

impl<T: Row> SeparatedFile<T> {
    /// Read a comma separated file without header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        SeparatedReader::default().open(path)
    }

    /// Read comma separated lines without header from `rdr`
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        SeparatedReader::default().from_reader(rdr)
    }
}

impl<T> SeparatedFile<T> {
    pub fn data(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.rows
    }
}

impl<T> std::ops::Index<usize> for SeparatedFile<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.rows[index]
    }
}

impl<T> IntoIterator for SeparatedFile<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SeparatedFile<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

//! Streaming readers for annotation and query records.
//!
//! Both inputs are tab-delimited text, one record per line. Blank lines
//! and `#` comment lines are skipped. Any other line that fails
//! validation aborts the load: the readers never skip a bad record.

use crate::config::rejects_interval;
use crate::interval::{AnnotationInterval, Coord, QueryPosition};
use crate::parsing::{
    count_fields, nth_field, parse_coord, should_skip_line, split_fields, trim_line_end,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Minimum number of fields in an annotation record.
pub const ANNOTATION_MIN_FIELDS: usize = 5;

/// Exact number of fields in a query record.
pub const QUERY_FIELDS: usize = 2;

/// Errors that can occur while loading records.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed record at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Invalid interval at line {line}: end ({end}) < start ({start})")]
    InvalidInterval {
        line: usize,
        start: Coord,
        end: Coord,
    },
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// Line-numbered reader shared by both record kinds.
struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Advance to the next line that carries a record.
    fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if should_skip_line(trim_line_end(&self.buffer)) {
                continue;
            }
            return Ok(Some((self.line_number, trim_line_end(&self.buffer))));
        }
    }
}

fn malformed(line: usize, message: impl Into<String>) -> RecordError {
    RecordError::Malformed {
        line,
        message: message.into(),
    }
}

fn utf8_field<'a>(line: usize, bytes: &'a [u8], what: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| malformed(line, format!("{} is not valid UTF-8", what)))
}

fn coord_field(line: usize, bytes: &[u8], field_name: &str) -> Result<Coord> {
    parse_coord(bytes).ok_or_else(|| {
        malformed(
            line,
            format!(
                "Invalid {} coordinate: '{}'",
                field_name,
                String::from_utf8_lossy(bytes)
            ),
        )
    })
}

/// A streaming annotation reader.
///
/// Fields 1, 4 and 5 (chromosome, start, end) are interpreted; the end
/// field is exclusive in the source and is converted to inclusive by
/// subtracting one. The whole line is kept as the interval's payload.
pub struct AnnotationReader<R: Read> {
    lines: LineReader<R>,
}

impl AnnotationReader<File> {
    /// Open an annotation file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> AnnotationReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 256 * 1024)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            lines: LineReader::with_capacity(reader, capacity),
        }
    }

    /// Read the next annotation interval.
    pub fn read_record(&mut self) -> Result<Option<AnnotationInterval>> {
        match self.lines.next_line()? {
            Some((line_number, line)) => parse_annotation_line(line_number, line).map(Some),
            None => Ok(None),
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> AnnotationIter<R> {
        AnnotationIter { reader: self }
    }
}

fn parse_annotation_line(line_number: usize, line: &[u8]) -> Result<AnnotationInterval> {
    let (chrom, start, end) = match (
        nth_field(line, 0),
        nth_field(line, 3),
        nth_field(line, ANNOTATION_MIN_FIELDS - 1),
    ) {
        (Some(chrom), Some(start), Some(end)) => (chrom, start, end),
        _ => {
            return Err(malformed(
                line_number,
                format!(
                    "Expected at least {} fields, got {}",
                    ANNOTATION_MIN_FIELDS,
                    count_fields(line)
                ),
            ))
        }
    };

    let chrom = utf8_field(line_number, chrom, "chromosome")?;
    let start = coord_field(line_number, start, "start")?;
    // Exclusive source end to inclusive end; parse_coord bounds the magnitude.
    let end = coord_field(line_number, end, "end")? - 1;

    if rejects_interval(start, end) {
        return Err(RecordError::InvalidInterval {
            line: line_number,
            start,
            end,
        });
    }

    let payload = utf8_field(line_number, line, "record")?;
    Ok(AnnotationInterval::new(chrom, start, end, payload))
}

/// Iterator over annotation records.
pub struct AnnotationIter<R: Read> {
    reader: AnnotationReader<R>,
}

impl<R: Read> Iterator for AnnotationIter<R> {
    type Item = Result<AnnotationInterval>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// A streaming query reader for `chromosome \t position` records.
pub struct QueryReader<R: Read> {
    lines: LineReader<R>,
}

impl QueryReader<File> {
    /// Open a query file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> QueryReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 256 * 1024)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            lines: LineReader::with_capacity(reader, capacity),
        }
    }

    /// Read the next query position.
    pub fn read_record(&mut self) -> Result<Option<QueryPosition>> {
        match self.lines.next_line()? {
            Some((line_number, line)) => parse_query_line(line_number, line).map(Some),
            None => Ok(None),
        }
    }

    pub fn records(self) -> QueryIter<R> {
        QueryIter { reader: self }
    }
}

fn parse_query_line(line_number: usize, line: &[u8]) -> Result<QueryPosition> {
    let mut fields = split_fields(line);
    let (chrom, position) = match (fields.next(), fields.next(), fields.next()) {
        (Some(chrom), Some(position), None) => (chrom, position),
        _ => {
            return Err(malformed(
                line_number,
                format!(
                    "Expected {} fields, got {}",
                    QUERY_FIELDS,
                    count_fields(line)
                ),
            ))
        }
    };

    let chrom = utf8_field(line_number, chrom, "chromosome")?;
    let position = coord_field(line_number, position, "position")?;
    Ok(QueryPosition::new(chrom, position))
}

/// Iterator over query records.
pub struct QueryIter<R: Read> {
    reader: QueryReader<R>,
}

impl<R: Read> Iterator for QueryIter<R> {
    type Item = Result<QueryPosition>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Parse annotation intervals from a string (useful for testing).
pub fn parse_annotations(content: &str) -> Result<Vec<AnnotationInterval>> {
    AnnotationReader::new(content.as_bytes()).records().collect()
}

/// Parse query positions from a string (useful for testing).
pub fn parse_queries(content: &str) -> Result<Vec<QueryPosition>> {
    QueryReader::new(content.as_bytes()).records().collect()
}

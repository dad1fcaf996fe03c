//! Buffered match output.
//!
//! Uses itoa for the position column so the hot path formats without
//! allocating.

use crate::records::RecordError;
use crate::sweep::Match;
use std::io::{BufWriter, Write};

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Writer for `chrom \t position \t payload` lines.
pub struct MatchWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    lines: usize,
}

impl<W: Write> MatchWriter<W> {
    /// Create a new MatchWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            lines: 0,
        }
    }

    /// Write one match as a single output line.
    #[inline]
    pub fn write_match(&mut self, m: &Match<'_>) -> Result<(), RecordError> {
        self.writer.write_all(m.chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(m.position).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(m.interval.payload.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Write every match from an iterator, returning how many were written.
    pub fn write_matches<'a, I>(&mut self, matches: I) -> Result<usize, RecordError>
    where
        I: IntoIterator<Item = Match<'a>>,
    {
        let before = self.lines;
        for m in matches {
            self.write_match(&m)?;
        }
        Ok(self.lines - before)
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }
}

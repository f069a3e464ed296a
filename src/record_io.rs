//! Flat comma-separated record file.
//!
//! One record per line with six fields:
//!
//! ```text
//! V100,Casablanca,2.99,1942,PG,F
//! ```
//!
//! id, title, rental rate (two fraction digits), year, rating and the
//! new-release flag `T` or `F`. There is no header, quoting or escaping,
//! so text fields may not contain commas or line breaks.

use std::io::{BufRead, Write};

use crate::error::{MalformedReason, StoreError};
use crate::record::Video;

/// Reads [`Video`] records line by line.
#[derive(Debug)]
pub struct VideoReader<R> {
    input: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> VideoReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Next record, or `None` at end of input. Blank lines are skipped.
    pub fn read_video(&mut self) -> Result<Option<Video>, StoreError> {
        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim_end_matches(['\n', '\r']);
            if text.trim().is_empty() {
                continue;
            }
            return parse_line(text)
                .map(Some)
                .map_err(|reason| StoreError::Malformed {
                    line: self.line,
                    reason,
                });
        }
    }
}

impl<R: BufRead> Iterator for VideoReader<R> {
    type Item = Result<Video, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_video().transpose()
    }
}

fn parse_line(text: &str) -> Result<Video, MalformedReason> {
    let fields: Vec<&str> = text.split(',').collect();
    let &[id, title, price, year, rating, flag] = fields.as_slice() else {
        return Err(MalformedReason::FieldCount(fields.len()));
    };

    let rental_rate: f64 = price
        .trim()
        .parse()
        .map_err(|_| MalformedReason::Price(price.to_string()))?;
    if !rental_rate.is_finite() {
        return Err(MalformedReason::Price(price.to_string()));
    }
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| MalformedReason::Year(year.to_string()))?;
    let new_release = match flag {
        "T" => true,
        "F" => false,
        other => return Err(MalformedReason::Flag(other.to_string())),
    };

    Ok(Video::new(id, title, rental_rate, year, rating, new_release))
}

/// Writes [`Video`] records, one per line.
#[derive(Debug)]
pub struct VideoWriter<W> {
    output: W,
}

impl<W: Write> VideoWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Append one record. Nothing is written if a text field would break
    /// the line format.
    pub fn write_video(&mut self, video: &Video) -> Result<(), StoreError> {
        check_field("id", video.id())?;
        check_field("title", video.title())?;
        check_field("rating", video.rating())?;

        writeln!(
            self.output,
            "{},{},{:.2},{},{},{}",
            video.id(),
            video.title(),
            video.rental_rate(),
            video.year(),
            video.rating(),
            if video.is_new_release() { "T" } else { "F" }
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.output.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, StoreError> {
        self.output.flush()?;
        Ok(self.output)
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.contains([',', '\n', '\r']) {
        return Err(StoreError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

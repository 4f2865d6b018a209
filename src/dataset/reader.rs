use super::record::FacilityRecord;
use anyhow::{Context, Result};
use csv::ByteRecord;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// CSV source of facility rows.
///
/// Rows may be ragged. Cells are decoded as UTF-8 and fall back to Latin-1,
/// which is what the CMS exports use. Blank lines come back as empty records
/// so callers can count them.
pub struct FacilityReader<R: Read> {
    inner: csv::Reader<LastByte<R>>,
    headers: Vec<String>,
}

impl FacilityReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file at {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read header row of {}", path.display()))
    }
}

impl<R: Read> FacilityReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        // Split on '\n' only so every line terminator is consumed by the row it
        // ends; a trailing '\r' is stripped in `decode_row`.
        let mut inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_reader(LastByte::new(reader));

        let mut headers = decode_row(
            inner
                .byte_headers()
                .context("Failed to parse CSV header row")?,
        );
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        Ok(Self { inner, headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Remaining data rows, with one empty record per blank line. A broken row
    /// ends the run with an error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            inner: &mut self.inner,
            row: ByteRecord::new(),
            blank_lines: 0,
            last_extra: 0,
            pending: None,
            done: false,
        }
    }
}

/// Iterator returned by [`FacilityReader::records`].
pub struct Records<'r, R: Read> {
    inner: &'r mut csv::Reader<LastByte<R>>,
    row: ByteRecord,
    /// Blank lines seen but not yet yielded
    blank_lines: u64,
    /// Newlines the last row consumed beyond its own cells
    last_extra: u64,
    pending: Option<FacilityRecord>,
    done: bool,
}

impl<R: Read> Records<'_, R> {
    fn read_row(&mut self) -> Result<Option<FacilityRecord>> {
        let line_before = self.inner.position().line();
        let more = self.inner.read_byte_record(&mut self.row).map_err(|err| {
            let line = err.position().map_or(line_before, |pos| pos.line());
            anyhow::Error::new(err).context(format!("Failed to parse CSV row at line {}", line))
        })?;
        let consumed = self.inner.position().line() - line_before;

        if !more {
            // Whatever is left after the last row is blank lines. If that row
            // had no terminator, one of the newlines it consumed was a blank line.
            self.blank_lines += consumed;
            if self.last_extra > 0 && self.inner.get_ref().last != Some(b'\n') {
                self.blank_lines += 1;
            }
            return Ok(None);
        }

        let embedded = self.row.as_slice().iter().filter(|&&b| b == b'\n').count() as u64;
        let extra = consumed.saturating_sub(embedded);
        self.blank_lines += extra.saturating_sub(1);
        self.last_extra = extra;
        Ok(Some(FacilityRecord::new(decode_row(&self.row))))
    }
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<FacilityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        // blank lines are yielded ahead of the row that follows them
        if self.blank_lines > 0 {
            self.blank_lines -= 1;
            return Some(Ok(FacilityRecord::default()));
        }
        if let Some(record) = self.pending.take() {
            return Some(Ok(record));
        }
        if self.done {
            return None;
        }
        match self.read_row() {
            Ok(Some(record)) => {
                self.pending = Some(record);
                self.next()
            }
            Ok(None) => {
                self.done = true;
                self.next()
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Remembers the final byte read from the underlying source.
struct LastByte<R> {
    inner: R,
    last: Option<u8>,
}

impl<R> LastByte<R> {
    fn new(inner: R) -> Self {
        Self { inner, last: None }
    }
}

impl<R: Read> Read for LastByte<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.last = Some(buf[n - 1]);
        }
        Ok(n)
    }
}

fn decode_row(row: &ByteRecord) -> Vec<String> {
    let mut cells: Vec<String> = row.iter().map(decode_cell).collect();
    if let Some(last) = cells.last_mut() {
        if last.ends_with('\r') {
            last.pop();
        }
    }
    cells
}

fn decode_cell(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

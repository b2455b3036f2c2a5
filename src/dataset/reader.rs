//! Streaming dataset reader

use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Read},
    path::Path,
};

use super::{
    codec::{RecordFormat, bitset_record_len, decode_bitset},
    record::GameRecord,
};
use crate::{Error, Result, tictactoe::GridSize};

/// Iterates over the records of a dataset.
///
/// A dataset may start with a size header: a line holding only the board
/// size (ascii) or a single size byte (bitset). The header is optional
/// and is told apart from a record by its first character or byte, since
/// records start with `X`/`O` or a turn byte of 0 or 1. By default a
/// header must match the reader's size; see
/// [`with_size_from_header`](Self::with_size_from_header).
///
/// Errors carry the 1-based line (ascii) or record (bitset) number. The
/// iterator keeps going after an error; callers that want to stop at the
/// first malformed record can collect into a `Result<Vec<_>>`.
pub struct DatasetReader<R: BufRead> {
    inner: R,
    size: GridSize,
    format: RecordFormat,
    size_from_header: bool,
    header: Option<Option<GridSize>>,
    pending_line: bool,
    position: usize,
    line: String,
    buffer: Vec<u8>,
}

impl DatasetReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, size: GridSize, format: RecordFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open dataset {}", path.display()), e))?;
        Ok(Self::new(BufReader::new(file), size, format))
    }
}

impl<R: BufRead> DatasetReader<R> {
    pub fn new(inner: R, size: GridSize, format: RecordFormat) -> Self {
        Self {
            inner,
            size,
            format,
            size_from_header: false,
            header: None,
            pending_line: false,
            position: 0,
            line: String::new(),
            buffer: vec![0; bitset_record_len(size)],
        }
    }

    /// Let a size header override the reader's size instead of having to
    /// match it. Headerless datasets keep the size given at construction.
    pub fn with_size_from_header(mut self) -> Self {
        self.size_from_header = true;
        self
    }

    /// Board size records are parsed with
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Lines (ascii, header included) or records (bitset) consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read the size header if the dataset has one. Called automatically
    /// before the first record; calling it again returns the same answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the header is not a valid
    /// grid size, or if it disagrees with the reader's size and the size
    /// was not left to the header.
    pub fn read_header(&mut self) -> Result<Option<GridSize>> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        self.header = Some(None);

        let declared = match self.format {
            RecordFormat::Ascii => self.ascii_header()?,
            RecordFormat::Bitset => self.bitset_header()?,
        };

        if let Some(declared) = declared
            && declared != self.size
        {
            if !self.size_from_header {
                return Err(Error::malformed(
                    "header",
                    format!("dataset is for a {declared} board, expected {}", self.size),
                ));
            }
            self.size = declared;
            self.buffer = vec![0; bitset_record_len(declared)];
        }

        self.header = Some(declared);
        Ok(declared)
    }

    /// Read every record, stopping at the first error
    pub fn read_all(self) -> Result<Vec<GameRecord>> {
        self.collect()
    }

    fn ascii_header(&mut self) -> Result<Option<GridSize>> {
        self.line.clear();
        let read = self
            .inner
            .read_line(&mut self.line)
            .map_err(|e| Error::io("read line 1", e))?;
        if read == 0 {
            return Ok(None);
        }
        self.position += 1;

        let text = self.line.trim_end_matches(['\n', '\r']);
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            // Not a header: hand the line to the record parser
            self.pending_line = true;
            return Ok(None);
        }

        text.parse::<usize>()
            .ok()
            .and_then(|size| GridSize::new(size).ok())
            .map(Some)
            .ok_or_else(|| Error::malformed("line 1", format!("invalid size header {text:?}")))
    }

    fn bitset_header(&mut self) -> Result<Option<GridSize>> {
        let first = self
            .inner
            .fill_buf()
            .map_err(|e| Error::io("read size header", e))?
            .first()
            .copied();

        match first {
            Some(byte) if usize::from(byte) >= GridSize::MIN => {
                self.inner.consume(1);
                GridSize::new(usize::from(byte)).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn next_ascii(&mut self) -> Option<Result<GameRecord>> {
        if !std::mem::take(&mut self.pending_line) {
            self.line.clear();
            match self.inner.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => self.position += 1,
                Err(e) => {
                    return Some(Err(Error::io(
                        format!("read line {}", self.position + 1),
                        e,
                    )));
                }
            }
        }

        let location = format!("line {}", self.position);
        Some(GameRecord::parse_at(&self.line, self.size, &location))
    }

    fn next_bitset(&mut self) -> Option<Result<GameRecord>> {
        let filled = match fill(&mut self.inner, &mut self.buffer) {
            Ok(filled) => filled,
            Err(e) => {
                return Some(Err(Error::io(
                    format!("read record {}", self.position + 1),
                    e,
                )));
            }
        };
        if filled == 0 {
            return None;
        }

        self.position += 1;
        let location = format!("record {}", self.position);
        Some(decode_bitset(&self.buffer[..filled], self.size, &location))
    }
}

impl<R: BufRead> Iterator for DatasetReader<R> {
    type Item = Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.header.is_none()
            && let Err(e) = self.read_header()
        {
            return Some(Err(e));
        }

        match self.format {
            RecordFormat::Ascii => self.next_ascii(),
            RecordFormat::Bitset => self.next_bitset(),
        }
    }
}

/// Read until `buf` is full or the input ends; returns the bytes read
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

//! Record encodings and the dataset writer

use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::record::GameRecord;
use crate::{
    Error, Result,
    tictactoe::{Board, Cell, GridSize, Player},
};

/// On-disk encoding of a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// One text line per record
    #[default]
    Ascii,
    /// Fixed-size binary records
    Bitset,
}

impl RecordFormat {
    pub const ALL: [RecordFormat; 2] = [RecordFormat::Ascii, RecordFormat::Bitset];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordFormat::Ascii => "ascii",
            RecordFormat::Bitset => "bitset",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" | "text" => Ok(RecordFormat::Ascii),
            "bitset" | "binary" => Ok(RecordFormat::Bitset),
            _ => Err(Error::InvalidFormat {
                input: s.to_string(),
                expected: RecordFormat::ALL
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Bytes in one bitset of a binary record. Always rounds up by a whole
/// byte, even when N*N is a multiple of 8.
pub fn bitset_len(size: GridSize) -> usize {
    size.cell_count() / 8 + 1
}

/// Bytes in one binary record: turn byte plus the X and O bitsets
pub fn bitset_record_len(size: GridSize) -> usize {
    1 + 2 * bitset_len(size)
}

pub(crate) fn encode_bitset(record: &GameRecord) -> Vec<u8> {
    let width = bitset_len(record.board.size());
    let mut bytes = vec![0u8; 1 + 2 * width];
    bytes[0] = match record.first_player {
        Player::X => 0,
        Player::O => 1,
    };

    let (x_bits, o_bits) = bytes[1..].split_at_mut(width);
    for (index, &cell) in record.board.cells().iter().enumerate() {
        let (byte, bit) = (index / 8, index % 8);
        match cell {
            Cell::X => x_bits[byte] |= 1 << bit,
            Cell::O => o_bits[byte] |= 1 << bit,
            Cell::Empty => {}
        }
    }
    bytes
}

pub(crate) fn decode_bitset(bytes: &[u8], size: GridSize, location: &str) -> Result<GameRecord> {
    let width = bitset_len(size);
    if bytes.len() != 1 + 2 * width {
        return Err(Error::malformed(
            location,
            format!(
                "truncated record: expected {} bytes, got {}",
                1 + 2 * width,
                bytes.len()
            ),
        ));
    }

    let first_player = match bytes[0] {
        0 => Player::X,
        1 => Player::O,
        other => {
            return Err(Error::malformed(
                location,
                format!("invalid turn byte {other}"),
            ));
        }
    };

    let (x_bits, o_bits) = bytes[1..].split_at(width);
    let cells = (0..size.cell_count())
        .map(|index| {
            let (byte, mask) = (index / 8, 1u8 << (index % 8));
            match (x_bits[byte] & mask != 0, o_bits[byte] & mask != 0) {
                (false, false) => Ok(Cell::Empty),
                (true, false) => Ok(Cell::X),
                (false, true) => Ok(Cell::O),
                (true, true) => Err(Error::malformed(
                    location,
                    format!("cell {index} is set for both X and O"),
                )),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GameRecord::new(first_player, Board::from_cells(size, cells)?))
}

/// Writes records in either encoding
pub struct DatasetWriter<W: Write> {
    inner: W,
    format: RecordFormat,
    written: usize,
}

impl DatasetWriter<BufWriter<File>> {
    /// Create (or truncate) a dataset file
    pub fn create<P: AsRef<Path>>(path: P, format: RecordFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create dataset {}", path.display()), e))?;
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(inner: W, format: RecordFormat) -> Self {
        Self {
            inner,
            format,
            written: 0,
        }
    }

    /// Write the size header that opens a dataset: the size on its own
    /// line (ascii) or a single size byte (bitset)
    pub fn write_header(&mut self, size: GridSize) -> Result<()> {
        match self.format {
            RecordFormat::Ascii => writeln!(self.inner, "{}", size.get()),
            RecordFormat::Bitset => {
                let byte = u8::try_from(size.get()).map_err(|_| Error::InvalidGridSize {
                    size: size.get(),
                    min: GridSize::MIN,
                    max: GridSize::MAX,
                })?;
                self.inner.write_all(&[byte])
            }
        }
        .map_err(|e| Error::io("write dataset header", e))
    }

    pub fn write(&mut self, record: &GameRecord) -> Result<()> {
        match self.format {
            RecordFormat::Ascii => writeln!(self.inner, "{record}"),
            RecordFormat::Bitset => self.inner.write_all(&encode_bitset(record)),
        }
        .map_err(|e| Error::io("write record", e))?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.inner
            .flush()
            .map_err(|e| Error::io("flush dataset", e))?;
        Ok(self.inner)
    }
}

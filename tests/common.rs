//! Common test utilities for the ttt-eval test suite.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;
use ttt_eval::{
    Board, DatasetReader, DatasetWriter, GameRecord, GridSize, Player, Position, RecordFormat,
    dataset::{DatasetGenerator, GeneratorConfig},
};

/// Parse a 3x3 ascii record (side to move plus nine cells)
pub fn record(line: &str) -> GameRecord {
    GameRecord::parse_line(line, GridSize::CLASSIC).unwrap()
}

/// Build a 3x3 board from nine cell characters
pub fn board(cells: &str) -> Board {
    Board::from_string(GridSize::CLASSIC, cells).unwrap()
}

/// Write records to a temporary dataset file in the given encoding
pub fn write_dataset(records: &[GameRecord], format: RecordFormat) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut writer = DatasetWriter::new(file.as_file_mut(), format);
    for record in records {
        writer.write(record).unwrap();
    }
    writer.finish().unwrap();
    file.flush().unwrap();
    file
}

/// Every 3x3 board reachable in exactly two plies from the empty board
/// (X then O), with X to move
pub fn two_ply_boards() -> Vec<Board> {
    let size = GridSize::CLASSIC;
    let mut boards = Vec::new();
    for x in 0..size.cell_count() {
        for o in 0..size.cell_count() {
            if x == o {
                continue;
            }
            let mut b = Board::new(size);
            b.place(Position::from_index(x, size), Player::X).unwrap();
            b.place(Position::from_index(o, size), Player::O).unwrap();
            boards.push(b);
        }
    }
    boards
}

/// Every non-terminal 3x3 position reachable from the empty board with X
/// to move (4520 records)
pub fn live_positions() -> Vec<GameRecord> {
    let mut writer = DatasetWriter::new(Vec::new(), RecordFormat::Ascii);
    DatasetGenerator::new(GeneratorConfig {
        samples: usize::MAX,
        seed: Some(0),
        ..GeneratorConfig::default()
    })
    .generate(&mut writer)
    .unwrap();
    let bytes = writer.finish().unwrap();
    DatasetReader::new(Cursor::new(bytes), GridSize::CLASSIC, RecordFormat::Ascii)
        .read_all()
        .unwrap()
}

/// Parse an ascii record for an NxN board
pub fn sized_record(size: usize, line: &str) -> GameRecord {
    GameRecord::parse_line(line, GridSize::new(size).unwrap()).unwrap()
}

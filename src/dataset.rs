//! Game record datasets
//!
//! A dataset is a sequence of records, each holding a starting side and a
//! board. Two on-disk encodings are supported:
//!
//! - **ascii**: one record per line, the side's character followed by the
//!   N*N cells in row-major order (`'X'`, `'O'` or a blank), e.g.
//!   `"OXX       "` is O to move on a 3x3 board whose top row reads `XX `
//! - **bitset**: fixed-size binary records, one turn byte followed by an X
//!   bitset and an O bitset of `N*N/8 + 1` bytes each
//!
//! Either encoding may open with a size header (`"6\n"` or the byte `6`).
//! Generated datasets always carry one; the reader accepts files with or
//! without it.

pub mod codec;
pub mod generator;
pub mod reader;
pub mod record;

pub use codec::{DatasetWriter, RecordFormat, bitset_len, bitset_record_len};
pub use generator::{DatasetGenerator, GenerationStats, GeneratorConfig};
pub use reader::DatasetReader;
pub use record::GameRecord;

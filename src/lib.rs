// lib.rs - 库函数

pub mod dna;
pub mod error;
pub mod import;
pub mod menu;
pub mod sequence_db;

pub use dna::{
    canonicalize, is_valid_sequence, overlap_prefix, overlap_suffix, DEFAULT_MINIMUM_OVERLAP,
    DNA_BASES,
};
pub use error::{Result, SequenceDbError};
pub use import::{import_file, ImportSummary};
pub use menu::Menu;
pub use sequence_db::{InsertResult, OverlapMatch, SequenceDb, SequenceRecord};

// sequence_db.rs - 内存 DNA 序列数据库

use std::collections::HashMap;
use std::fmt;

use crate::dna::{canonicalize, is_valid_sequence, overlap_prefix, overlap_suffix};
use crate::error::{Result, SequenceDbError};

/// Outcome of [`SequenceDb::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertResult {
    Inserted,
    AlreadyPresent,
}

impl InsertResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertResult::Inserted => "Inserted",
            InsertResult::AlreadyPresent => "Already present",
        }
    }
}

impl fmt::Display for InsertResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored sequence and the identifier it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

/// Which ends of a stored sequence a sample overlaps.
///
/// `prefix` holds the overlap between the end of the sample and the start of
/// the stored sequence, `suffix` the overlap between the start of the sample
/// and the end of the stored sequence. Both follow the shortest-match rule of
/// [`overlap_prefix`] and [`overlap_suffix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapMatch<'a> {
    pub prefix: Option<&'a str>,
    pub suffix: Option<&'a str>,
}

impl OverlapMatch<'_> {
    pub fn is_overlap(&self) -> bool {
        self.prefix.is_some() || self.suffix.is_some()
    }
}

/// In-memory DNA sequence database.
///
/// Sequences are stored in canonical (uppercase) form under identifiers
/// issued by the database itself. Duplicates are detected through a hash
/// index on the canonical sequence, so re-inserting a sequence in any
/// letter case returns the identifier it was first stored under.
#[derive(Debug, Default)]
pub struct SequenceDb {
    records: Vec<SequenceRecord>,
    // id -> position in `records`
    by_id: HashMap<String, usize>,
    // canonical sequence -> position in `records`
    by_sequence: HashMap<String, usize>,
    last_id: u64,
}

impl SequenceDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter()
    }

    /// Insert a sequence unless an identical one (ignoring case) is stored.
    ///
    /// Returns the outcome together with the identifier the sequence lives
    /// under. Only a new record consumes an identifier.
    pub fn insert(&mut self, sequence: &str) -> Result<(InsertResult, String)> {
        if !is_valid_sequence(sequence) {
            return Err(SequenceDbError::InvalidSequence(sequence.to_string()));
        }

        let canonical = canonicalize(sequence);
        if let Some(&pos) = self.by_sequence.get(&canonical) {
            return Ok((InsertResult::AlreadyPresent, self.records[pos].id.clone()));
        }

        let id = self.next_id();
        let pos = self.records.len();
        self.by_id.insert(id.clone(), pos);
        self.by_sequence.insert(canonical.clone(), pos);
        self.records.push(SequenceRecord {
            id: id.clone(),
            sequence: canonical,
        });

        Ok((InsertResult::Inserted, id))
    }

    /// The canonical sequence stored under `id`.
    pub fn get(&self, id: &str) -> Result<&str> {
        self.by_id
            .get(id)
            .map(|&pos| self.records[pos].sequence.as_str())
            .ok_or_else(|| SequenceDbError::InvalidSequenceId(id.to_string()))
    }

    /// Identifiers of every stored sequence containing `sample`, in
    /// insertion order. An empty result is not an error.
    pub fn find(&self, sample: &str) -> Result<Vec<&str>> {
        if !is_valid_sequence(sample) {
            return Err(SequenceDbError::InvalidSample(sample.to_string()));
        }

        let sample = canonicalize(sample);
        Ok(self
            .records
            .iter()
            .filter(|record| record.sequence.contains(sample.as_str()))
            .map(|record| record.id.as_str())
            .collect())
    }

    /// Whether `sample` overlaps either end of the sequence stored under
    /// `id` by at least `minimum_overlap` bases.
    ///
    /// Does not say which end matched; use [`SequenceDb::overlap_match`] for
    /// that.
    pub fn overlap(&self, sample: &str, id: &str, minimum_overlap: usize) -> Result<bool> {
        Ok(self.overlap_match(sample, id, minimum_overlap)?.is_overlap())
    }

    /// Prefix and suffix overlaps between `sample` and the sequence stored
    /// under `id`. The sample is validated before the id is looked up.
    pub fn overlap_match(
        &self,
        sample: &str,
        id: &str,
        minimum_overlap: usize,
    ) -> Result<OverlapMatch<'_>> {
        if !is_valid_sequence(sample) {
            return Err(SequenceDbError::InvalidSample(sample.to_string()));
        }

        let sample = canonicalize(sample);
        let sequence = self.get(id)?;
        Ok(OverlapMatch {
            prefix: overlap_prefix(&sample, sequence, minimum_overlap),
            suffix: overlap_suffix(&sample, sequence, minimum_overlap),
        })
    }

    fn next_id(&mut self) -> String {
        self.last_id += 1;
        self.last_id.to_string()
    }
}

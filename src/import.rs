// import.rs - 从文件批量导入序列

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info, warn};

use crate::sequence_db::{InsertResult, SequenceDb};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// One sequence read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// FASTA header (without `>`) or `line N` for plain files.
    pub label: String,
    pub sequence: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub already_present: usize,
    pub rejected: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.already_present + self.rejected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Fasta,
    Plain,
}

/// Line-oriented parser for FASTA or one-sequence-per-line input.
///
/// The format is fixed by the first non-blank line: a leading `>` means
/// FASTA, anything else means plain. Lines that are not valid UTF-8 are
/// decoded lossily, so the record they belong to fails validation and is
/// rejected instead of ending the import.
pub struct RecordReader<R: BufRead> {
    reader: R,
    // (line number, text) read ahead while scanning a FASTA record
    peeked: Option<(usize, String)>,
    format: Option<Format>,
    line_no: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            reader,
            peeked: None,
            format: None,
            line_no: 0,
        }
    }

    fn read_raw_line(&mut self) -> Result<Option<(usize, String)>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let mut line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("Line {} is not valid UTF-8", self.line_no);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some((self.line_no, line)))
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_raw_line(),
        }
    }

    fn peek_line(&mut self) -> Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_raw_line()?;
        }
        Ok(self.peeked.as_ref().map(|(_, line)| line.as_str()))
    }

    fn next_non_blank(&mut self) -> Result<Option<(usize, String)>> {
        while let Some((line_no, line)) = self.next_line()? {
            let line = line.trim();
            if !line.is_empty() {
                return Ok(Some((line_no, line.to_string())));
            }
        }
        Ok(None)
    }

    pub fn read_record(&mut self) -> Result<Option<SourceRecord>> {
        let Some((line_no, first)) = self.next_non_blank()? else {
            return Ok(None);
        };

        let format = *self.format.get_or_insert(if first.starts_with('>') {
            Format::Fasta
        } else {
            Format::Plain
        });

        match format {
            Format::Plain => Ok(Some(SourceRecord {
                label: format!("line {}", line_no),
                sequence: first,
            })),
            Format::Fasta => {
                let Some(header) = first.strip_prefix('>') else {
                    return Err(anyhow!(
                        "Expected FASTA header at line {}, found: {}",
                        line_no,
                        first
                    ));
                };
                let label = header.trim().to_string();

                // 读取序列行，直到下一个 '>' 头
                let mut sequence = String::new();
                while let Some(line) = self.peek_line()? {
                    if line.trim_start().starts_with('>') {
                        break;
                    }
                    if let Some((_, line)) = self.next_line()? {
                        sequence.push_str(line.trim());
                    }
                }

                Ok(Some(SourceRecord { label, sequence }))
            }
        }
    }

    pub fn read_batch(&mut self, batch_size: usize) -> Result<Vec<SourceRecord>> {
        let mut batch = Vec::with_capacity(batch_size);

        for _ in 0..batch_size {
            if let Some(record) = self.read_record()? {
                batch.push(record);
            } else {
                break; // End of file
            }
        }

        Ok(batch)
    }
}

pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)
        .map_err(|e| anyhow!("Cannot open {}: {}", path.display(), e))?;

    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = MultiGzDecoder::new(file);
        Ok(Box::new(BufReader::with_capacity(1 << 16, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(1 << 16, file)))
    }
}

/// Add one parsed record to the database and account for it.
pub fn insert_record(db: &mut SequenceDb, record: &SourceRecord, summary: &mut ImportSummary) {
    match db.insert(&record.sequence) {
        Ok((InsertResult::Inserted, id)) => {
            debug!("{} stored as {}", record.label, id);
            summary.inserted += 1;
        }
        Ok((InsertResult::AlreadyPresent, id)) => {
            debug!("{} already present as {}", record.label, id);
            summary.already_present += 1;
        }
        Err(e) => {
            warn!("Skipping {}: {}", record.label, e);
            summary.rejected += 1;
        }
    }
}

/// Load every sequence of `path` into `db`.
///
/// Parsing runs on a reader thread that hands batches over a bounded
/// channel; all inserts happen on the calling thread.
///
/// Invalid sequences, empty FASTA records and undecodable lines are counted
/// in [`ImportSummary::rejected`]. A failing read from the underlying stream
/// (for example a corrupt gzip member) returns an error, and the batches
/// inserted before it stay in `db`.
pub fn import_file(db: &mut SequenceDb, path: &Path, batch_size: usize) -> Result<ImportSummary> {
    let batch_size = batch_size.max(1);
    let reader = open_reader(path)?;
    info!("Importing {} (batch size {})", path.display(), batch_size);

    let (batch_tx, batch_rx): (Sender<Vec<SourceRecord>>, Receiver<Vec<SourceRecord>>) =
        bounded(4);

    let reader_path: PathBuf = path.to_path_buf();
    let reader_handle = thread::spawn(move || -> Result<()> {
        let mut records = RecordReader::new(reader);
        loop {
            let batch = records
                .read_batch(batch_size)
                .map_err(|e| anyhow!("Error reading {}: {}", reader_path.display(), e))?;
            if batch.is_empty() {
                break;
            }
            if batch_tx.send(batch).is_err() {
                break;
            }
        }
        Ok(())
    });

    let mut summary = ImportSummary::default();
    while let Ok(batch) = batch_rx.recv() {
        for record in &batch {
            insert_record(db, record, &mut summary);
        }
        debug!("Processed {} records...", summary.total());
    }

    reader_handle
        .join()
        .map_err(|_| anyhow!("Reader thread for {} panicked", path.display()))??;

    info!(
        "Imported {}: {} inserted, {} already present, {} rejected",
        path.display(),
        summary.inserted,
        summary.already_present,
        summary.rejected
    );
    Ok(summary)
}

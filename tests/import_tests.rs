use flate2::write::GzEncoder;
use flate2::Compression;
use sequence_db::import::{import_file, ImportSummary, RecordReader, SourceRecord};
use sequence_db::SequenceDb;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

fn write_temp(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_reader_plain_lines() {
    let mut reader = RecordReader::new(Cursor::new("ACGT\n\n  ttga \n"));
    let batch = reader.read_batch(10).unwrap();
    assert_eq!(
        batch,
        vec![
            SourceRecord {
                label: "line 1".to_string(),
                sequence: "ACGT".to_string(),
            },
            SourceRecord {
                label: "line 3".to_string(),
                sequence: "ttga".to_string(),
            },
        ]
    );
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_reader_fasta_multiline() {
    // 多行 FASTA 序列会被拼接
    let mut reader = RecordReader::new(Cursor::new(">seq1 first\nACGT\nACGT\n>seq2\nGGCC\n"));
    let first = reader.read_record().unwrap().unwrap();
    assert_eq!(first.label, "seq1 first");
    assert_eq!(first.sequence, "ACGTACGT");
    let second = reader.read_record().unwrap().unwrap();
    assert_eq!(second.label, "seq2");
    assert_eq!(second.sequence, "GGCC");
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_reader_batches() {
    let mut reader = RecordReader::new(Cursor::new("AA\nCC\nGG\n"));
    assert_eq!(reader.read_batch(2).unwrap().len(), 2);
    assert_eq!(reader.read_batch(2).unwrap().len(), 1);
    assert!(reader.read_batch(2).unwrap().is_empty());
}

#[test]
fn test_import_plain_file() {
    let file = write_temp(".txt", b"ACGT\nacgt\nQWER\nTTTT\n");
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 2).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            inserted: 2,
            already_present: 1,
            rejected: 1,
        }
    );
    assert_eq!(db.len(), 2);
    assert_eq!(db.get("1").unwrap(), "ACGT");
    assert_eq!(db.get("2").unwrap(), "TTTT");
}

#[test]
fn test_import_fasta_with_empty_record() {
    let file = write_temp(".fa", b">a\nACGT\n>empty\n>b\nGG\nCC\n");
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 100).unwrap();
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.total(), 3);
    assert_eq!(db.find("GGCC").unwrap(), vec!["2"]);
}

#[test]
fn test_import_gzip_fasta() {
    // 测试 .gz 压缩输入
    let mut file = Builder::new().suffix(".fa.gz").tempfile().unwrap();
    {
        let mut encoder = GzEncoder::new(file.as_file_mut(), Compression::default());
        encoder.write_all(b">x\nAAAA\n>y\nCCCC\n>z\naaaa\n").unwrap();
        encoder.finish().unwrap();
    }
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 1).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            inserted: 2,
            already_present: 1,
            rejected: 0,
        }
    );
}

#[test]
fn test_import_into_populated_database() {
    let file = write_temp(".txt", b"CCCC\nGGGG\n");
    let mut db = SequenceDb::new();
    db.insert("gggg").unwrap();
    let summary = import_file(&mut db, file.path(), 10).unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.already_present, 1);
    assert_eq!(db.len(), 2);
}

#[test]
fn test_import_missing_file() {
    let mut db = SequenceDb::new();
    assert!(import_file(&mut db, Path::new("/nonexistent/sequences.fa"), 10).is_err());
    assert!(db.is_empty());
}

#[test]
fn test_import_empty_file() {
    let file = write_temp(".txt", b"");
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 10).unwrap();
    assert_eq!(summary, ImportSummary::default());
}

#[test]
fn test_import_invalid_utf8_line_is_rejected() {
    // 非 UTF-8 的行计为 rejected，不中断导入
    let file = write_temp(".txt", b"ACGT\nGGGG\n\xff\xfe\nTTTT\n");
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 1).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            inserted: 3,
            already_present: 0,
            rejected: 1,
        }
    );
    assert_eq!(db.len(), 3);
    assert_eq!(db.get("3").unwrap(), "TTTT");
}

#[test]
fn test_import_invalid_utf8_in_fasta_body() {
    let file = write_temp(".fa", b">a\nAC\xffGT\n>b\nGG\nCC\n");
    let mut db = SequenceDb::new();
    let summary = import_file(&mut db, file.path(), 10).unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(db.get("1").unwrap(), "GGCC");
}

#[test]
fn test_reader_fasta_lookahead() {
    let mut reader = RecordReader::new(Cursor::new(&b">a\nAC\n>b\nGT\n"[..]));
    assert_eq!(reader.read_record().unwrap().unwrap().sequence, "AC");
    assert_eq!(reader.read_record().unwrap().unwrap().label, "b");
    assert!(reader.read_record().unwrap().is_none());
}

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::DatasetError;

/// Appends `records` to a gzipped JSONL file, creating it if absent.
/// Bounds RSS by writing one record at a time rather than buffering the
/// whole dataset (§5).
pub fn append_gz_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let existing = if path.exists() { read_gz_jsonl_tolerant::<serde_json::Value>(path)? } else { Vec::new() };
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    for record in &existing {
        serde_json::to_writer(&mut encoder, record)?;
        encoder.write_all(b"\n")?;
    }
    for record in records {
        serde_json::to_writer(&mut encoder, record)?;
        encoder.write_all(b"\n")?;
    }
    encoder.finish()?;
    Ok(())
}

/// Strict reader: a malformed line aborts the read.
pub fn read_gz_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(GzDecoder::new(file));
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

/// Tolerant reader: a malformed line is logged and skipped (§7).
pub fn read_gz_jsonl_tolerant<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let file = File::open(path)?;
    let reader = BufReader::new(GzDecoder::new(file));
    let mut out = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(v) => out.push(v),
            Err(e) => warn!(lineno, error = %e, "skipping malformed dataset row"),
        }
    }
    Ok(out)
}

/// Splits `items` into fixed-size chunks, mirroring the chunked streaming
/// contract (§5): KB 1000, catalog 1000, bucketed joins 5000.
pub fn chunks<T: Clone>(items: &[T], chunk_size: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    items.chunks(chunk_size.max(1)).map(|c| c.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
    struct Row {
        id: String,
    }

    #[test]
    fn round_trips_gzipped_jsonl() {
        let path = std::env::temp_dir().join(format!("dataset-builder-test-{}.jsonl.gz", std::process::id()));
        let rows = vec![Row { id: "a".into() }, Row { id: "b".into() }];
        append_gz_jsonl(&path, &rows).unwrap();
        let read_back: Vec<Row> = read_gz_jsonl(&path).unwrap();
        assert_eq!(read_back, rows);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn chunks_splits_into_fixed_size_groups() {
        let items: Vec<i32> = (0..2500).collect();
        let chunked: Vec<_> = chunks(&items, 1000).collect();
        assert_eq!(chunked.len(), 3);
        assert_eq!(chunked[0].len(), 1000);
        assert_eq!(chunked[2].len(), 500);
    }
}

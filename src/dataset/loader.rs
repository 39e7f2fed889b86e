//! @ai:module:intent JSONL loader for gold records and model predictions
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatasetLoader, DatasetLoaderTrait, parse_gold_lines, parse_prediction_lines, filter_split, write_prediction
//! @ai:module:stateless true

use crate::dataset::error::{DatasetError, Result};
use crate::dataset::record::{GoldRecord, Prediction, PredictionSet, RawGoldRecord, RawPrediction};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// @ai:intent Trait for loading benchmark files
pub trait DatasetLoaderTrait: Send + Sync {
    /// @ai:intent Load every gold record from a JSONL file
    fn load_gold(&self, path: &Path) -> Result<Vec<GoldRecord>>;

    /// @ai:intent Load predictions from a JSONL file into an id map
    fn load_predictions(&self, path: &Path) -> Result<PredictionSet>;
}

/// @ai:intent Loads gold and prediction JSONL files, failing on the first bad line
/// @ai:effects pure (stateless)
pub struct DatasetLoader;

impl DatasetLoader {
    /// @ai:intent Create a new dataset loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Open a file for buffered line reading
    /// @ai:effects fs:read
    fn open(path: &Path) -> Result<BufReader<File>> {
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| DatasetError::FileRead {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoaderTrait for DatasetLoader {
    /// @ai:effects fs:read
    fn load_gold(&self, path: &Path) -> Result<Vec<GoldRecord>> {
        let records = parse_gold_lines(Self::open(path)?, path)?;
        tracing::debug!("Loaded {} gold records from {}", records.len(), path.display());
        Ok(records)
    }

    /// @ai:effects fs:read
    fn load_predictions(&self, path: &Path) -> Result<PredictionSet> {
        let predictions = parse_prediction_lines(Self::open(path)?, path)?;
        tracing::debug!("Loaded {} predictions from {}", predictions.len(), path.display());
        Ok(predictions)
    }
}

/// @ai:intent Parse gold records from JSONL, `source` names the input in errors
/// @ai:effects pure
pub fn parse_gold_lines<R: BufRead>(reader: R, source: &Path) -> Result<Vec<GoldRecord>> {
    let mut records = Vec::new();

    for_each_object(reader, source, |raw: RawGoldRecord, line| {
        records.push(raw.into_record(source, line)?);
        Ok(())
    })?;

    Ok(records)
}

/// @ai:intent Parse predictions from JSONL; a repeated id replaces the earlier one
/// @ai:effects pure
pub fn parse_prediction_lines<R: BufRead>(reader: R, source: &Path) -> Result<PredictionSet> {
    let mut predictions = PredictionSet::new();

    for_each_object(reader, source, |raw: RawPrediction, line| {
        let prediction = raw.into_prediction(source, line)?;
        predictions.insert(prediction.id, prediction.model_output);
        Ok(())
    })?;

    Ok(predictions)
}

/// @ai:intent Decode each non-blank line as a JSON object and hand it to `f`
/// @ai:effects pure
fn for_each_object<R, T, F>(reader: R, source: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    T: DeserializeOwned,
    F: FnMut(T, usize) -> Result<()>,
{
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source_err| DatasetError::FileRead {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        // Byte-order mark from editors that save UTF-8 with a BOM
        let text = line.trim_start_matches('\u{feff}').trim();
        if text.is_empty() {
            continue;
        }

        let json_error = |err| DatasetError::Json {
            path: source.to_path_buf(),
            line: line_no,
            source: err,
        };

        let value: serde_json::Value = serde_json::from_str(text).map_err(json_error)?;
        if !value.is_object() {
            return Err(DatasetError::NotAnObject {
                path: source.to_path_buf(),
                line: line_no,
            });
        }

        let parsed: T = serde_json::from_value(value).map_err(json_error)?;
        f(parsed, line_no)?;
    }

    Ok(())
}

/// @ai:intent Keep only records of the given split; `None` keeps everything
/// @ai:effects pure
pub fn filter_split(records: Vec<GoldRecord>, split: Option<&str>) -> Vec<GoldRecord> {
    match split {
        None => records,
        Some(wanted) => records
            .into_iter()
            .filter(|r| r.split.as_deref() == Some(wanted))
            .collect(),
    }
}

/// @ai:intent Append one prediction as a JSONL line and flush it
/// @ai:effects io
pub fn write_prediction<W: Write>(writer: &mut W, prediction: &Prediction) -> Result<()> {
    serde_json::to_writer(&mut *writer, prediction).map_err(|e| DatasetError::Write(e.into()))?;
    writer.write_all(b"\n").map_err(DatasetError::Write)?;
    writer.flush().map_err(DatasetError::Write)?;
    Ok(())
}

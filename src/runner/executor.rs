//! @ai:module:intent Sequential evaluation loop that queries a model for every gold record
//! @ai:module:layer application
//! @ai:module:public_api EvaluationRunner, RunOutcome
//! @ai:module:stateless false

use crate::dataset::{write_prediction, GoldRecord, Prediction, PredictionSet};
use crate::runner::client::ModelClientTrait;
use crate::runner::pacer::{PacerTrait, RequestPacer};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

const PROGRESS_EVERY: usize = 10;

/// @ai:intent What an evaluation run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One entry per gold record; failed calls map to ""
    pub predictions: PredictionSet,
    pub errors: usize,
    pub elapsed: Duration,
}

/// @ai:intent Feeds input sentences to a model one at a time
pub struct EvaluationRunner<C: ModelClientTrait> {
    client: Arc<C>,
    pacer: RequestPacer,
}

impl<C: ModelClientTrait> EvaluationRunner<C> {
    /// @ai:intent Create a new runner
    /// @ai:effects pure
    pub fn new(client: Arc<C>, pacer: RequestPacer) -> Self {
        Self { client, pacer }
    }

    /// @ai:intent Query the model for every record, streaming predictions to `sink`
    /// @ai:post a failed call counts as an error, scores as "" and is not written
    /// @ai:effects network, io
    pub async fn run<W: Write>(&self, gold: &[GoldRecord], sink: &mut W) -> Result<RunOutcome> {
        let mut predictions = PredictionSet::new();
        let mut errors = 0usize;
        let total = gold.len();
        let start = Instant::now();

        for (index, record) in gold.iter().enumerate() {
            self.pacer.wait().await;
            let result = self.client.correct(record.input_sentence()).await;
            self.pacer.complete().await;

            match result {
                Ok(output) => {
                    let prediction = Prediction {
                        id: record.id.clone(),
                        model_output: output,
                    };
                    write_prediction(sink, &prediction)
                        .with_context(|| format!("Failed to save prediction for {}", record.id))?;
                    predictions.insert(prediction.id, prediction.model_output);

                    let done = index + 1;
                    if done % PROGRESS_EVERY == 0 {
                        log_progress(done, total, start.elapsed());
                    }
                }
                Err(e) => {
                    tracing::error!("ERROR on {}: {:#}", record.id, e);
                    predictions.insert(record.id.clone(), "");
                    errors += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "Done in {:.1}s ({} errors)",
            elapsed.as_secs_f64(),
            errors
        );

        Ok(RunOutcome {
            predictions,
            errors,
            elapsed,
        })
    }
}

/// @ai:intent Log throughput and estimated time remaining
/// @ai:effects io
fn log_progress(done: usize, total: usize, elapsed: Duration) {
    let (rate, eta) = progress_rate(done, total, elapsed);
    tracing::info!(
        "[{}/{}] {:.1} examples/sec, ETA: {:.0}s",
        done,
        total,
        rate,
        eta
    );
}

/// @ai:intent Examples per second and seconds remaining
/// @ai:effects pure
fn progress_rate(done: usize, total: usize, elapsed: Duration) -> (f64, f64) {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { done as f64 / secs } else { 0.0 };
    let eta = if rate > 0.0 {
        total.saturating_sub(done) as f64 / rate
    } else {
        0.0
    };
    (rate, eta)
}

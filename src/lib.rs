//! @ai:module:intent TamilNadai benchmark library: scoring, dataset loading and LLM evaluation runs
//! @ai:module:layer application
//! @ai:module:public_api config, dataset, evaluator, metrics, report, runner

pub mod config;
pub mod dataset;
pub mod evaluator;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::BenchmarkConfig;
pub use dataset::{DatasetLoader, DatasetLoaderTrait, GoldRecord, PredictionSet};
pub use evaluator::{classify, normalize, Outcome};
pub use metrics::{ScoreReport, Scorecard, Scorer, ScorerTrait};
pub use report::ReportGenerator;
pub use runner::{EvaluationRunner, HttpModelClient, MockModelClient, ModelClientTrait};

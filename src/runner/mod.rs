//! @ai:module:intent Model registry, provider clients and the evaluation loop
//! @ai:module:layer infrastructure
//! @ai:module:public_api HttpModelClient, MockModelClient, EvaluationRunner, RequestPacer, lookup_model

pub mod client;
pub mod executor;
pub mod pacer;
pub mod providers;
pub mod results;

pub use client::{clean_response, HttpModelClient, MockModelClient, ModelClientTrait, SYSTEM_PROMPT};
pub use executor::{EvaluationRunner, RunOutcome};
pub use pacer::{PacerTrait, RequestPacer};
pub use providers::{
    has_api_key, lookup_model, model_short_name, resolve_api_key, ModelSpec, Provider,
    SUPPORTED_MODELS,
};
pub use results::{run_timestamp, RunFiles, TIMESTAMP_FORMAT};

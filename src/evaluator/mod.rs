//! @ai:module:intent Per-record evaluation of model output against the gold standard
//! @ai:module:layer domain
//! @ai:module:public_api normalize, classify, Outcome

pub mod classify;
pub mod normalize;

pub use classify::{classify, model_says_error, Outcome};
pub use normalize::{normalize, same_sentence};

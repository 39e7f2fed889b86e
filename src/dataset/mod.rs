//! @ai:module:intent Gold dataset and prediction files
//! @ai:module:layer domain
//! @ai:module:public_api GoldRecord, Prediction, PredictionSet, DatasetLoader, DatasetSummary, DatasetError

pub mod error;
pub mod loader;
pub mod record;
pub mod summary;

pub use error::DatasetError;
pub use loader::{
    filter_split, parse_gold_lines, parse_prediction_lines, write_prediction, DatasetLoader,
    DatasetLoaderTrait,
};
pub use record::{GoldRecord, Prediction, PredictionSet, UNKNOWN_CATEGORY};
pub use summary::DatasetSummary;

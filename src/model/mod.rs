//! Model Module
//!
//! Owns the pre-trained artifacts and everything that touches them:
//! - The fitted classification pipeline (opaque, loaded from disk)
//! - The label encoder mapping class indices to class names
//! - The memoized artifact store shared read-only across requests

pub mod encoder;
pub mod pipeline;
pub mod store;

pub use encoder::LabelEncoder;
pub use pipeline::{Classifier, FittedPipeline, MenuItemQuery};
pub use store::{ModelArtifacts, ModelStore, ENCODER_FILE, PIPELINE_FILE};

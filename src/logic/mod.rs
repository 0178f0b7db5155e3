//! Cluster Module
//!
//! Feature preprocessing and rule-based cluster assignment.
//!
//! ## Structure
//! - `params`: Parameter Store (scaling constants, vocabularies)
//! - `layout`: Encoded vector layout and field names
//! - `validate`: Input Validator
//! - `encoder`: Feature Encoder
//! - `rules`: Thresholds and constants
//! - `classifier`: Cluster assignment and confidence
//! - `catalog`: Cluster names and descriptions
//! - `predictor`: validate → classify → catalog pipeline
//!
//! ## Usage
//! ```ignore
//! use health_cluster::logic::{params, predict, HealthInput};
//!
//! let input = HealthInput::new(35.0, false, false, 23.0, 5.9, 95.0, "Male", "current");
//! let outcome = predict(&input, params::load())?;
//! println!("{} ({:.2})", outcome.cluster_name, outcome.confidence);
//! ```

pub mod error;
pub mod types;
pub mod params;
pub mod layout;
pub mod validate;
pub mod encoder;
pub mod rules;
pub mod classifier;
pub mod catalog;
pub mod predictor;

pub use error::{ClusterError, ClusterResult};

pub use types::{ClassificationResult, Cluster, FieldValue, HealthInput};

pub use params::PreprocessingParameters;

pub use encoder::{encode, FeatureVector};

pub use validate::validate;

pub use classifier::{classify, classify_with_params, risk_score};

pub use catalog::ClusterDescriptor;

pub use predictor::{model_info, predict, ModelInfo, PredictionOutcome};

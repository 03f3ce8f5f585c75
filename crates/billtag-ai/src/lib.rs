//! AI layer: label vocabulary, tokenizer encoding, the classifier harness
//! boundary, multi-label metrics, and artifact persistence.

mod artifacts;
mod centroid;
mod dataset;
mod encoder;
mod eval;
mod harness;
mod labels;
#[cfg(feature = "onnx")]
mod onnx;

pub use artifacts::{LABELS_FILE, MODEL_DIR, TOKENIZER_FILE, save_artifacts};
pub use centroid::{CentroidModel, CentroidTrainer};
pub use dataset::{EncodedDataset, EncodedExample};
pub use encoder::{TextEncoder, TokenizedText};
pub use eval::MultiLabelMetrics;
pub use harness::{Predictor, Trainer};
pub use labels::LabelVocabulary;
#[cfg(feature = "onnx")]
pub use onnx::OnnxPredictor;

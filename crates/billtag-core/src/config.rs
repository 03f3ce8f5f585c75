//! Training and preprocessing configuration.
//!
//! Every knob of the training pipeline lives here with a sensible default,
//! so a config file or CLI flag can override any of them without touching
//! the pipeline code.

use serde::{Deserialize, Serialize};

/// Configuration for one training run.
///
/// Defaults suit DistilBERT-style fine-tuning: 256-token inputs, batch
/// size 8 for both splits, 2 epochs, a 0.5 decision threshold, per-epoch
/// evaluation, and no intermediate checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Maximum token length; longer inputs are truncated.
    pub max_length: usize,
    /// Batch size for the training split.
    pub train_batch_size: usize,
    /// Batch size for the validation split.
    pub eval_batch_size: usize,
    /// Number of passes over the training split.
    pub epochs: usize,
    /// Score threshold for binarizing per-class probabilities.
    pub threshold: f32,
    /// Evaluate on the validation split after every epoch.
    pub eval_every_epoch: bool,
    /// Save intermediate checkpoints during training.
    pub save_checkpoints: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_length: 256,
            train_batch_size: 8,
            eval_batch_size: 8,
            epochs: 2,
            threshold: 0.5,
            eval_every_epoch: true,
            save_checkpoints: false,
        }
    }
}

/// What to do when one archive in a directory fails to extract.
///
/// An explicit choice rather than an accident of error propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivePolicy {
    /// Stop at the first failed archive, leaving the rest untouched.
    #[default]
    AbortOnError,
    /// Log the failure and move on to the remaining archives.
    ContinueOnError,
}

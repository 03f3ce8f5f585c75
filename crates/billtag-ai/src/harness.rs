//! The classifier harness boundary.
//!
//! The supervised multi-label classifier is an external collaborator: the
//! pipeline hands it correctly shaped encoded examples and interprets the
//! returned score matrix, nothing more. Backends plug in behind these two
//! traits — the in-repo centroid backend, an ONNX transformer export, or
//! anything else that honors the shapes.

use std::path::Path;

use crate::EncodedDataset;

/// A trained classifier that scores encoded examples.
pub trait Predictor {
    /// Per-class scores in `[0, 1]`: one row per example, one column per
    /// vocabulary label.
    fn predict(&mut self, data: &EncodedDataset) -> anyhow::Result<Vec<Vec<f32>>>;

    /// Write the classifier state into `dir`.
    fn save(&self, dir: &Path) -> anyhow::Result<()>;
}

/// A training backend.
///
/// `train` blocks until the configured schedule completes; there is no
/// cancellation. The backend may parallelize internally (device placement is
/// its concern, not the pipeline's).
pub trait Trainer {
    type Model: Predictor;

    fn train(
        &self,
        train: &EncodedDataset,
        val: &EncodedDataset,
        num_labels: usize,
    ) -> anyhow::Result<Self::Model>;
}

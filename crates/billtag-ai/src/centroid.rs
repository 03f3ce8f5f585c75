//! Centroid-based classifier backend.
//!
//! A lightweight, fully local implementation of the harness contract: each
//! example becomes a hashed bag-of-tokens vector, each label gets the
//! normalized mean of its examples' vectors, and prediction scores are
//! cosine similarities clamped to `[0, 1]`. Fitting is closed-form, so the
//! configured epoch schedule collapses to a single pass; batch sizes are a
//! transformer-backend concern and are not consulted here.

use std::fs;
use std::path::Path;

use anyhow::Context;
use billtag_core::TrainConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{EncodedDataset, MultiLabelMetrics, Predictor, TokenizedText, Trainer};

/// Hashed token buckets per feature vector.
const FEATURE_DIM: usize = 1 << 12;

/// File name for persisted centroid weights.
pub const WEIGHTS_FILE: &str = "centroids.json";

/// Training backend that fits one centroid per vocabulary label.
pub struct CentroidTrainer {
    config: TrainConfig,
}

impl CentroidTrainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }
}

impl Trainer for CentroidTrainer {
    type Model = CentroidModel;

    fn train(
        &self,
        train: &EncodedDataset,
        val: &EncodedDataset,
        num_labels: usize,
    ) -> anyhow::Result<Self::Model> {
        anyhow::ensure!(
            train.num_labels() == num_labels,
            "training split has {} labels, expected {num_labels}",
            train.num_labels()
        );

        // Accumulate per-label sums of hashed token features.
        let mut sums = vec![vec![0.0f32; FEATURE_DIM]; num_labels];
        let mut counts = vec![0usize; num_labels];

        for example in train.examples() {
            let feats = hashed_features(&example.tokens);
            for (label, &y) in example.labels.iter().enumerate() {
                if y >= 0.5 {
                    for (acc, &val) in sums[label].iter_mut().zip(&feats) {
                        *acc += val;
                    }
                    counts[label] += 1;
                }
            }
        }

        // Mean and normalize; labels with no examples keep a zero centroid
        // and score 0 for everything.
        let centroids = sums
            .into_iter()
            .zip(&counts)
            .map(|(mut sum, &count)| {
                if count > 0 {
                    for v in &mut sum {
                        *v /= count as f32;
                    }
                    normalize(&mut sum);
                }
                sum
            })
            .collect();

        let mut model = CentroidModel { centroids };
        info!(
            num_labels,
            examples = train.len(),
            "fitted centroid classifier"
        );

        if self.config.eval_every_epoch && !val.is_empty() {
            let scores = model.predict(val)?;
            let metrics =
                MultiLabelMetrics::from_scores(&val.label_matrix(), &scores, self.config.threshold);
            info!(micro_f1 = metrics.micro_f1, "validation after fit");
        }

        Ok(model)
    }
}

/// Fitted per-label centroids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidModel {
    centroids: Vec<Vec<f32>>,
}

impl CentroidModel {
    /// Load persisted weights from `dir`.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(WEIGHTS_FILE);
        let raw =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn num_labels(&self) -> usize {
        self.centroids.len()
    }
}

impl Predictor for CentroidModel {
    fn predict(&mut self, data: &EncodedDataset) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut rows = Vec::with_capacity(data.len());
        for example in data.examples() {
            let feats = hashed_features(&example.tokens);
            let row = self
                .centroids
                .iter()
                .map(|c| dot(&feats, c).clamp(0.0, 1.0))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }

    fn save(&self, dir: &Path) -> anyhow::Result<()> {
        let path = dir.join(WEIGHTS_FILE);
        let json = serde_json::to_string(self)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Hash attention-masked token ids into a fixed-width count vector, then
/// L2-normalize.
fn hashed_features(tokens: &TokenizedText) -> Vec<f32> {
    let mut v = vec![0.0f32; FEATURE_DIM];
    for (&id, &mask) in tokens.input_ids.iter().zip(&tokens.attention_mask) {
        if mask > 0 {
            v[id as usize % FEATURE_DIM] += 1.0;
        }
    }
    normalize(&mut v);
    v
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// L2-normalize a vector in place.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

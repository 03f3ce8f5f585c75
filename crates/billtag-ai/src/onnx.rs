//! ONNX Runtime predictor for an exported sequence-classification model.
//!
//! Loads a fine-tuned multi-label classifier exported to `model.onnx` and
//! scores encoded examples through it. Fine-tuning itself happens outside
//! this repository; this backend covers the predict side of the harness for
//! transformer exports. The model directory must contain `model.onnx`.

use std::path::{Path, PathBuf};

use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::{EncodedDataset, EncodedExample, Predictor};

/// Sequence-classification inference via ONNX Runtime.
///
/// Expects a model taking `input_ids` and `attention_mask` of shape
/// `[batch, seq]` and producing logits `[batch, num_labels]`; logits are
/// passed through a sigmoid to give per-class scores in `[0, 1]`.
pub struct OnnxPredictor {
    session: Session,
    model_path: PathBuf,
    batch_size: usize,
}

impl OnnxPredictor {
    /// Load `model.onnx` from a directory.
    pub fn load(model_dir: &Path, batch_size: usize) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");

        let session = Session::builder()?.commit_from_file(&model_path)?;

        info!(model = %model_path.display(), batch_size, "loaded classifier model");
        Ok(Self {
            session,
            model_path,
            batch_size,
        })
    }

    fn predict_batch(&mut self, examples: &[EncodedExample]) -> anyhow::Result<Vec<Vec<f32>>> {
        let batch_size = examples.len();
        let seq_len = examples
            .iter()
            .map(|e| e.tokens.input_ids.len())
            .max()
            .unwrap_or(0);

        // Build flat input tensors: [batch_size, seq_len].
        let mut input_ids = vec![0i64; batch_size * seq_len];
        let mut attention_mask = vec![0i64; batch_size * seq_len];

        for (i, example) in examples.iter().enumerate() {
            let offset = i * seq_len;
            for (j, &id) in example.tokens.input_ids.iter().enumerate() {
                input_ids[offset + j] = id as i64;
            }
            for (j, &mask) in example.tokens.attention_mask.iter().enumerate() {
                attention_mask[offset + j] = mask as i64;
            }
        }

        let shape = [batch_size as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;

        let outputs = self.session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
        ])?;

        // Logits: [batch_size, num_labels].
        let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] as usize == batch_size,
            "unexpected output shape: {dims:?}, expected [{batch_size}, num_labels]"
        );
        let num_labels = dims[1] as usize;

        let mut rows = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let offset = i * num_labels;
            rows.push(
                logits[offset..offset + num_labels]
                    .iter()
                    .map(|&l| sigmoid(l))
                    .collect(),
            );
        }
        Ok(rows)
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&mut self, data: &EncodedDataset) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut rows = Vec::with_capacity(data.len());
        for chunk in data.examples().chunks(self.batch_size.max(1)) {
            rows.extend(self.predict_batch(chunk)?);
        }
        Ok(rows)
    }

    fn save(&self, dir: &Path) -> anyhow::Result<()> {
        // The session state is the model file itself.
        std::fs::copy(&self.model_path, dir.join("model.onnx"))?;
        Ok(())
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxPredictor::load(dir.path(), 8).unwrap_err();
        assert!(err.to_string().contains("model.onnx not found"));
    }

    #[test]
    fn sigmoid_maps_logits_into_unit_interval() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }
}

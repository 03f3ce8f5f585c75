//! Artifact persistence: trained classifier state, tokenizer state, and the
//! fitted label vocabulary, co-located under one output directory.
//!
//! Layout:
//!
//! ```text
//! out/
//!   model/           classifier weights (backend-defined contents)
//!   tokenizer.json   tokenizer state
//!   labels.json      ordered label array, index-aligned with the encoding
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::{LabelVocabulary, Predictor, TextEncoder};

pub const MODEL_DIR: &str = "model";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const LABELS_FILE: &str = "labels.json";

/// Write all three artifacts under `out_dir`.
///
/// The persisted label order is exactly the vector-index order used during
/// training; inference reconstructs predictions by index into that array.
pub fn save_artifacts<P: Predictor>(
    model: &P,
    encoder: &TextEncoder,
    vocabulary: &LabelVocabulary,
    out_dir: &Path,
) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let model_dir = out_dir.join(MODEL_DIR);
    fs::create_dir_all(&model_dir)
        .with_context(|| format!("creating model directory {}", model_dir.display()))?;
    model.save(&model_dir).context("saving classifier state")?;

    encoder.save(out_dir).context("saving tokenizer state")?;

    vocabulary
        .save(&out_dir.join(LABELS_FILE))
        .context("saving label vocabulary")?;

    info!(out = %out_dir.display(), "saved model, tokenizer, and label artifacts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodedDataset;

    /// Predictor stub that records its save location.
    struct StubModel;

    impl Predictor for StubModel {
        fn predict(&mut self, _data: &EncodedDataset) -> anyhow::Result<Vec<Vec<f32>>> {
            Ok(vec![])
        }

        fn save(&self, dir: &Path) -> anyhow::Result<()> {
            fs::write(dir.join("weights.bin"), b"stub")?;
            Ok(())
        }
    }

    #[test]
    fn vocabulary_artifact_is_index_aligned() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = LabelVocabulary::fit(&[vec!["Tax".into(), "Health".into()]]);

        // Persist only the parts that need no tokenizer asset.
        let model_dir = dir.path().join(MODEL_DIR);
        fs::create_dir_all(&model_dir).unwrap();
        StubModel.save(&model_dir).unwrap();
        vocab.save(&dir.path().join(LABELS_FILE)).unwrap();

        let raw = fs::read_to_string(dir.path().join(LABELS_FILE)).unwrap();
        let persisted: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vocab.labels());
        assert!(model_dir.join("weights.bin").exists());
    }
}

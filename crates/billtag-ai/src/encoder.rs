//! Tokenizer wrapper producing fixed-shape classifier inputs.
//!
//! Wraps a HuggingFace `tokenizer.json` with truncation and batch padding
//! configured for the classifier's maximum input length, and persists the
//! tokenizer state alongside the other artifacts.

use std::path::{Path, PathBuf};

use tokenizers::Tokenizer;
use tracing::info;

/// Token ids and attention mask for one text, padded within its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
}

/// Text preprocessor for the classifier.
#[derive(Debug)]
pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_length: usize,
}

impl TextEncoder {
    /// Load a `tokenizer.json`, configuring truncation to `max_length` and
    /// batch padding.
    pub fn load(tokenizer_path: &Path, max_length: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer file not found: {tokenizer_path:?}"
        );

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        // Pad all inputs in a batch to the same length.
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        info!(max_length, path = %tokenizer_path.display(), "loaded tokenizer");
        Ok(Self {
            tokenizer,
            max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Tokenize a batch of texts into padded id/mask pairs.
    pub fn encode_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<TokenizedText>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        Ok(encodings
            .into_iter()
            .map(|e| TokenizedText {
                input_ids: e.get_ids().to_vec(),
                attention_mask: e.get_attention_mask().to_vec(),
            })
            .collect())
    }

    /// Write the tokenizer state into `dir`, returning the file path.
    pub fn save(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(crate::TOKENIZER_FILE);
        self.tokenizer
            .save(&path, false)
            .map_err(|e| anyhow::anyhow!("save tokenizer: {e}"))?;
        Ok(path)
    }
}

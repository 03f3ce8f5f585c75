//! Encoded datasets: tokenized inputs paired with multi-hot label vectors.

use crate::TokenizedText;

/// One classifier input: padded token ids plus a float label vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedExample {
    pub tokens: TokenizedText,
    /// Multi-hot vector, one position per vocabulary label.
    pub labels: Vec<f32>,
}

/// A split's worth of encoded examples with a uniform label width.
#[derive(Debug, Clone, Default)]
pub struct EncodedDataset {
    examples: Vec<EncodedExample>,
    num_labels: usize,
}

impl EncodedDataset {
    /// Pair tokenized texts with label vectors.
    ///
    /// Fails when the two sides disagree in length or any label vector does
    /// not have `num_labels` positions — a shape bug upstream, not a data
    /// condition.
    pub fn new(
        tokens: Vec<TokenizedText>,
        label_vectors: Vec<Vec<f32>>,
        num_labels: usize,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            tokens.len() == label_vectors.len(),
            "tokenized texts ({}) and label vectors ({}) differ in count",
            tokens.len(),
            label_vectors.len()
        );
        for (i, v) in label_vectors.iter().enumerate() {
            anyhow::ensure!(
                v.len() == num_labels,
                "label vector {i} has width {}, expected {num_labels}",
                v.len()
            );
        }

        let examples = tokens
            .into_iter()
            .zip(label_vectors)
            .map(|(tokens, labels)| EncodedExample { tokens, labels })
            .collect();

        Ok(Self {
            examples,
            num_labels,
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Width of every label vector in the dataset.
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn examples(&self) -> &[EncodedExample] {
        &self.examples
    }

    /// Ground-truth label matrix, one row per example.
    pub fn label_matrix(&self) -> Vec<Vec<f32>> {
        self.examples.iter().map(|e| e.labels.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(ids: &[u32]) -> TokenizedText {
        TokenizedText {
            input_ids: ids.to_vec(),
            attention_mask: vec![1; ids.len()],
        }
    }

    #[test]
    fn pairs_tokens_with_labels() {
        let ds = EncodedDataset::new(
            vec![toks(&[1, 2]), toks(&[3])],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            2,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.num_labels(), 2);
        assert_eq!(ds.label_matrix()[1], vec![0.0, 1.0]);
    }

    #[test]
    fn count_mismatch_rejected() {
        let err = EncodedDataset::new(vec![toks(&[1])], vec![], 0).unwrap_err();
        assert!(err.to_string().contains("differ in count"));
    }

    #[test]
    fn width_mismatch_rejected() {
        let err =
            EncodedDataset::new(vec![toks(&[1])], vec![vec![1.0, 0.0]], 3).unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn zero_label_width_is_allowed() {
        // A corpus with no topics anywhere still encodes; vectors are empty.
        let ds = EncodedDataset::new(vec![toks(&[5])], vec![vec![]], 0).unwrap();
        assert_eq!(ds.num_labels(), 0);
    }
}

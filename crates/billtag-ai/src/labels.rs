//! Label vocabulary: the fixed, ordered set of subject strings seen at fit
//! time, and multi-hot encoding against it.
//!
//! Fitting and encoding are deliberately separate operations. `fit` builds a
//! new vocabulary from the training split; `encode` only reads an existing
//! one, so validation and inference splits can never widen or reorder the
//! index assignment. There is no refit method.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

/// Fitted subject vocabulary with a frozen index order.
///
/// Labels are sorted lexicographically at fit time, so the same topic lists
/// always produce the same index assignment. Position `i` of every encoded
/// vector corresponds to `labels()[i]`, and the persisted JSON array keeps
/// that exact order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelVocabulary {
    /// Fit a vocabulary from the training split's topic lists.
    ///
    /// Collects the distinct topic strings and assigns indices in sorted
    /// lexicographic order.
    pub fn fit(topic_lists: &[Vec<String>]) -> Self {
        let distinct: BTreeSet<&str> = topic_lists
            .iter()
            .flat_map(|topics| topics.iter().map(|t| t.as_str()))
            .collect();

        let labels: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
        info!(num_labels = labels.len(), "fitted label vocabulary");
        Self::from_labels(labels)
    }

    fn from_labels(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, index }
    }

    /// Encode one topic list as a multi-hot vector of width `len()`.
    ///
    /// Topics not in the vocabulary are silently dropped.
    pub fn encode(&self, topics: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.labels.len()];
        for topic in topics {
            if let Some(&i) = self.index.get(topic) {
                vector[i] = 1.0;
            }
        }
        vector
    }

    /// Encode a whole split, one vector per topic list.
    pub fn encode_all(&self, topic_lists: &[Vec<String>]) -> Vec<Vec<f32>> {
        topic_lists.iter().map(|t| self.encode(t)).collect()
    }

    /// Recover label names from a score vector at the given threshold.
    pub fn decode(&self, scores: &[f32], threshold: f32) -> Vec<&str> {
        scores
            .iter()
            .zip(&self.labels)
            .filter(|&(&s, _)| s > threshold)
            .map(|(_, l)| l.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, topic: &str) -> Option<usize> {
        self.index.get(topic).copied()
    }

    /// Persist as an ordered JSON array of label strings.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string(&self.labels)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Load a previously persisted vocabulary, preserving index order.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let labels: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing label vocabulary {}", path.display()))?;
        Ok(Self::from_labels(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(lists: &[&[&str]]) -> Vec<Vec<String>> {
        lists
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn fit_sorts_distinct_topics() {
        let lists = topics(&[&["Tax", "Health"], &["Tax"]]);
        let vocab = LabelVocabulary::fit(&lists);
        assert_eq!(vocab.labels(), ["Health", "Tax"]);
        assert_eq!(vocab.index_of("Health"), Some(0));
        assert_eq!(vocab.index_of("Tax"), Some(1));
    }

    #[test]
    fn end_to_end_scenario_from_two_acts() {
        // Training: Act A {Health, Tax}, Act B {Tax}. Validation: Act C
        // {Health, Energy} — Energy is out of vocabulary and dropped.
        let train = topics(&[&["Health", "Tax"], &["Tax"]]);
        let vocab = LabelVocabulary::fit(&train);
        assert_eq!(vocab.labels(), ["Health", "Tax"]);

        let encoded = vocab.encode_all(&train);
        assert_eq!(encoded[0], vec![1.0, 1.0]);
        assert_eq!(encoded[1], vec![0.0, 1.0]);

        let val = topics(&[&["Health", "Energy"]]);
        let encoded_val = vocab.encode_all(&val);
        assert_eq!(encoded_val[0], vec![1.0, 0.0]);
    }

    #[test]
    fn encode_width_is_constant_regardless_of_split() {
        let vocab = LabelVocabulary::fit(&topics(&[&["a", "b", "c"]]));
        let out = vocab.encode_all(&topics(&[&["a"], &["z"], &[]]));
        for v in &out {
            assert_eq!(v.len(), 3);
        }
    }

    #[test]
    fn fit_is_deterministic() {
        let lists = topics(&[&["b", "a"], &["c", "a"]]);
        let v1 = LabelVocabulary::fit(&lists);
        let v2 = LabelVocabulary::fit(&lists);
        assert_eq!(v1, v2);
    }

    #[test]
    fn empty_topic_list_encodes_all_zero() {
        let vocab = LabelVocabulary::fit(&topics(&[&["a", "b"]]));
        assert_eq!(vocab.encode(&[]), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_fit_yields_empty_vectors() {
        let vocab = LabelVocabulary::fit(&[]);
        assert!(vocab.is_empty());
        assert!(vocab.encode(&["anything".to_string()]).is_empty());
    }

    #[test]
    fn decode_round_trips_in_vocabulary_topics() {
        let lists = topics(&[&["Health", "Tax"], &["Energy"]]);
        let vocab = LabelVocabulary::fit(&lists);
        for list in &lists {
            let encoded = vocab.encode(list);
            let mut decoded: Vec<_> = vocab.decode(&encoded, 0.5);
            let mut expected: Vec<&str> = list.iter().map(String::as_str).collect();
            decoded.sort_unstable();
            expected.sort_unstable();
            assert_eq!(decoded, expected);
        }
    }

    #[test]
    fn duplicate_topics_in_one_list_collapse() {
        let vocab = LabelVocabulary::fit(&topics(&[&["Tax", "Tax"]]));
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.encode(&["Tax".to_string(), "Tax".to_string()]), vec![1.0]);
    }

    #[test]
    fn save_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");

        let vocab = LabelVocabulary::fit(&topics(&[&["Tax", "Health", "Energy"]]));
        vocab.save(&path).unwrap();

        let loaded = LabelVocabulary::load(&path).unwrap();
        assert_eq!(loaded, vocab);
        assert_eq!(loaded.labels(), ["Energy", "Health", "Tax"]);

        // File is a plain JSON array, index-aligned.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"["Energy","Health","Tax"]"#);
    }
}

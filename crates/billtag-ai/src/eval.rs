//! Multi-label classification metrics.
//!
//! Thresholds per-class scores into binary predictions, then computes
//! per-class precision/recall/F1 and a pooled micro-F1. Zero-division cases
//! (a label never predicted, never true, or an entirely empty batch) produce
//! 0.0 rather than NaN.

use std::fmt::Write as _;

use crate::LabelVocabulary;

/// Epsilon added to the micro-F1 denominator so an all-zero batch stays
/// defined at 0.0.
const EPS: f64 = 1e-8;

/// Per-class and pooled metrics for one evaluation pass.
#[derive(Debug, Clone)]
pub struct MultiLabelMetrics {
    /// Per-class precision, index-aligned with the label vocabulary.
    pub precision: Vec<f64>,
    /// Per-class recall.
    pub recall: Vec<f64>,
    /// Per-class F1.
    pub f1: Vec<f64>,
    /// Per-class count of true instances.
    pub support: Vec<usize>,
    /// Pooled precision across all classes.
    pub micro_precision: f64,
    /// Pooled recall across all classes.
    pub micro_recall: f64,
    /// 2·TP / (TP+FP + TP+FN + eps), pooled across all classes.
    pub micro_f1: f64,
    pub n_classes: usize,
}

impl MultiLabelMetrics {
    /// Compute metrics from a ground-truth multi-hot matrix and a predicted
    /// score matrix of the same shape, binarizing scores at `threshold`.
    pub fn from_scores(y_true: &[Vec<f32>], scores: &[Vec<f32>], threshold: f32) -> Self {
        assert_eq!(
            y_true.len(),
            scores.len(),
            "ground truth and scores must have the same number of rows"
        );

        let n_classes = y_true.first().map_or(0, Vec::len);

        let mut tp = vec![0usize; n_classes];
        let mut fp = vec![0usize; n_classes];
        let mut fn_ = vec![0usize; n_classes];
        let mut support = vec![0usize; n_classes];

        for (truth, row) in y_true.iter().zip(scores) {
            assert_eq!(truth.len(), n_classes, "ragged ground-truth matrix");
            assert_eq!(row.len(), n_classes, "score row width mismatch");

            for c in 0..n_classes {
                let actual = truth[c] >= 0.5;
                let predicted = row[c] > threshold;
                if actual {
                    support[c] += 1;
                }
                match (actual, predicted) {
                    (true, true) => tp[c] += 1,
                    (false, true) => fp[c] += 1,
                    (true, false) => fn_[c] += 1,
                    (false, false) => {}
                }
            }
        }

        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut f1 = Vec::with_capacity(n_classes);

        for c in 0..n_classes {
            let (t, p_, n) = (tp[c] as f64, fp[c] as f64, fn_[c] as f64);
            let p = if t + p_ > 0.0 { t / (t + p_) } else { 0.0 };
            let r = if t + n > 0.0 { t / (t + n) } else { 0.0 };
            let f = if p + r > 0.0 {
                2.0 * p * r / (p + r)
            } else {
                0.0
            };
            precision.push(p);
            recall.push(r);
            f1.push(f);
        }

        let tp_total: usize = tp.iter().sum();
        let fp_total: usize = fp.iter().sum();
        let fn_total: usize = fn_.iter().sum();

        let micro_precision = tp_total as f64 / (tp_total as f64 + fp_total as f64 + EPS);
        let micro_recall = tp_total as f64 / (tp_total as f64 + fn_total as f64 + EPS);
        let micro_f1 = 2.0 * tp_total as f64
            / ((tp_total + fp_total) as f64 + (tp_total + fn_total) as f64 + EPS);

        Self {
            precision,
            recall,
            f1,
            support,
            micro_precision,
            micro_recall,
            micro_f1,
            n_classes,
        }
    }

    /// Render an sklearn-style report with label names from the vocabulary.
    pub fn classification_report(&self, vocabulary: &LabelVocabulary) -> String {
        let name_width = vocabulary
            .labels()
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("micro avg".len());

        let mut report = String::new();
        let _ = writeln!(
            report,
            "{:>name_width$} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        );
        let _ = writeln!(report, "{}", "-".repeat(name_width + 44));

        for c in 0..self.n_classes {
            let name = vocabulary.label(c).unwrap_or("?");
            let _ = writeln!(
                report,
                "{:>name_width$} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, self.precision[c], self.recall[c], self.f1[c], self.support[c]
            );
        }

        let _ = writeln!(report, "{}", "-".repeat(name_width + 44));
        let total_support: usize = self.support.iter().sum();
        let _ = writeln!(
            report,
            "{:>name_width$} {:>10.2} {:>10.2} {:>10.2} {:>10}",
            "micro avg", self.micro_precision, self.micro_recall, self.micro_f1, total_support
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f32]]) -> Vec<Vec<f32>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn perfect_match_micro_f1_is_one() {
        let truth = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let m = MultiLabelMetrics::from_scores(&truth, &truth, 0.5);
        assert!((m.micro_f1 - 1.0).abs() < 1e-6, "got {}", m.micro_f1);
        assert!((m.precision[0] - 1.0).abs() < 1e-9);
        assert!((m.recall[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_truth_and_prediction_is_defined() {
        let truth = matrix(&[&[0.0, 0.0], &[0.0, 0.0]]);
        let m = MultiLabelMetrics::from_scores(&truth, &truth, 0.5);
        assert_eq!(m.micro_f1, 0.0);
        assert!(!m.micro_f1.is_nan());
        assert_eq!(m.f1, vec![0.0, 0.0]);
    }

    #[test]
    fn scores_binarized_at_threshold() {
        let truth = matrix(&[&[1.0, 0.0]]);
        // 0.6 > 0.5 → predicted; 0.4 ≤ 0.5 → not predicted.
        let scores = matrix(&[&[0.6, 0.4]]);
        let m = MultiLabelMetrics::from_scores(&truth, &scores, 0.5);
        assert!((m.micro_f1 - 1.0).abs() < 1e-6);

        // Raising the threshold flips the true positive into a false negative.
        let strict = MultiLabelMetrics::from_scores(&truth, &scores, 0.7);
        assert!(strict.micro_f1 < 1e-6);
    }

    #[test]
    fn mixed_predictions_counted_per_class() {
        // Class 0: TP=1, FP=1 → P=0.5, R=1.0, F1=2/3.
        // Class 1: FN=1 → P=0, R=0, F1=0.
        let truth = matrix(&[&[1.0, 1.0], &[0.0, 0.0]]);
        let scores = matrix(&[&[0.9, 0.1], &[0.8, 0.2]]);
        let m = MultiLabelMetrics::from_scores(&truth, &scores, 0.5);

        assert!((m.precision[0] - 0.5).abs() < 1e-9);
        assert!((m.recall[0] - 1.0).abs() < 1e-9);
        assert!((m.f1[0] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.f1[1], 0.0);
        assert_eq!(m.support, vec![1, 1]);

        // Pooled: TP=1, FP=1, FN=1 → micro-F1 = 2/4 = 0.5.
        assert!((m.micro_f1 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_batch_is_defined() {
        let m = MultiLabelMetrics::from_scores(&[], &[], 0.5);
        assert_eq!(m.n_classes, 0);
        assert_eq!(m.micro_f1, 0.0);
    }

    #[test]
    fn report_names_every_label() {
        let vocab = LabelVocabulary::fit(&[vec!["Health".into(), "Tax".into()]]);
        let truth = matrix(&[&[1.0, 0.0]]);
        let m = MultiLabelMetrics::from_scores(&truth, &truth, 0.5);
        let report = m.classification_report(&vocab);

        assert!(report.contains("Health"));
        assert!(report.contains("Tax"));
        assert!(report.contains("precision"));
        assert!(report.contains("micro avg"));
    }
}

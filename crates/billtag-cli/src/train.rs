//! Training pipeline: load corpus splits, extract features and labels, fit
//! the label vocabulary, tokenize, hand off to the classifier backend,
//! evaluate, and persist artifacts.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use billtag_ai::{
    EncodedDataset, LabelVocabulary, MultiLabelMetrics, Predictor, TextEncoder, Trainer,
    save_artifacts,
};
use billtag_core::{TrainConfig, TrainingExample, extract_examples};
use billtag_data::load_corpus;

pub struct TrainArgs {
    pub train_path: PathBuf,
    pub val_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub out_dir: PathBuf,
    pub config: TrainConfig,
}

pub struct TrainStats {
    pub train_examples: usize,
    pub val_examples: usize,
    pub num_labels: usize,
    pub micro_f1: f64,
    pub elapsed_secs: f64,
}

/// Run the full pipeline with the given training backend.
///
/// Returns run statistics and the rendered per-class evaluation report.
pub fn run_train_pipeline<T: Trainer>(
    args: &TrainArgs,
    trainer: &T,
) -> anyhow::Result<(TrainStats, String)> {
    let start = Instant::now();
    let config = &args.config;

    // 1. Load both splits.
    let train_bills = load_corpus(&args.train_path).context("loading training split")?;
    let val_bills = load_corpus(&args.val_path).context("loading validation split")?;
    eprintln!(
        "  Loaded {} training / {} validation bills",
        train_bills.len(),
        val_bills.len()
    );

    // 2. Extract text blobs and topic lists.
    let train_examples = extract_examples(&train_bills);
    let val_examples = extract_examples(&val_bills);

    // 3. Fit the vocabulary on the training split only, then encode both
    //    splits against it.
    let train_topics = topic_lists(&train_examples);
    let val_topics = topic_lists(&val_examples);
    let vocabulary = LabelVocabulary::fit(&train_topics);
    let y_train = vocabulary.encode_all(&train_topics);
    let y_val = vocabulary.encode_all(&val_topics);
    eprintln!("  Vocabulary: {} distinct subjects", vocabulary.len());

    // 4. Tokenize.
    let encoder = TextEncoder::load(&args.tokenizer_path, config.max_length)
        .context("loading tokenizer")?;
    let train_tokens = encoder
        .encode_batch(&texts(&train_examples))
        .context("tokenizing training split")?;
    let val_tokens = encoder
        .encode_batch(&texts(&val_examples))
        .context("tokenizing validation split")?;

    let train_ds = EncodedDataset::new(train_tokens, y_train, vocabulary.len())?;
    let val_ds = EncodedDataset::new(val_tokens, y_val, vocabulary.len())?;

    // 5. Train (blocks until the backend's schedule completes).
    eprintln!("  Training...");
    let mut model = trainer
        .train(&train_ds, &val_ds, vocabulary.len())
        .context("training classifier")?;

    // 6. Evaluate on the validation split.
    let scores = model.predict(&val_ds).context("scoring validation split")?;
    let metrics = MultiLabelMetrics::from_scores(&val_ds.label_matrix(), &scores, config.threshold);
    let report = metrics.classification_report(&vocabulary);

    // 7. Persist model, tokenizer, and label vocabulary.
    save_artifacts(&model, &encoder, &vocabulary, &args.out_dir)?;

    let stats = TrainStats {
        train_examples: train_ds.len(),
        val_examples: val_ds.len(),
        num_labels: vocabulary.len(),
        micro_f1: metrics.micro_f1,
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    Ok((stats, report))
}

fn topic_lists(examples: &[TrainingExample]) -> Vec<Vec<String>> {
    examples.iter().map(|e| e.topics.clone()).collect()
}

fn texts(examples: &[TrainingExample]) -> Vec<&str> {
    examples.iter().map(|e| e.text.as_str()).collect()
}

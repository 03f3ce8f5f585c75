use std::path::PathBuf;

use billtag_ai::CentroidTrainer;
use billtag_core::{ArchivePolicy, TrainConfig};
use clap::{Parser, Subcommand};

mod train;

#[derive(Parser)]
#[command(name = "billtag", version, about = "Multi-label subject tagging for legislative bills")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train the subject classifier from two JSON corpus splits
    Train {
        /// Training split (JSON array of bill records)
        #[arg(long)]
        train: PathBuf,
        /// Validation split (JSON array of bill records)
        #[arg(long)]
        val: PathBuf,
        /// Pretrained tokenizer.json to encode text with
        #[arg(long)]
        tokenizer: PathBuf,
        /// Output directory for model, tokenizer, and label artifacts
        #[arg(long, default_value = "bill_label_model")]
        out: PathBuf,
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long)]
        batch_size: Option<usize>,
        #[arg(long)]
        max_length: Option<usize>,
        #[arg(long)]
        threshold: Option<f32>,
    },
    /// Extract and delete zip archives in the raw-data subdirectories
    Unzip {
        /// Base directory holding the district zip subdirectories
        base: PathBuf,
        /// Keep going past individual extraction failures
        #[arg(long)]
        continue_on_error: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("billtag v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Train {
            train,
            val,
            tokenizer,
            out,
            epochs,
            batch_size,
            max_length,
            threshold,
        } => {
            let mut config = TrainConfig::default();
            if let Some(e) = epochs {
                config.epochs = e;
            }
            if let Some(b) = batch_size {
                config.train_batch_size = b;
                config.eval_batch_size = b;
            }
            if let Some(m) = max_length {
                config.max_length = m;
            }
            if let Some(t) = threshold {
                config.threshold = t;
            }

            let args = train::TrainArgs {
                train_path: train,
                val_path: val,
                tokenizer_path: tokenizer,
                out_dir: out,
                config: config.clone(),
            };
            let trainer = CentroidTrainer::new(config);
            let (stats, report) = train::run_train_pipeline(&args, &trainer)?;

            println!("{report}");
            eprintln!(
                "  Trained on {} bills / {} labels, validated on {} bills \
                 (micro-F1 {:.4}) in {:.1}s",
                stats.train_examples,
                stats.num_labels,
                stats.val_examples,
                stats.micro_f1,
                stats.elapsed_secs
            );
        }
        Command::Unzip {
            base,
            continue_on_error,
        } => {
            let policy = if continue_on_error {
                ArchivePolicy::ContinueOnError
            } else {
                ArchivePolicy::AbortOnError
            };
            for (dir, stats) in billtag_data::normalize_shape_dirs(&base, policy)? {
                eprintln!(
                    "  {dir}: {} extracted, {} skipped, {} failed",
                    stats.extracted, stats.skipped, stats.failed
                );
            }
        }
    }

    Ok(())
}

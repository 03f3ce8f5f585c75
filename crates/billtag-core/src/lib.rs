pub mod config;
pub mod record;

pub use config::{ArchivePolicy, TrainConfig};
pub use record::{BillRecord, TrainingExample, extract_example, extract_examples};

//! Data layer: JSON corpus loading and zip archive normalization.

mod archive;
mod corpus;
mod error;

pub use archive::{ArchiveStats, SHAPE_DIRS, extract_archives, normalize_shape_dirs};
pub use corpus::load_corpus;
pub use error::DataError;

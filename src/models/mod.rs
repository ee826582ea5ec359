pub mod analysis;

pub use analysis::{AnalysisResult, AnalysisSource, FileMetadata, FormatDetails};

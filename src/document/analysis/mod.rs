pub mod pipeline;
pub mod result;

pub use pipeline::AnalysisPipeline;
pub use result::{AnalysisResult, PaperReport};

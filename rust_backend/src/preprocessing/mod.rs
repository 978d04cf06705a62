pub mod pipeline;

pub use pipeline::{clean_customers, CleaningPipeline, CleaningReport, PipelineOutput};

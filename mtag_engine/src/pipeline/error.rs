use crate::file_processor::FileProcessorError;

/// Pipeline processing errors.
///
/// Tag extraction itself never fails; everything that can go wrong happens
/// before the engine runs, while getting the file into memory.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Pipeline { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }
}

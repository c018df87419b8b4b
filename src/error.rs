//! Pipeline Error Kinds
//!
//! Operations return `anyhow::Result`; these variants mark the failures that
//! callers inspect with `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// An external program ran but exited unsuccessfully
    #[error("`{program}` exited with status {status}: {stderr}")]
    ProcessFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    /// Every synthesis attempt for one sample failed
    #[error("synthesis of sample {index} failed after {attempts} attempt(s): {reason}")]
    SynthesisFailed {
        index: usize,
        attempts: u32,
        reason: String,
    },

    #[error("no API key found in environment (tried {0})")]
    MissingApiKey(String),

    #[error("invalid SRT in {path}: {reason}")]
    InvalidSubtitle { path: PathBuf, reason: String },

    #[error("LLM returned an empty response")]
    EmptyResponse,
}

pub mod engine;
pub mod prompts;
pub mod sequence;

pub use crate::domain::model::{GenerationRequest, GenerationResult, TaskInputs};
pub use crate::domain::ports::{ContentDelegate, PreviewRenderer, Storage, TextGenerator};
pub use crate::utils::error::Result;

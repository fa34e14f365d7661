pub mod adapters;
pub mod app;
pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod preview;
pub mod utils;

pub use adapters::LocalStorage;
pub use app::{build_engine, CrewEngine};
pub use config::{CliConfig, TomlConfig};
pub use core::engine::{ContentEngine, GenerationOutcome};
pub use domain::model::{ExpertiseLevel, GenerationRequest, GenerationResult, Platform};
pub use preview::{capture::PreviewCapture, LinkedInPreview};
pub use utils::error::{CrewError, Result};

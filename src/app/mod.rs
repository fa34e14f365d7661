// Application layer: agent profiles, task implementations and the crews that chain them.

pub mod agents;
pub mod crews;
pub mod tasks;

pub use crews::{build_engine, content_crew, image_crew, CrewEngine};

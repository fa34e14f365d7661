// Adapters layer: concrete implementations of the domain ports (LLM, search, image service, storage).

pub mod image_gen;
pub mod llm;
pub mod search;
pub mod storage;

pub use image_gen::ImageGenerationTool;
pub use llm::OpenAiClient;
pub use search::SerperClient;
pub use storage::LocalStorage;

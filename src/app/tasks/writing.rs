use crate::app::agents::WRITER;
use crate::app::tasks::task_prompt;
use crate::core::prompts::WRITING_EXPECTED_OUTPUT;
use crate::core::sequence::{ContextualTask, TaskContext};
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct WritingTask {
    generator: Arc<dyn TextGenerator>,
    description: String,
}

impl WritingTask {
    pub fn new(generator: Arc<dyn TextGenerator>, description: String) -> Self {
        Self {
            generator,
            description,
        }
    }
}

#[async_trait::async_trait]
impl ContextualTask for WritingTask {
    async fn execute(&self, context: &TaskContext) -> Result<String> {
        let prompt = task_prompt(&self.description, WRITING_EXPECTED_OUTPUT, context);
        let content = self
            .generator
            .complete(&WRITER.system_prompt(&context.inputs), &prompt)
            .await?;
        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "writing"
    }
}

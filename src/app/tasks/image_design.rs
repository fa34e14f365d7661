use crate::app::agents::IMAGE_DESIGNER;
use crate::app::tasks::task_prompt;
use crate::core::prompts::IMAGE_EXPECTED_OUTPUT;
use crate::core::sequence::{ContextualTask, TaskContext};
use crate::domain::ports::{ImageTool, TextGenerator};
use crate::utils::error::Result;
use std::sync::Arc;

// DALL-E 3 的 prompt 上限是 4000 字元
const MAX_IMAGE_PROMPT_CHARS: usize = 3500;

/// 先請 LLM 寫出圖片提示詞，再交給圖片工具產圖
pub struct ImageDesignTask {
    generator: Arc<dyn TextGenerator>,
    image_tool: Arc<dyn ImageTool>,
    description: String,
}

impl ImageDesignTask {
    pub fn new(generator: Arc<dyn TextGenerator>, image_tool: Arc<dyn ImageTool>, description: String) -> Self {
        Self {
            generator,
            image_tool,
            description,
        }
    }
}

#[async_trait::async_trait]
impl ContextualTask for ImageDesignTask {
    async fn execute(&self, context: &TaskContext) -> Result<String> {
        let mut prompt = task_prompt(&self.description, IMAGE_EXPECTED_OUTPUT, context);
        if let Some(content) = &context.inputs.content {
            prompt.push_str("\n\nThe post this image accompanies:\n");
            prompt.push_str(content);
        }
        prompt.push_str(
            "\n\nReply with only the prompt to send to the image generator, as one paragraph.",
        );

        let image_prompt = self
            .generator
            .complete(&IMAGE_DESIGNER.system_prompt(&context.inputs), &prompt)
            .await?;
        let image_prompt: String = image_prompt.trim().chars().take(MAX_IMAGE_PROMPT_CHARS).collect();
        tracing::debug!("🎨 Image prompt: {}", image_prompt);

        let output = self.image_tool.run(&image_prompt, None).await;
        Ok(format!("- {}", output.trim()))
    }

    fn name(&self) -> &str {
        "image_design"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tasks::test_support::{RecordingGenerator, StaticImageTool};
    use crate::core::engine::extract_image_path;
    use crate::core::prompts::PromptAssembler;
    use crate::domain::model::{ExpertiseLevel, GenerationRequest, Platform};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_image_design_passes_content_and_returns_marked_path() {
        let request = GenerationRequest::new("solar energy", Platform::Linkedin, ExpertiseLevel::Intermediate);
        let generator = Arc::new(RecordingGenerator::replying("  Navy and slate gradient, no text  "));
        let tool = Arc::new(StaticImageTool::new("img/carousel_20240101_120000.png"));
        let task = ImageDesignTask::new(generator.clone(), tool.clone(), PromptAssembler::image_prompt(&request));

        let inputs = request.inputs().with_content("SOLAR INSIGHTS ☀️");
        let context = TaskContext::new("t".to_string(), inputs);

        let output = task.execute(&context).await.unwrap();
        assert_eq!(output, "- img/carousel_20240101_120000.png");
        assert_eq!(
            extract_image_path(&output),
            PathBuf::from("img/carousel_20240101_120000.png")
        );

        assert_eq!(
            tool.prompts.lock().unwrap().as_slice(),
            &["Navy and slate gradient, no text".to_string()]
        );
        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].0.starts_with("You are Image Designer."));
        assert!(calls[0].1.contains("The post this image accompanies:\nSOLAR INSIGHTS ☀️"));
    }
}

//! 組裝兩組任務：內容組（研究 → 寫作）與圖片組（圖片設計）。

use crate::adapters::{ImageGenerationTool, OpenAiClient, SerperClient};
use crate::app::tasks::{ImageDesignTask, ResearchTask, WritingTask};
use crate::config::toml_config::{SearchConfig, TomlConfig};
use crate::core::engine::ContentEngine;
use crate::core::prompts::PromptAssembler;
use crate::core::sequence::TaskSequence;
use crate::domain::model::GenerationRequest;
use crate::domain::ports::{ImageTool, SearchTool, TextGenerator};
use crate::preview::LinkedInPreview;
use crate::utils::error::Result;
use std::sync::Arc;

pub type CrewEngine = ContentEngine<TaskSequence, TaskSequence, LinkedInPreview>;

pub fn content_crew(
    request: &GenerationRequest,
    generator: Arc<dyn TextGenerator>,
    search: Option<Arc<dyn SearchTool>>,
    search_config: &SearchConfig,
) -> TaskSequence {
    let prompts = PromptAssembler::assemble(request);

    let mut research = ResearchTask::new(generator.clone(), prompts.research);
    if let Some(search) = search {
        research = research.with_search(
            search,
            search_config.num_results,
            search_config.preferred_category.clone(),
        );
    }

    TaskSequence::new("content")
        .with_task(Box::new(research))
        .with_task(Box::new(WritingTask::new(generator, prompts.writing)))
}

pub fn image_crew(
    request: &GenerationRequest,
    generator: Arc<dyn TextGenerator>,
    image_tool: Arc<dyn ImageTool>,
) -> TaskSequence {
    TaskSequence::new("image").with_task(Box::new(ImageDesignTask::new(
        generator,
        image_tool,
        PromptAssembler::image_prompt(request),
    )))
}

/// 依設定建立真正連外的引擎
pub fn build_engine(settings: &TomlConfig, request: &GenerationRequest) -> Result<CrewEngine> {
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::new(&settings.llm)?);

    let search: Option<Arc<dyn SearchTool>> = if settings.search.enabled {
        Some(Arc::new(SerperClient::new(&settings.search)))
    } else {
        tracing::info!("🔕 Web search disabled, research relies on the model only");
        None
    };

    let image_tool: Arc<dyn ImageTool> = Arc::new(ImageGenerationTool::new(&settings.image)?);

    Ok(ContentEngine::new(
        content_crew(request, generator.clone(), search, &settings.search),
        image_crew(request, generator, image_tool),
        LinkedInPreview::from_config(&settings.preview),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tasks::test_support::{RecordingGenerator, StaticImageTool, StaticSearch};
    use crate::domain::model::{ExpertiseLevel, Platform};
    use crate::domain::ports::ContentDelegate;

    fn request() -> GenerationRequest {
        GenerationRequest::new("solar energy", Platform::Twitter, ExpertiseLevel::Advanced)
    }

    #[tokio::test]
    async fn test_content_crew_runs_research_then_writing() {
        let generator = Arc::new(RecordingGenerator::replying("draft"));
        let search = Arc::new(StaticSearch::new(false));
        let crew = content_crew(
            &request(),
            generator.clone(),
            Some(search.clone()),
            &SearchConfig::default(),
        );
        assert_eq!(crew.len(), 2);

        let output = crew.kickoff(&request().inputs()).await.unwrap();
        assert_eq!(output, "draft");

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].0.starts_with("You are Researcher."));
        assert!(calls[1].0.starts_with("You are Writer."));
        // 寫作任務拿到研究任務的輸出
        assert!(calls[1].1.ends_with("This is the context you're working with:\ndraft"));
        assert!(!search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_content_crew_without_search() {
        let generator = Arc::new(RecordingGenerator::replying("draft"));
        let crew = content_crew(&request(), generator.clone(), None, &SearchConfig::default());

        crew.kickoff(&request().inputs()).await.unwrap();
        let calls = generator.calls.lock().unwrap();
        assert!(!calls[0].1.contains("search results"));
    }

    #[tokio::test]
    async fn test_image_crew_returns_marked_path() {
        let generator = Arc::new(RecordingGenerator::replying("gradient"));
        let tool = Arc::new(StaticImageTool::new("img/bg.png"));
        let crew = image_crew(&request(), generator, tool);

        let output = crew
            .kickoff(&request().inputs().with_content("post"))
            .await
            .unwrap();
        assert_eq!(output, "- img/bg.png");
    }

    #[tokio::test]
    async fn test_braced_topic_is_substituted_once() {
        let request = GenerationRequest::new(
            "the {social_platform} algorithm",
            Platform::Linkedin,
            ExpertiseLevel::Beginner,
        );
        let generator = Arc::new(RecordingGenerator::replying("draft"));

        content_crew(&request, generator.clone(), None, &SearchConfig::default())
            .kickoff(&request.inputs())
            .await
            .unwrap();
        image_crew(&request, generator.clone(), Arc::new(StaticImageTool::new("img/bg.png")))
            .kickoff(&request.inputs().with_content("post"))
            .await
            .unwrap();

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        let research = &calls[0].1;
        assert!(research.starts_with("Conduct thorough research on the topic the {social_platform} algorithm."));
        assert!(research.contains("insights about the {social_platform} algorithm."));
        assert!(calls[1].1.starts_with("Using the research findings, create content about the {social_platform} algorithm for linkedin."));
        assert!(calls[2].1.contains("post about the {social_platform} algorithm"));
        for (_, user) in calls.iter() {
            assert!(!user.contains("the linkedin algorithm"));
        }
    }
}

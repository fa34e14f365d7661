use crate::adapters::search::format_hits;
use crate::app::agents::RESEARCHER;
use crate::app::tasks::task_prompt;
use crate::catalog::domains::{preferred_domains, EXCLUDED_DOMAINS};
use crate::core::prompts::RESEARCH_EXPECTED_OUTPUT;
use crate::core::sequence::{ContextualTask, TaskContext};
use crate::domain::model::{SearchHit, SearchQuery};
use crate::domain::ports::{SearchTool, TextGenerator};
use crate::utils::error::Result;
use std::sync::Arc;

pub struct ResearchTask {
    generator: Arc<dyn TextGenerator>,
    search: Option<Arc<dyn SearchTool>>,
    description: String,
    num_results: usize,
    preferred_category: String,
}

impl ResearchTask {
    pub fn new(generator: Arc<dyn TextGenerator>, description: String) -> Self {
        Self {
            generator,
            search: None,
            description,
            num_results: 5,
            preferred_category: String::new(),
        }
    }

    pub fn with_search(
        mut self,
        search: Arc<dyn SearchTool>,
        num_results: usize,
        preferred_category: impl Into<String>,
    ) -> Self {
        self.search = Some(search);
        self.num_results = num_results;
        self.preferred_category = preferred_category.into();
        self
    }

    /// 先搜優先網域，再做一般搜尋；搜尋失敗只記 warn
    async fn gather_sources(&self, search: &dyn SearchTool, topic: &str) -> Vec<SearchHit> {
        let mut queries = Vec::new();
        let preferred = preferred_domains(&self.preferred_category);
        if !preferred.is_empty() {
            queries.push(SearchQuery::new(topic, self.num_results).restricted_to(preferred));
        }
        queries.push(SearchQuery::new(topic, self.num_results).excluding(EXCLUDED_DOMAINS));

        let mut hits: Vec<SearchHit> = Vec::new();
        for query in &queries {
            match search.search(query).await {
                Ok(found) => {
                    tracing::debug!("🔎 {} hits for '{}'", found.len(), query.to_query_string());
                    for hit in found {
                        if !hits.iter().any(|h| h.link == hit.link) {
                            hits.push(hit);
                        }
                    }
                }
                Err(e) => tracing::warn!("⚠️ Search failed, continuing without it: {}", e),
            }
        }
        hits
    }
}

#[async_trait::async_trait]
impl ContextualTask for ResearchTask {
    async fn execute(&self, context: &TaskContext) -> Result<String> {
        let mut prompt = task_prompt(&self.description, RESEARCH_EXPECTED_OUTPUT, context);

        if let Some(search) = &self.search {
            let hits = self.gather_sources(search.as_ref(), &context.inputs.topic).await;
            if hits.is_empty() {
                prompt.push_str("\n\nNo web search results were available; rely on your own knowledge.");
            } else {
                prompt.push_str("\n\nWeb search results:\n");
                prompt.push_str(&format_hits(&hits));
            }
        }

        self.generator
            .complete(&RESEARCHER.system_prompt(&context.inputs), &prompt)
            .await
    }

    fn name(&self) -> &str {
        "research"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tasks::test_support::{RecordingGenerator, StaticSearch};
    use crate::core::prompts::PromptAssembler;
    use crate::domain::model::{ExpertiseLevel, GenerationRequest, Platform};

    fn context() -> TaskContext {
        let request = GenerationRequest::new("solar energy", Platform::Linkedin, ExpertiseLevel::Beginner);
        TaskContext::new("t".to_string(), request.inputs())
    }

    #[tokio::test]
    async fn test_research_runs_preferred_then_general_search() {
        let generator = Arc::new(RecordingGenerator::replying("Key points"));
        let search = Arc::new(StaticSearch::new(false));
        let task = ResearchTask::new(generator.clone(), PromptAssembler::research_prompt("solar energy"))
            .with_search(search.clone(), 5, "trading");

        let output = task.execute(&context()).await.unwrap();
        assert_eq!(output, "Key points");

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert!(queries[0].contains("site:cmegroup.com OR"));
        assert!(queries[1].contains("-site:pinterest.com"));

        let calls = generator.calls.lock().unwrap();
        let (system, user) = &calls[0];
        assert!(system.starts_with("You are Researcher."));
        assert!(user.contains("Conduct thorough research on the topic solar energy."));
        // 兩次搜尋結果相同連結只留一筆
        assert_eq!(user.matches("https://reuters.com/solar").count(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_degrades_gracefully() {
        let generator = Arc::new(RecordingGenerator::replying("Key points"));
        let task = ResearchTask::new(generator.clone(), "Research solar energy.".to_string())
            .with_search(Arc::new(StaticSearch::new(true)), 5, "");

        assert!(task.execute(&context()).await.is_ok());
        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].1.contains("No web search results were available"));
    }

    #[tokio::test]
    async fn test_research_without_search_tool() {
        let generator = Arc::new(RecordingGenerator::replying("Key points"));
        let task = ResearchTask::new(generator.clone(), "Research solar energy.".to_string());

        task.execute(&context()).await.unwrap();
        let calls = generator.calls.lock().unwrap();
        assert!(!calls[0].1.contains("search results"));
    }
}

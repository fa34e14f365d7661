use crate::domain::model::TaskInputs;
use crate::domain::ports::ContentDelegate;
use crate::utils::error::{CrewError, Result};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 單一任務的執行結果
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task_name: String,
    pub output: String,
    pub duration: Duration,
}

/// 任務執行上下文，用於在任務間傳遞輸出
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub inputs: TaskInputs,
    pub previous_results: Vec<TaskResult>,
    pub execution_id: String,
}

impl TaskContext {
    pub fn new(execution_id: String, inputs: TaskInputs) -> Self {
        Self {
            inputs,
            previous_results: Vec::new(),
            execution_id,
        }
    }

    /// 獲取上一個任務的結果
    pub fn get_previous_result(&self) -> Option<&TaskResult> {
        self.previous_results.last()
    }

    pub fn get_result_by_name(&self, name: &str) -> Option<&TaskResult> {
        self.previous_results.iter().find(|r| r.task_name == name)
    }

    /// 把之前所有任務的輸出串成一段，附在下一個任務的提示詞後面
    pub fn previous_outputs(&self) -> Option<String> {
        if self.previous_results.is_empty() {
            return None;
        }
        let joined = self
            .previous_results
            .iter()
            .map(|r| r.output.trim())
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(joined)
    }

    pub fn add_result(&mut self, result: TaskResult) {
        self.previous_results.push(result);
    }
}

#[async_trait::async_trait]
pub trait ContextualTask: Send + Sync {
    async fn execute(&self, context: &TaskContext) -> Result<String>;

    fn name(&self) -> &str;

    /// 根據上下文決定是否執行
    fn should_execute(&self, _context: &TaskContext) -> bool {
        true
    }
}

/// 依序執行多個任務；任一任務失敗就整組中止
pub struct TaskSequence {
    tasks: Vec<Box<dyn ContextualTask>>,
    name: String,
}

impl TaskSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            name: name.into(),
        }
    }

    pub fn add_task(&mut self, task: Box<dyn ContextualTask>) {
        self.tasks.push(task);
    }

    pub fn with_task(mut self, task: Box<dyn ContextualTask>) -> Self {
        self.add_task(task);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub async fn execute_all(&self, inputs: &TaskInputs) -> Result<Vec<TaskResult>> {
        let execution_id = format!(
            "{}-{}",
            self.name,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let mut context = TaskContext::new(execution_id, inputs.clone());
        let mut results = Vec::new();

        tracing::debug!("🚀 Starting task sequence {}", context.execution_id);

        for task in &self.tasks {
            if !task.should_execute(&context) {
                tracing::info!("⏭️ Skipping task: {} (condition not met)", task.name());
                continue;
            }

            let start_time = Instant::now();
            tracing::info!("▶️ Running task: {}", task.name());

            match task.execute(&context).await {
                Ok(output) => {
                    let result = TaskResult {
                        task_name: task.name().to_string(),
                        output,
                        duration: start_time.elapsed(),
                    };

                    tracing::info!(
                        "✅ Task finished: {} ({} chars, duration: {:?})",
                        result.task_name,
                        result.output.len(),
                        result.duration
                    );

                    context.add_result(result.clone());
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!("❌ Task {} failed: {}", task.name(), e);
                    return Err(CrewError::generation(task.name(), e));
                }
            }
        }

        Ok(results)
    }

    /// 獲取執行摘要
    pub fn get_execution_summary(results: &[TaskResult]) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let total_duration: Duration = results.iter().map(|r| r.duration).sum();
        let task_names: Vec<serde_json::Value> = results
            .iter()
            .map(|r| serde_json::Value::String(r.task_name.clone()))
            .collect();

        summary.insert("total_tasks".to_string(), serde_json::Value::Number(results.len().into()));
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number((total_duration.as_millis() as u64).into()),
        );
        summary.insert("executed_tasks".to_string(), serde_json::Value::Array(task_names));

        summary
    }
}

#[async_trait::async_trait]
impl ContentDelegate for TaskSequence {
    async fn kickoff(&self, inputs: &TaskInputs) -> Result<String> {
        let mut results = self.execute_all(inputs).await?;
        tracing::debug!(
            "📊 Sequence summary: {:?}",
            Self::get_execution_summary(&results)
        );
        results
            .pop()
            .map(|r| r.output)
            .ok_or_else(|| CrewError::generation(self.name.clone(), "no task produced output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ExpertiseLevel, GenerationRequest, Platform};
    use std::sync::{Arc, Mutex};

    struct MockTask {
        name: String,
        output: String,
        should_execute: bool,
        fail: bool,
        seen_context: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl MockTask {
        fn new(name: &str, output: &str) -> Self {
            Self {
                name: name.to_string(),
                output: output.to_string(),
                should_execute: true,
                fail: false,
                seen_context: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn with_execution_condition(mut self, should_execute: bool) -> Self {
            self.should_execute = should_execute;
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn recorder(&self) -> Arc<Mutex<Vec<Option<String>>>> {
            Arc::clone(&self.seen_context)
        }
    }

    #[async_trait::async_trait]
    impl ContextualTask for MockTask {
        async fn execute(&self, context: &TaskContext) -> Result<String> {
            self.seen_context.lock().unwrap().push(context.previous_outputs());
            if self.fail {
                return Err(CrewError::SearchError {
                    message: "service unavailable".to_string(),
                });
            }
            Ok(format!("{} about {}", self.output, context.inputs.topic))
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn should_execute(&self, _context: &TaskContext) -> bool {
            self.should_execute
        }
    }

    fn inputs() -> TaskInputs {
        GenerationRequest::new("solar energy", Platform::Linkedin, ExpertiseLevel::Beginner).inputs()
    }

    #[tokio::test]
    async fn test_sequence_passes_previous_output_forward() {
        let research = MockTask::new("research", "notes");
        let writing = MockTask::new("writing", "post");
        let writing_seen = writing.recorder();

        let sequence = TaskSequence::new("content")
            .with_task(Box::new(research))
            .with_task(Box::new(writing));

        let results = sequence.execute_all(&inputs()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].task_name, "research");
        assert_eq!(results[1].task_name, "writing");
        assert_eq!(
            writing_seen.lock().unwrap().as_slice(),
            &[Some("notes about solar energy".to_string())]
        );
    }

    #[tokio::test]
    async fn test_sequence_conditional_execution() {
        let sequence = TaskSequence::new("conditional")
            .with_task(Box::new(MockTask::new("first", "a")))
            .with_task(Box::new(MockTask::new("second", "b").with_execution_condition(false)))
            .with_task(Box::new(MockTask::new("third", "c")));

        let results = sequence.execute_all(&inputs()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].task_name, "first");
        assert_eq!(results[1].task_name, "third");
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_tasks() {
        let last = MockTask::new("writing", "post");
        let last_seen = last.recorder();

        let sequence = TaskSequence::new("content")
            .with_task(Box::new(MockTask::new("research", "notes").failing()))
            .with_task(Box::new(last));

        let err = sequence.kickoff(&inputs()).await.unwrap_err();

        assert!(matches!(err, CrewError::GenerationError { ref stage, .. } if stage == "research"));
        assert!(last_seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_kickoff_returns_last_output() {
        let sequence = TaskSequence::new("content")
            .with_task(Box::new(MockTask::new("research", "notes")))
            .with_task(Box::new(MockTask::new("writing", "post")));

        assert_eq!(sequence.kickoff(&inputs()).await.unwrap(), "post about solar energy");
    }

    #[tokio::test]
    async fn test_kickoff_without_tasks_is_an_error() {
        let sequence = TaskSequence::new("empty");
        assert!(sequence.is_empty());
        assert!(sequence.kickoff(&inputs()).await.is_err());
    }

    #[test]
    fn test_execution_summary() {
        let results = vec![
            TaskResult {
                task_name: "research".to_string(),
                output: "notes".to_string(),
                duration: Duration::from_millis(100),
            },
            TaskResult {
                task_name: "writing".to_string(),
                output: "post".to_string(),
                duration: Duration::from_millis(200),
            },
        ];

        let summary = TaskSequence::get_execution_summary(&results);

        assert_eq!(summary.get("total_tasks").unwrap(), &serde_json::Value::Number(2.into()));
        assert_eq!(
            summary.get("total_duration_ms").unwrap(),
            &serde_json::Value::Number(300.into())
        );
        let executed = summary.get("executed_tasks").unwrap().as_array().unwrap();
        assert_eq!(executed[0], serde_json::Value::String("research".to_string()));
    }

    #[test]
    fn test_context_lookup_by_name() {
        let mut context = TaskContext::new("test".to_string(), inputs());
        assert!(context.previous_outputs().is_none());

        context.add_result(TaskResult {
            task_name: "research".to_string(),
            output: " notes \n".to_string(),
            duration: Duration::from_millis(5),
        });

        assert_eq!(context.get_result_by_name("research").unwrap().output, " notes \n");
        assert_eq!(context.get_previous_result().unwrap().task_name, "research");
        assert_eq!(context.previous_outputs().as_deref(), Some("notes"));
        assert!(context.get_result_by_name("writing").is_none());
    }
}

pub mod image_design;
pub mod research;
pub mod writing;

pub use image_design::ImageDesignTask;
pub use research::ResearchTask;
pub use writing::WritingTask;

use crate::core::prompts::interpolate;
use crate::core::sequence::TaskContext;

/// 任務描述 + 期望輸出 + 前面任務的輸出，組成 user prompt。
///
/// `description` 已由 `PromptAssembler` 填好，原樣使用；只有期望輸出的模板在這裡填值。
pub(crate) fn task_prompt(description: &str, expected_output: &str, context: &TaskContext) -> String {
    let mut prompt = format!(
        "{}\n\nThis is the expected criteria for your final answer: {}",
        description,
        interpolate(expected_output, &context.inputs.as_map())
    );

    if let Some(previous) = context.previous_outputs() {
        prompt.push_str("\n\nThis is the context you're working with:\n");
        prompt.push_str(&previous);
    }

    prompt
}

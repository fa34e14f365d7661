use crate::domain::model::{SearchHit, SearchQuery, TaskInputs};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// 文字生成服務（chat completion）
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>>;
}

/// 圖片工具回傳的是文字：成功時為檔案路徑，失敗時為錯誤描述
#[async_trait]
pub trait ImageTool: Send + Sync {
    async fn run(&self, prompt: &str, filename: Option<&str>) -> String;
}

/// 一組依序執行的生成任務，回傳最後一個任務的文字輸出
#[async_trait]
pub trait ContentDelegate: Send + Sync {
    async fn kickoff(&self, inputs: &TaskInputs) -> Result<String>;
}

pub trait PreviewRenderer: Send + Sync {
    fn render_preview(&self, content: &str, image_path: Option<&Path>) -> Result<String>;
}

use crate::config::toml_config::ImageConfig;
use crate::domain::ports::ImageTool;
use crate::utils::error::{CrewError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DOWNLOAD_FAILED: &str = "Failed to download image";

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// 產生背景圖並存到本地目錄
#[derive(Debug, Clone)]
pub struct ImageGenerationTool {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    size: String,
    quality: String,
    output_dir: PathBuf,
}

impl ImageGenerationTool {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let output_dir = PathBuf::from(&config.output_dir);
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
            output_dir,
        })
    }

    pub fn default_filename() -> String {
        format!("carousel_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    }

    async fn request_image_url(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/images/generations", self.api_base);
        let request = ImageRequest {
            model: &self.model,
            prompt,
            size: &self.size,
            quality: &self.quality,
            n: 1,
        };

        tracing::debug!("Requesting image from: {} (model: {})", url, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CrewError::ImageError {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body: ImageResponse = response.json().await?;
        body.data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| CrewError::ImageError {
                message: "response contained no image url".to_string(),
            })
    }

    /// 非 200 回應時回傳 `None`
    async fn download(&self, image_url: &str, filename: &str) -> Result<Option<PathBuf>> {
        let response = self.client.get(image_url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            tracing::warn!("⚠️ Image download returned {}", response.status());
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        let filepath = self.output_dir.join(filename);
        tokio::fs::write(&filepath, &bytes).await?;
        Ok(Some(filepath))
    }

    pub async fn generate(&self, prompt: &str, filename: Option<&str>) -> Result<Option<PathBuf>> {
        let image_url = self.request_image_url(prompt).await?;
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(Self::default_filename);
        self.download(&image_url, &filename).await
    }
}

#[async_trait]
impl ImageTool for ImageGenerationTool {
    async fn run(&self, prompt: &str, filename: Option<&str>) -> String {
        match self.generate(prompt, filename).await {
            Ok(Some(path)) => path.display().to_string(),
            Ok(None) => DOWNLOAD_FAILED.to_string(),
            Err(e) => format!("Error generating image: {}", e),
        }
    }
}

//! LinkedIn 貼文預覽。
//!
//! 產生一張模擬動態消息卡片的靜態 HTML（頭像、名稱、日期、內文、圖片、互動列），
//! 圖片以 base64 data URI 內嵌，輸出的 HTML 不依賴任何外部檔案。
//! 需要 PNG 時見 [`capture`]。

pub mod capture;

use crate::config::toml_config::PreviewConfig;
use crate::domain::ports::PreviewRenderer;
use crate::utils::error::{PreviewError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use maud::{html, Markup, DOCTYPE};
use std::path::{Path, PathBuf};

const FEED_BACKGROUND: &str = "#f3f2ef";

#[derive(Debug, Clone)]
pub struct LinkedInPreview {
    author_name: String,
    author_initials: String,
}

impl Default for LinkedInPreview {
    fn default() -> Self {
        Self::from_config(&PreviewConfig::default())
    }
}

impl LinkedInPreview {
    pub fn new(author_name: impl Into<String>, author_initials: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_initials: author_initials.into(),
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(&config.author_name, &config.author_initials)
    }

    /// 讀檔並轉成 `data:image/<ext>;base64,...`
    pub fn embed_image(path: &Path) -> std::result::Result<String, PreviewError> {
        let bytes = std::fs::read(path).map_err(|source| PreviewError::ImageEmbed {
            path: path.display().to_string(),
            source,
        })?;
        let img_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "png".to_string());
        Ok(format!("data:image/{};base64,{}", img_type, STANDARD.encode(bytes)))
    }

    /// 不存在的路徑直接略過
    pub fn embed_images(paths: &[PathBuf]) -> std::result::Result<Vec<String>, PreviewError> {
        let mut images = Vec::new();
        for path in paths {
            if !path.is_file() {
                tracing::debug!("Skipping missing preview image: {}", path.display());
                continue;
            }
            images.push(Self::embed_image(path)?);
        }
        Ok(images)
    }

    pub fn render_card(&self, text: &str, images: &[String], timestamp: &str) -> Markup {
        let columns = images.len().min(2);

        html! {
            div style="max-width: 552px; margin: 20px auto; font-family: -apple-system,system-ui,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',Arial,sans-serif; border: 1px solid #e0e0e0; border-radius: 8px; background: white; padding: 12px;" {
                // Profile header
                div style="display: flex; align-items: center; margin-bottom: 12px;" {
                    div style="width: 48px; height: 48px; border-radius: 50%; background: #0a66c2; color: white; display: flex; align-items: center; justify-content: center; font-weight: bold;" {
                        (self.author_initials)
                    }
                    div style="margin-left: 8px;" {
                        div style="font-weight: 600; color: rgba(0,0,0,0.9);" { (self.author_name) }
                        div style="font-size: 14px; color: rgba(0,0,0,0.6);" { (timestamp) }
                    }
                }

                div style="color: rgba(0,0,0,0.9); font-size: 14px; margin: 12px 0; white-space: pre-wrap;" { (text) }

                @if let [single] = images {
                    div style="margin: 12px -12px;" {
                        img src=(single) style="width: 100%; max-height: 400px; object-fit: cover;";
                    }
                } @else if !images.is_empty() {
                    div style="margin: 12px -12px;" {
                        div style={ "display: grid; grid-template-columns: repeat(" (columns) ", 1fr); gap: 2px;" } {
                            @for image in images {
                                img src=(image) style="width: 100%; height: 250px; object-fit: cover;";
                            }
                        }
                    }
                }

                // Interaction row
                div style="display: flex; justify-content: space-around; margin-top: 12px; padding-top: 12px; border-top: 1px solid #e0e0e0;" {
                    div style="color: rgba(0,0,0,0.6); font-size: 14px;" { "👍 Like" }
                    div style="color: rgba(0,0,0,0.6); font-size: 14px;" { "💬 Comment" }
                    div style="color: rgba(0,0,0,0.6); font-size: 14px;" { "↗️ Share" }
                }
            }
        }
    }

    pub fn generate_preview_at(&self, text: &str, image_paths: &[PathBuf], timestamp: &str) -> Result<String> {
        let images = Self::embed_images(image_paths)?;
        Ok(self.render_card(text, &images, timestamp).into_string())
    }

    pub fn generate_preview(&self, text: &str, image_paths: &[PathBuf]) -> Result<String> {
        let timestamp = chrono::Local::now().format("%b %d, %Y").to_string();
        self.generate_preview_at(text, image_paths, &timestamp)
    }

    /// 包成完整頁面，底色模擬動態消息
    pub fn render_page(card_html: &str) -> String {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8";
                }
                body style={ "background-color: " (FEED_BACKGROUND) "; padding: 20px;" } {
                    (maud::PreEscaped(card_html))
                }
            }
        }
        .into_string()
    }
}

impl PreviewRenderer for LinkedInPreview {
    fn render_preview(&self, content: &str, image_path: Option<&Path>) -> Result<String> {
        let paths: Vec<PathBuf> = image_path.map(Path::to_path_buf).into_iter().collect();
        self.generate_preview(content, &paths)
    }
}

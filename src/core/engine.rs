use crate::domain::model::{GenerationRequest, GenerationResult, Platform};
use crate::domain::ports::{ContentDelegate, PreviewRenderer};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 一次生成的完整輸出；只有 LinkedIn 會帶預覽
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    pub preview_html: Option<String>,
}

/// 研究 → 寫作 → 圖片，三個階段依序執行
pub struct ContentEngine<C: ContentDelegate, I: ContentDelegate, P: PreviewRenderer> {
    content_delegate: C,
    image_delegate: I,
    preview: P,
}

impl<C: ContentDelegate, I: ContentDelegate, P: PreviewRenderer> ContentEngine<C, I, P> {
    pub fn new(content_delegate: C, image_delegate: I, preview: P) -> Self {
        Self {
            content_delegate,
            image_delegate,
            preview,
        }
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        tracing::info!(
            "🚀 Generating {} content about '{}' for a {} audience",
            request.platform.label(),
            request.topic,
            request.expertise
        );

        let inputs = request.inputs();

        // Research + writing
        let content = self.content_delegate.kickoff(&inputs).await?;
        tracing::info!("📝 Content ready ({} chars)", content.len());

        // Image design
        let image_output = self
            .image_delegate
            .kickoff(&inputs.with_content(content.clone()))
            .await?;
        let image_path = existing_image_path(&image_output);
        match &image_path {
            Some(path) => tracing::info!("🖼️ Image saved to: {}", path.display()),
            None => tracing::warn!(
                "⚠️ Image stage returned no usable path ({}), continuing text-only",
                image_output.trim()
            ),
        }

        let result = GenerationResult {
            content,
            image_path,
        };

        let preview_html = if request.platform == Platform::Linkedin {
            tracing::debug!("Rendering LinkedIn preview");
            Some(
                self.preview
                    .render_preview(&result.content, result.image_path.as_deref())?,
            )
        } else {
            None
        };

        Ok(GenerationOutcome {
            result,
            preview_html,
        })
    }
}

/// 去掉前後空白與開頭的 "- " 清單符號
pub fn extract_image_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let path = trimmed.strip_prefix("- ").unwrap_or(trimmed);
    PathBuf::from(path)
}

/// 只有檔案確實存在才算有圖
pub fn existing_image_path(raw: &str) -> Option<PathBuf> {
    let path = extract_image_path(raw);
    if path.as_os_str().is_empty() || !path.is_file() {
        return None;
    }
    Some(path)
}

//! 用 headless Chrome 把預覽卡片截成 PNG。
//!
//! 流程：`Idle → TemplateRendered → BrowserLaunched → PageLoaded →
//! ElementCaptured → BrowserClosed`。瀏覽器啟動之後不論成功或失敗，
//! 都會先關閉瀏覽器再回傳；暫存的 HTML 檔在任何情況下都會刪除。

use crate::config::toml_config::PreviewConfig;
use crate::preview::LinkedInPreview;
use crate::utils::error::{CaptureStage, PreviewError, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// 以 inline style 定位卡片，模板改動時這裡要跟著改
pub const CARD_SELECTOR: &str = "div[style*='max-width: 552px']";

fn capture_error(stage: CaptureStage, err: impl Display) -> PreviewError {
    PreviewError::Capture {
        stage,
        message: err.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct PreviewCapture {
    preview: LinkedInPreview,
    window_size: (u32, u32),
    settle_delay: Duration,
    chrome_path: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
    selector: String,
}

impl PreviewCapture {
    pub fn new(preview: LinkedInPreview) -> Self {
        Self {
            preview,
            window_size: (800, 1000),
            settle_delay: Duration::from_secs(1),
            chrome_path: None,
            temp_dir: None,
            selector: CARD_SELECTOR.to_string(),
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        let mut capture = Self::new(LinkedInPreview::from_config(config))
            .with_window_size(config.window_width, config.window_height)
            .with_settle_delay(Duration::from_millis(config.settle_delay_ms));
        capture.chrome_path = config.chrome_path.as_ref().map(PathBuf::from);
        capture
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// 暫存 HTML 的目錄，預設為系統暫存目錄
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// 渲染預覽並截成 PNG，存到 `output_path`
    pub fn save_preview_as_png(
        &self,
        text: &str,
        image_paths: &[PathBuf],
        output_path: &Path,
    ) -> Result<PathBuf> {
        tracing::debug!(stage = %CaptureStage::Idle, "Capturing preview to {}", output_path.display());
        let card = self.preview.generate_preview(text, image_paths)?;
        let page = LinkedInPreview::render_page(&card);

        let mut builder = tempfile::Builder::new();
        builder.prefix("preview_").suffix(".html");
        let mut temp_html = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        temp_html.write_all(page.as_bytes())?;
        temp_html.flush()?;
        tracing::debug!(
            stage = %CaptureStage::TemplateRendered,
            "Preview page written to {}",
            temp_html.path().display()
        );

        let outcome = self.capture(temp_html.path(), output_path);

        if let Err(e) = temp_html.close() {
            tracing::warn!("⚠️ Failed to remove temporary preview file: {}", e);
        }

        match &outcome {
            Ok(path) => tracing::info!("📸 Preview saved to: {}", path.display()),
            Err(e) => tracing::error!("❌ Preview capture failed: {}", e),
        }
        outcome
    }

    fn launch_options(&self) -> std::result::Result<LaunchOptions<'static>, PreviewError> {
        LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some(self.window_size))
            .path(self.chrome_path.clone())
            .args(vec![OsStr::new("--hide-scrollbars")])
            .build()
            .map_err(|e| capture_error(CaptureStage::TemplateRendered, e))
    }

    fn capture(&self, html_path: &Path, output_path: &Path) -> Result<PathBuf> {
        let browser = Browser::new(self.launch_options()?)
            .map_err(|e| capture_error(CaptureStage::TemplateRendered, e))?;
        tracing::debug!(stage = %CaptureStage::BrowserLaunched, "Headless browser started");

        let outcome = self.capture_element(&browser, html_path, output_path);

        // Browser 的 Drop 會結束 Chrome 行程
        drop(browser);
        tracing::debug!(stage = %CaptureStage::BrowserClosed, "Headless browser closed");

        outcome
    }

    fn capture_element(&self, browser: &Browser, html_path: &Path, output_path: &Path) -> Result<PathBuf> {
        let tab = browser
            .new_tab()
            .map_err(|e| capture_error(CaptureStage::BrowserLaunched, e))?;

        let url = Url::from_file_path(html_path).map_err(|_| {
            capture_error(
                CaptureStage::BrowserLaunched,
                format!("not an absolute path: {}", html_path.display()),
            )
        })?;
        tab.navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| capture_error(CaptureStage::BrowserLaunched, e))?;

        // 等版面繪製完成
        std::thread::sleep(self.settle_delay);
        tracing::debug!(stage = %CaptureStage::PageLoaded, "Preview page loaded");

        let element = tab.find_element(&self.selector).map_err(|_| PreviewError::ElementNotFound {
            selector: self.selector.clone(),
        })?;
        let png = element
            .capture_screenshot(CaptureScreenshotFormatOption::Png)
            .map_err(|e| capture_error(CaptureStage::PageLoaded, e))?;
        tracing::debug!(stage = %CaptureStage::ElementCaptured, "Captured {} bytes", png.len());

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, png)?;
        Ok(output_path.to_path_buf())
    }
}

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Generation failed at {stage}: {details}")]
    GenerationError { stage: String, details: String },

    #[error("Search request failed: {message}")]
    SearchError { message: String },

    #[error("Image generation failed: {message}")]
    ImageError { message: String },

    #[error(transparent)]
    PreviewError(#[from] PreviewError),
}

/// 預覽截圖流程的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Idle,
    TemplateRendered,
    BrowserLaunched,
    PageLoaded,
    ElementCaptured,
    BrowserClosed,
}

impl fmt::Display for CaptureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureStage::Idle => "idle",
            CaptureStage::TemplateRendered => "template_rendered",
            CaptureStage::BrowserLaunched => "browser_launched",
            CaptureStage::PageLoaded => "page_loaded",
            CaptureStage::ElementCaptured => "element_captured",
            CaptureStage::BrowserClosed => "browser_closed",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to embed image {path}: {source}")]
    ImageEmbed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Preview element not found for selector `{selector}`")]
    ElementNotFound { selector: String },

    #[error("Preview capture failed after {stage}: {message}")]
    Capture { stage: CaptureStage, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrewError {
    pub fn generation(stage: impl Into<String>, details: impl fmt::Display) -> Self {
        CrewError::GenerationError {
            stage: stage.into(),
            details: details.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CrewError::ConfigError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CrewError::ConfigError { .. } | CrewError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
            CrewError::ApiError(_)
            | CrewError::GenerationError { .. }
            | CrewError::SearchError { .. }
            | CrewError::ImageError { .. } => ErrorSeverity::Medium,
            CrewError::PreviewError(_) => ErrorSeverity::Low,
            CrewError::IoError(_) => ErrorSeverity::High,
        }
    }

    /// 給使用者看的扁平化訊息，不帶內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            CrewError::ConfigError { .. } | CrewError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            CrewError::PreviewError(_) => "Content was generated, but the preview could not be captured".to_string(),
            _ => format!("Error generating content: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CrewError::ConfigError { .. } | CrewError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            CrewError::ApiError(_) | CrewError::GenerationError { .. } => {
                "Check API credentials and network connectivity, then run again"
            }
            CrewError::SearchError { .. } => "Check SERPER_API_KEY and the search endpoint",
            CrewError::ImageError { .. } => "Check OPENAI_API_KEY and the image output directory",
            CrewError::PreviewError(_) => "Make sure Chrome or Chromium is installed",
            CrewError::IoError(_) => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CrewError>;

pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::domain::model::{ExpertiseLevel, GenerationRequest, Platform};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "content-crew"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Research, write and illustrate a social media post")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = "trading crude oil futures"))]
    pub topic: String,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = Platform::Linkedin))]
    pub platform: Platform,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = ExpertiseLevel::Beginner))]
    pub expertise: ExpertiseLevel,

    /// Path to TOML configuration file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<PathBuf>,

    /// Override the output directory from the config file
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_dir: Option<String>,

    /// Also rasterize the LinkedIn preview to this PNG file
    #[cfg_attr(feature = "cli", arg(long))]
    pub preview_png: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub log_json: bool,
}

impl CliConfig {
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.topic.trim(), self.platform, self.expertise)
    }

    /// 載入設定檔（沒給就用預設值），再套用命令列覆蓋
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(output_dir) = &self.output_dir {
            tracing::info!("🔧 Output directory overridden to: {}", output_dir);
            settings.output.directory = output_dir.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("topic", &self.topic)?;
        if let Some(png) = &self.preview_png {
            validation::validate_path("preview_png", png)?;
            validation::validate_file_extension("preview_png", png, &["png"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliConfig {
        CliConfig {
            topic: "  solar energy ".to_string(),
            platform: Platform::Twitter,
            expertise: ExpertiseLevel::Intermediate,
            config: None,
            output_dir: Some("./custom-out".to_string()),
            preview_png: None,
            verbose: false,
            log_json: false,
        }
    }

    #[test]
    fn test_request_from_cli() {
        let request = cli().request();
        assert_eq!(request.topic, "solar energy");
        assert_eq!(request.platform, Platform::Twitter);
        assert_eq!(request.expertise, ExpertiseLevel::Intermediate);
    }

    #[test]
    fn test_cli_validation() {
        assert!(cli().validate().is_ok());

        let mut blank = cli();
        blank.topic = "   ".to_string();
        assert!(blank.validate().is_err());

        let mut bad_png = cli();
        bad_png.preview_png = Some("preview.jpeg".to_string());
        assert!(bad_png.validate().is_err());
    }

    #[test]
    fn test_load_settings_applies_overrides() {
        let settings = cli().load_settings().unwrap();
        assert_eq!(settings.output.directory, "./custom-out");
    }

    #[test]
    fn test_load_settings_reports_missing_file() {
        let mut config = cli();
        config.config = Some(PathBuf::from("/definitely/missing/content-crew.toml"));
        assert!(config.load_settings().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_clap_rejects_unknown_platform() {
        let parsed = CliConfig::try_parse_from(["content-crew", "--platform", "myspace"]);
        assert!(parsed.is_err());

        let parsed =
            CliConfig::try_parse_from(["content-crew", "--platform", "instagram", "--expertise", "advanced"])
                .unwrap();
        assert_eq!(parsed.platform, Platform::Instagram);
        assert_eq!(parsed.expertise, ExpertiseLevel::Advanced);
        assert_eq!(parsed.topic, "trading crude oil futures");
    }
}

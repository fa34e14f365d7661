use crate::catalog::domains;
use crate::utils::error::{CrewError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub image: ImageConfig,
    pub preview: PreviewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
    pub num_results: usize,
    /// 優先網域的類別，見 `catalog::domains`
    pub preferred_category: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://google.serper.dev/search".to_string(),
            api_key: std::env::var("SERPER_API_KEY").unwrap_or_default(),
            num_results: 5,
            preferred_category: "trading".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub size: String,
    pub quality: String,
    pub output_dir: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            output_dir: "img".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub author_name: String,
    pub author_initials: String,
    pub window_width: u32,
    pub window_height: u32,
    pub settle_delay_ms: u64,
    pub chrome_path: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            author_name: "DualSharks".to_string(),
            author_initials: "DS".to_string(),
            window_width: 800,
            window_height: 1000,
            settle_delay_ms: 1000,
            chrome_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CrewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| CrewError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("llm.api_base", &self.llm.api_base)?;
        validation::validate_non_empty_string("llm.model", &self.llm.model)?;
        validation::validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds as usize, 1)?;
        if let Some(temperature) = self.llm.temperature {
            validation::validate_range("llm.temperature", temperature, 0.0, 2.0)?;
        }

        if self.search.enabled {
            validation::validate_url("search.endpoint", &self.search.endpoint)?;
            validation::validate_positive_number("search.num_results", self.search.num_results, 1)?;
            let category = self.search.preferred_category.as_str();
            if !category.is_empty() && !domains::CATEGORIES.contains(&category) {
                return Err(CrewError::InvalidConfigValueError {
                    field: "search.preferred_category".to_string(),
                    value: category.to_string(),
                    reason: format!(
                        "Unknown category. Valid categories: {}",
                        domains::CATEGORIES.join(", ")
                    ),
                });
            }
        }

        validation::validate_url("image.api_base", &self.image.api_base)?;
        validation::validate_non_empty_string("image.model", &self.image.model)?;
        validation::validate_path("image.output_dir", &self.image.output_dir)?;

        validation::validate_range("preview.settle_delay_ms", self.preview.settle_delay_ms, 0, 30_000)?;
        validation::validate_positive_number("preview.window_width", self.preview.window_width as usize, 1)?;
        validation::validate_positive_number("preview.window_height", self.preview.window_height as usize, 1)?;

        validation::validate_path("output.directory", &self.output.directory)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml_content = r#"
[llm]
model = "gpt-4o"
temperature = 0.4

[preview]
author_name = "Acme Energy"
author_initials = "AE"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.api_base, "https://api.openai.com/v1");
        assert_eq!(config.image.model, "dall-e-3");
        assert_eq!(config.image.size, "1024x1024");
        assert_eq!(config.search.num_results, 5);
        assert_eq!(config.preview.author_initials, "AE");
        assert_eq!(config.preview.settle_delay_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONTENT_CREW_TEST_LLM_KEY", "sk-test-123");

        let toml_content = r#"
[llm]
api_key = "${CONTENT_CREW_TEST_LLM_KEY}"

[search]
api_key = "${CONTENT_CREW_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.llm.api_key, "sk-test-123");
        assert_eq!(config.search.api_key, "${CONTENT_CREW_TEST_UNSET_VAR}");

        std::env::remove_var("CONTENT_CREW_TEST_LLM_KEY");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_base = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[search]
preferred_category = "gardening"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[search]
enabled = false
preferred_category = "gardening"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[llm\nmodel = ").unwrap_err();
        assert!(matches!(err, CrewError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[output]
directory = "./generated"

[image]
output_dir = "./generated/img"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.directory, "./generated");
        assert_eq!(config.image.output_dir, "./generated/img");
    }
}

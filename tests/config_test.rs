use content_crew::utils::validation::Validate;
use content_crew::TomlConfig;
use std::io::Write;
use tempfile::NamedTempFile;

const EXAMPLE: &str = include_str!("../content-crew.example.toml");

#[test]
fn test_example_config_is_valid() {
    let config = TomlConfig::from_toml_str(EXAMPLE).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.image.model, "dall-e-3");
    assert_eq!(config.search.preferred_category, "trading");
    assert_eq!(config.preview.author_initials, "DS");
    assert!(config.preview.chrome_path.is_none());
}

#[test]
fn test_example_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.output.directory, "output");
    assert_eq!(config.search.num_results, 5);
}

#[test]
fn test_env_placeholder_in_file() {
    std::env::set_var("CONTENT_CREW_IT_MODEL", "gpt-from-env");
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[llm]\nmodel = \"${{CONTENT_CREW_IT_MODEL}}\"\napi_key = \"${{CONTENT_CREW_IT_UNSET}}\"\n").unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.llm.model, "gpt-from-env");
    assert_eq!(config.llm.api_key, "${CONTENT_CREW_IT_UNSET}");
}

use crate::utils::error::CrewError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 支援的社群平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Twitter,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linkedin, Platform::Twitter, Platform::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrewError::InvalidConfigValueError {
                field: "platform".to_string(),
                value: s.to_string(),
                reason: "Expected one of: linkedin, twitter, instagram".to_string(),
            })
    }
}

/// 目標讀者的專業程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 3] = [
        ExpertiseLevel::Beginner,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpertiseLevel {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpertiseLevel::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrewError::InvalidConfigValueError {
                field: "expertise".to_string(),
                value: s.to_string(),
                reason: "Expected one of: beginner, intermediate, advanced".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub platform: Platform,
    pub expertise: ExpertiseLevel,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, platform: Platform, expertise: ExpertiseLevel) -> Self {
        Self {
            topic: topic.into(),
            platform,
            expertise,
        }
    }

    pub fn inputs(&self) -> TaskInputs {
        TaskInputs {
            topic: self.topic.clone(),
            expertise_level: self.expertise.as_str().to_string(),
            social_platform: self.platform.as_str().to_string(),
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub content: String,
    pub image_path: Option<PathBuf>,
}

/// 每個任務都看得到的輸入值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInputs {
    pub topic: String,
    pub expertise_level: String,
    pub social_platform: String,
    pub content: Option<String>,
}

impl TaskInputs {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn as_map(&self) -> HashMap<&'static str, &str> {
        let mut map = HashMap::new();
        map.insert("topic", self.topic.as_str());
        map.insert("expertise_level", self.expertise_level.as_str());
        map.insert("social_platform", self.social_platform.as_str());
        if let Some(content) = &self.content {
            map.insert("content", content.as_str());
        }
        map
    }
}

/// 搜尋結果的一筆
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub num_results: usize,
    pub sites: Vec<String>,
    pub exclude: Vec<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, num_results: usize) -> Self {
        Self {
            query: query.into(),
            num_results,
            sites: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn restricted_to(mut self, sites: &[&str]) -> Self {
        self.sites = sites.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn excluding(mut self, domains: &[&str]) -> Self {
        self.exclude = domains.iter().map(|s| s.to_string()).collect();
        self
    }

    /// 組成搜尋字串，例如 `oil site:a.com OR site:b.com -site:c.com`
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![self.query.clone()];
        if !self.sites.is_empty() {
            let sites: Vec<String> = self.sites.iter().map(|s| format!("site:{}", s)).collect();
            parts.push(sites.join(" OR "));
        }
        for domain in &self.exclude {
            parts.push(format!("-site:{}", domain));
        }
        parts.join(" ")
    }
}

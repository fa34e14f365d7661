use crate::config::toml_config::SearchConfig;
use crate::domain::model::{SearchHit, SearchQuery};
use crate::domain::ports::SearchTool;
use crate::utils::error::{CrewError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

/// Serper 相容的網頁搜尋
#[derive(Debug, Clone)]
pub struct SerperClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SerperClient {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl SearchTool for SerperClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let q = query.to_query_string();
        tracing::debug!("Searching: {}", q);

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": q, "num": query.num_results }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CrewError::SearchError {
                message: format!("HTTP {}", response.status().as_u16()),
            });
        }

        let body: SerperResponse = response.json().await?;
        let mut hits = body.organic;
        hits.truncate(query.num_results);
        Ok(hits)
    }
}

/// 把搜尋結果排成給 LLM 看的條列
pub fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            if hit.snippet.is_empty() {
                format!("- {} ({})", hit.title, hit.link)
            } else {
                format!("- {} ({})\n  {}", hit.title, hit.link, hit.snippet)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

use crate::adapters::parse_document;
use crate::domain::ports::DocumentSource;
use crate::utils::error::{CvError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// GETs `{base_url}/{name}.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn document_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Value> {
        let url = self.document_url(name);
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(&url).send().await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(CvError::DocumentLoad {
                name: name.to_string(),
                message: format!("HTTP status: {}", response.status().as_u16()),
            });
        }

        let body = response.bytes().await?;
        parse_document(name, &body)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

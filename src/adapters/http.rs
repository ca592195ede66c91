use crate::config::TargetSettings;
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct HttpPageFetcher {
    client: Client,
    url: String,
}

impl HttpPageFetcher {
    pub fn new(target: &TargetSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(target.timeout_seconds))
            .user_agent(target.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            url: target.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self) -> Result<String> {
        tracing::debug!("Making page request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Page response status: {}", response.status());
        let body = response.error_for_status()?.text().await?;

        tracing::debug!("Page body: {} bytes", body.len());
        Ok(body)
    }
}

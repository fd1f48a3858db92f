use anyhow::{Context as _, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{ModelInfo, RecommendationResponse, StudentProfile, StudentStatistics};
use crate::app::ApiConfig;
use crate::constants::RECOMMENDATIONS_PATH;

/// Read-side client for the recommendation service
pub struct RecommendationClient {
    client: Client,
    api: ApiConfig,
}

impl RecommendationClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(api.timeout()).build()?,
            api: api.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        self.api
            .endpoint(&format!("{}/{}", RECOMMENDATIONS_PATH, path))
    }

    /// Personalized lessons to study next
    pub async fn recommendations(
        &self,
        student_id: &str,
        max_recommendations: usize,
    ) -> Result<RecommendationResponse> {
        let url = self.url(&format!("student/{}/recommendations", student_id));
        let response = self
            .client
            .post(&url)
            .json(&json!({ "max_recommendations": max_recommendations }))
            .send()
            .await
            .with_context(|| format!("Failed to reach recommendation service at {}", url))?;
        decode(response).await
    }

    pub async fn profile(&self, student_id: &str) -> Result<StudentProfile> {
        self.get(&format!("student/{}/profile", student_id)).await
    }

    pub async fn statistics(&self, student_id: &str) -> Result<StudentStatistics> {
        self.get(&format!("student/{}/statistics", student_id)).await
    }

    pub async fn model_info(&self) -> Result<ModelInfo> {
        self.get("model-info").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach recommendation service at {}", url))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Recommendation service error ({}): {}", status, error_text);
    }
    response
        .json()
        .await
        .context("Unexpected response from recommendation service")
}

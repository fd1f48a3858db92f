use std::time::Duration;

use crate::app::ApiConfig;
use crate::constants::{HEALTH_CHECK_TIMEOUT_MS, RECOMMENDATIONS_PATH};

/// Check whether the backend answers at all
pub async fn is_backend_reachable(api: &ApiConfig) -> bool {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS))
        .build();

    if let Ok(client) = client {
        // model-info is a cheap read that needs no student id
        let url = api.endpoint(&format!("{}/model-info", RECOMMENDATIONS_PATH));
        if let Ok(resp) = client.get(&url).send().await {
            return resp.status().is_success();
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[tokio::test]
    async fn test_reachable_backend() {
        let (base, request) = serve_once(200, r#"{"gcn_available":false}"#).await;
        let api = ApiConfig {
            base_url: base,
            timeout_secs: 5,
        };

        assert!(is_backend_reachable(&api).await);
        assert_eq!(request.await.unwrap().path, "/api/recommendations/model-info");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // port 9 (discard) is not expected to run an HTTP server
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_secs: 1,
        };
        assert!(!is_backend_reachable(&api).await);
    }
}

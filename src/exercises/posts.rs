use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches placeholder posts as raw JSON.
#[derive(Debug, Clone)]
pub struct PostClient {
    client: Client,
    base_url: String,
}

impl Default for PostClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PostClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// One GET to `{base_url}/posts/{id}`. Non-2xx statuses are errors; nothing is retried.
    pub async fn fetch_post(&self, id: u64) -> Result<Value, FetchError> {
        let url = format!("{}/posts/{id}", self.base_url);
        let wrap = |source| FetchError::Request {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?;
        let post = response.json::<Value>().await.map_err(wrap)?;
        tracing::debug!(%url, "fetched post");
        Ok(post)
    }
}

pub async fn fetch_post(id: u64) -> Result<Value, FetchError> {
    PostClient::default().fetch_post(id).await
}

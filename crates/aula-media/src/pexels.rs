//! Pexels image search provider.
//!
//! Lesson pages use this to pull an illustration for a unit. No usable
//! result is `Ok(None)` so callers can fall back to a placeholder
//! without treating it as a failure.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use aula_core::traits::{ImageHit, ImageQuery, ImageSource};

use crate::error::MediaError;

const DEFAULT_BASE_URL: &str = "https://api.pexels.com";
const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Pexels API provider.
pub struct PexelsImages {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl PexelsImages {
    pub fn new(api_key: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    #[serde(default)]
    photographer: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    src: Option<PhotoSrc>,
}

#[derive(Deserialize, Default)]
struct PhotoSrc {
    #[serde(default)]
    large2x: Option<String>,
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    medium: Option<String>,
}

impl PhotoSrc {
    /// Largest-first source preference.
    fn best_url(self) -> Option<String> {
        self.large2x.or(self.large).or(self.original).or(self.medium)
    }
}

#[async_trait]
impl ImageSource for PexelsImages {
    fn name(&self) -> &str {
        "pexels"
    }

    #[instrument(skip(self, query), fields(q = %query.query))]
    async fn search(&self, query: &ImageQuery) -> anyhow::Result<Option<ImageHit>> {
        let per_page = query.per_page.to_string();
        let response = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query.query.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", query.orientation.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    MediaError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::AuthenticationFailed(body).into());
        }
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(MediaError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::ApiError { status, message }.into());
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| MediaError::ApiError {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;

        let Some(photo) = parsed.photos.into_iter().next() else {
            return Ok(None);
        };

        let Some(url) = photo.src.unwrap_or_default().best_url() else {
            return Ok(None);
        };

        let photographer = photo.photographer.unwrap_or_else(|| "Pexels".to_string());
        Ok(Some(ImageHit {
            url,
            attribution: Some(format!("Photo: {photographer} (Pexels)")),
            credit_url: photo.url,
            source: "pexels".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_prefers_large2x() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "photos": [{
                "photographer": "Sam Reyes",
                "url": "https://www.pexels.com/photo/1",
                "src": {
                    "large2x": "https://images.pexels.com/1/large2x.jpg",
                    "large": "https://images.pexels.com/1/large.jpg",
                    "medium": "https://images.pexels.com/1/medium.jpg"
                }
            }]
        });

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(header("Authorization", "test-key"))
            .and(query_param("query", "daily routine"))
            .and(query_param("orientation", "landscape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let provider = PexelsImages::new("test-key", Some(server.uri()));
        let hit = provider
            .search(&ImageQuery::new("daily routine"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.url, "https://images.pexels.com/1/large2x.jpg");
        assert_eq!(hit.attribution.as_deref(), Some("Photo: Sam Reyes (Pexels)"));
        assert_eq!(hit.source, "pexels");
    }

    #[tokio::test]
    async fn no_photos_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"photos": []})),
            )
            .mount(&server)
            .await;

        let provider = PexelsImages::new("test-key", Some(server.uri()));
        let hit = provider.search(&ImageQuery::new("nothing")).await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn photo_without_sources_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "photos": [{"photographer": "Sam", "src": {}}]
            })))
            .mount(&server)
            .await;

        let provider = PexelsImages::new("test-key", Some(server.uri()));
        let hit = provider.search(&ImageQuery::new("empty")).await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let provider = PexelsImages::new("bad-key", Some(server.uri()));
        let err = provider
            .search(&ImageQuery::new("anything"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }
}

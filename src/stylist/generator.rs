// Client for the Pollinations text-to-image endpoint. One GET per prompt,
// bounded by a fixed timeout; every failure collapses into a single opaque
// error after logging the cause.

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed upstream endpoint; only the prompt varies per request.
pub const POLLINATIONS_ENDPOINT: &str = "https://image.pollinations.ai";

/// Provider and model names reported in health and generation responses.
pub const PROVIDER: &str = "Pollinations.ai";
pub const MODEL: &str = "Flux";

const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);
const IMAGE_WIDTH: u32 = 512;
const IMAGE_HEIGHT: u32 = 768;
const MODEL_PARAM: &str = "flux";
const FALLBACK_MIME_TYPE: &str = "image/png";

/// Opaque failure covering transport errors, timeouts, and non-success
/// upstream statuses alike.
#[derive(Debug, Error)]
#[error("image generation failed")]
pub struct GenerationError;

/// Bytes returned by the generation endpoint plus their declared MIME type.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Turns a prompt into one image. Exactly one fetch, no retry.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError>;
}

pub struct PollinationsGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl PollinationsGenerator {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_endpoint(POLLINATIONS_ENDPOINT)
    }

    /// Points the generator at a different host. Tests use this; production
    /// code always talks to the fixed endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn prompt_url(&self, prompt: &str) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&model={}&nologo=true",
            self.endpoint,
            urlencoding::encode(prompt),
            IMAGE_WIDTH,
            IMAGE_HEIGHT,
            MODEL_PARAM
        )
    }
}

#[async_trait]
impl ImageGenerator for PollinationsGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        let url = self.prompt_url(prompt);
        debug!("Fetching generated image from {}", url);

        let response = self.client.get(&url).send().await.map_err(|err| {
            warn!("Image generation request failed: {}", err);
            GenerationError
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Image generation endpoint returned status {}", status);
            return Err(GenerationError);
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(|err| {
            warn!("Failed to read generated image body: {}", err);
            GenerationError
        })?;

        Ok(GeneratedImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Returns fixed bytes and records every prompt it receives.
    pub struct StaticImageGenerator {
        bytes: Vec<u8>,
        mime_type: String,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StaticImageGenerator {
        pub fn png(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                mime_type: "image/png".to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for StaticImageGenerator {
        async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(GeneratedImage {
                bytes: self.bytes.clone(),
                mime_type: self.mime_type.clone(),
            })
        }
    }

    /// Fails every call, standing in for an unreachable upstream.
    pub struct FailingImageGenerator;

    #[async_trait]
    impl ImageGenerator for FailingImageGenerator {
        async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, GenerationError> {
            Err(GenerationError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, http::header, routing::get};

    async fn spawn_upstream(router: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[test]
    fn test_prompt_url_percent_encodes_prompt() {
        let generator = PollinationsGenerator::with_endpoint("http://localhost:9").unwrap();
        let url = generator.prompt_url("red dress, summer");
        assert_eq!(
            url,
            "http://localhost:9/prompt/red%20dress%2C%20summer?width=512&height=768&model=flux&nologo=true"
        );
    }

    #[test]
    fn test_data_url_round_trips_bytes() {
        let image = GeneratedImage {
            bytes: b"abc".to_vec(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(
            image.data_url(),
            format!("data:image/png;base64,{}", BASE64_STANDARD.encode(b"abc"))
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_generation_error() {
        // Nothing listens on port 1.
        let generator = PollinationsGenerator::with_endpoint("http://127.0.0.1:1").unwrap();
        assert!(generator.generate("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_is_generation_error() {
        let router = Router::new().route(
            "/prompt/{prompt}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_upstream(router).await;

        let generator = PollinationsGenerator::with_endpoint(format!("http://{addr}")).unwrap();
        assert!(generator.generate("broken").await.is_err());
    }

    #[tokio::test]
    async fn test_success_passes_through_bytes_and_content_type() {
        let router = Router::new().route(
            "/prompt/{prompt}",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "image/jpeg")],
                    b"jpeg-bytes".to_vec(),
                )
            }),
        );
        let addr = spawn_upstream(router).await;

        let generator = PollinationsGenerator::with_endpoint(format!("http://{addr}")).unwrap();
        let image = generator.generate("blue coat").await.unwrap();
        assert_eq!(image.bytes, b"jpeg-bytes");
        assert_eq!(image.mime_type, "image/jpeg");
    }
}

use std::path::Path;
use std::time::Duration;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::BackgroundError;

// @module: AI background image generation and retrieval

/// Default request timeout for the generator endpoint
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// A selectable background theme
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeOption {
    /// Short identifier used on the CLI
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Prompt sent to the image generator
    pub prompt: String,
}

/// The built-in theme catalog
pub fn theme_options() -> Vec<ThemeOption> {
    vec![
        ThemeOption {
            id: "abstract".to_string(),
            name: "Abstract Waves".to_string(),
            description: "Colorful flowing waves and abstract shapes".to_string(),
            prompt: "Abstract flowing colorful waves with purple and blue colors, music visualization".to_string(),
        },
        ThemeOption {
            id: "neon".to_string(),
            name: "Neon City".to_string(),
            description: "Vibrant neon cityscape with glowing elements".to_string(),
            prompt: "Cyberpunk neon city at night with glowing signs and rain, synthwave aesthetic".to_string(),
        },
        ThemeOption {
            id: "nature".to_string(),
            name: "Nature Elements".to_string(),
            description: "Serene natural landscapes and elements".to_string(),
            prompt: "Beautiful serene forest with sunlight through trees, flowing water and mist".to_string(),
        },
        ThemeOption {
            id: "space".to_string(),
            name: "Cosmic Journey".to_string(),
            description: "Space and galaxy visuals with cosmic elements".to_string(),
            prompt: "Deep space nebula with stars and colorful cosmic clouds, galaxy exploration".to_string(),
        },
        ThemeOption {
            id: "minimal".to_string(),
            name: "Minimalist".to_string(),
            description: "Clean, simple backgrounds with subtle animations".to_string(),
            prompt: "Minimalist geometric shapes with subtle gradient movement, clean design".to_string(),
        },
    ]
}

/// Look up a theme by its id
pub fn find_theme(id: &str) -> Option<ThemeOption> {
    theme_options().into_iter().find(|t| t.id == id)
}

/// Generation request sent to the endpoint
#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    /// Prompt describing the desired image
    prompt: &'a str,
}

/// Generation response from the endpoint
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    /// URL of the generated image
    url: String,
}

/// Client for the background image generator
///
/// When an endpoint is configured, the prompt is POSTed there and the
/// response is expected to carry the image URL. Without one, a curated
/// placeholder URL is picked from the prompt's keywords so the rest of the
/// workflow stays exercisable offline.
#[derive(Debug)]
pub struct BackgroundGenerator {
    /// Generator endpoint, if configured
    endpoint: Option<String>,
    /// HTTP client for making requests
    client: Client,
}

impl BackgroundGenerator {
    /// Create a generator with an optional endpoint
    pub fn new(endpoint: Option<String>) -> Self {
        BackgroundGenerator {
            endpoint,
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Generate a background image for the prompt, returning its URL
    pub async fn generate(&self, prompt: &str) -> Result<Url, BackgroundError> {
        debug!("Generating background with prompt: {}", prompt);

        let raw = match &self.endpoint {
            Some(endpoint) => {
                let response = self
                    .client
                    .post(endpoint)
                    .json(&GenerationRequest { prompt })
                    .send()
                    .await
                    .map_err(|e| BackgroundError::RequestFailed(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(BackgroundError::RequestFailed(format!(
                        "Endpoint responded with status {}",
                        response.status()
                    )));
                }

                let body: GenerationResponse = response
                    .json()
                    .await
                    .map_err(|e| BackgroundError::InvalidResponse(e.to_string()))?;
                body.url
            }
            None => placeholder_for_prompt(prompt).to_string(),
        };

        Url::parse(&raw).map_err(|e| {
            BackgroundError::InvalidResponse(format!("Endpoint returned a bad URL: {}", e))
        })
    }

    /// Download the generated image to a local file for the render backend
    pub async fn download_image<P: AsRef<Path>>(
        &self,
        url: &Url,
        path: P,
    ) -> Result<(), BackgroundError> {
        let path = path.as_ref();
        info!("Downloading background image to {}", path.display());

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| BackgroundError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackgroundError::RequestFailed(format!(
                "Image download responded with status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackgroundError::RequestFailed(e.to_string()))?;

        std::fs::write(path, &bytes).map_err(|e| {
            BackgroundError::RequestFailed(format!("Failed to write image file: {}", e))
        })?;

        Ok(())
    }
}

/// Pick a curated placeholder image URL from prompt keywords
pub fn placeholder_for_prompt(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    if prompt.contains("abstract") || prompt.contains("waves") {
        "https://images.unsplash.com/photo-1550684376-efcbd6e3f031?q=80&w=1000&auto=format&fit=crop"
    } else if prompt.contains("cyberpunk") || prompt.contains("neon") {
        "https://images.unsplash.com/photo-1563089145-599997674d42?q=80&w=1000&auto=format&fit=crop"
    } else if prompt.contains("forest") || prompt.contains("nature") {
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?q=80&w=1000&auto=format&fit=crop"
    } else if prompt.contains("space") || prompt.contains("galaxy") {
        "https://images.unsplash.com/photo-1462332420958-a05d1e002413?q=80&w=1000&auto=format&fit=crop"
    } else if prompt.contains("minimalist") || prompt.contains("geometric") {
        "https://images.unsplash.com/photo-1553949345-eb786bb3f7ba?q=80&w=1000&auto=format&fit=crop"
    } else {
        "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?q=80&w=1000&auto=format&fit=crop"
    }
}

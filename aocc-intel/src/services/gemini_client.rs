//! Gemini API client
//!
//! Speaks the `generateContent` REST protocol of the hosted model:
//! `POST {base_url}/models/{model}:generateContent`, key in the
//! `x-goog-api-key` header.
//!
//! Calls pass through a client-side rate limiter that waits for capacity.
//! Nothing is retried.

use std::num::NonZeroU32;
use std::time::Duration;

use aocc_common::config::GeneratorConfig;
use aocc_common::credentials::resolve_api_key;
use aocc_common::ApiKeyPolicy;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};

use crate::models::GroundingChunk;
use crate::services::generator::{Generation, GenerationRequest, GeneratorError, TextGenerator};

const USER_AGENT: &str = concat!("aocc-intel/", env!("CARGO_PKG_VERSION"));
const JSON_MIME_TYPE: &str = "application/json";
const AUDIO_MODALITY: &str = "AUDIO";

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    rate_limiter: DefaultDirectRateLimiter,
    api_key: String,
    base_url: String,
    model: String,
    tts_model: String,
    voice: String,
}

impl GeminiClient {
    /// Build a client with an already validated key
    pub fn new(config: &GeneratorConfig, api_key: String) -> Result<Self, GeneratorError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_minute(per_minute));

        Ok(Self {
            http_client,
            rate_limiter,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            tts_model: config.tts_model.clone(),
            voice: config.voice.clone(),
        })
    }

    /// Resolve and validate the API key, then build the client
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let api_key = resolve_api_key(config, &ApiKeyPolicy::default())?;
        Self::new(config, api_key)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn post(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeneratorError> {
        self.rate_limiter.until_ready().await;

        tracing::debug!(model = %model, "Calling generator");

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeneratorError::Auth);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| GeneratorError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GeneratorError> {
        let body = GenerateContentRequest::for_text(request);
        let response = self.post(&self.model, &body).await?;
        let generation = response.into_generation();

        tracing::info!(
            model = %self.model,
            text_len = generation.text.as_ref().map(|t| t.len()).unwrap_or(0),
            grounding = generation.grounding.len(),
            "Generation complete"
        );

        Ok(generation)
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Option<String>, GeneratorError> {
        let body = GenerateContentRequest::for_speech(text, &self.voice);
        let response = self.post(&self.tts_model, &body).await?;
        let audio = response.into_audio();

        tracing::info!(
            model = %self.tts_model,
            has_audio = audio.is_some(),
            "Speech synthesis complete"
        );

        Ok(audio)
    }
}

// ---- wire format ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl GenerateContentRequest {
    fn for_text(request: &GenerationRequest) -> Self {
        let generation_config = request.json_response.then(|| GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            ..Default::default()
        });

        let tools = if request.search_grounding {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(Content::from_text),
            contents: vec![Content::user(&request.prompt)],
            generation_config,
            tools,
        }
    }

    fn for_speech(text: &str, voice: &str) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Content::user(text)],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec![AUDIO_MODALITY.to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                }),
                ..Default::default()
            }),
            tools: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }
    }

    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            ..Self::from_text(text)
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WireGroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

impl GenerateContentResponse {
    fn into_generation(self) -> Generation {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Generation::default();
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let grounding = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| {
                        GroundingChunk::new(
                            web.title.unwrap_or_default(),
                            web.uri.unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Generation {
            text: (!text.is_empty()).then_some(text),
            grounding,
        }
    }

    /// Base64 audio of the first part of the first candidate
    fn into_audio(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .inline_data
            .map(|inline| inline.data)
            .filter(|data| !data.is_empty())
    }
}

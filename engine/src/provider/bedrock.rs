//! Blocking clients for the two Bedrock text models.
//!
//! Both post JSON to the runtime `invoke` endpoint with a Bedrock API key
//! as bearer token. Sampling is deterministic (temperature 0, no stop
//! sequences). Errors are returned as-is; nothing is retried.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::error::{BattleError, Result};

pub const TITAN_MODEL_ID: &str = "amazon.titan-text-express-v1";
pub const JURASSIC_MODEL_ID: &str = "ai21.j2-ultra-v1";
pub const TOKEN_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";
pub const REGION_ENV: &str = "AWS_REGION";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings shared by both clients.
#[derive(Debug, Clone)]
pub struct BedrockSettings {
    pub region: String,
    /// Replaces `https://bedrock-runtime.{region}.amazonaws.com` when set.
    pub endpoint: Option<String>,
    pub token: String,
    pub timeout: Duration,
}

impl BedrockSettings {
    /// Token from `AWS_BEARER_TOKEN_BEDROCK`; `AWS_REGION` overrides `region`.
    pub fn from_env(region: &str, endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let token =
            std::env::var(TOKEN_ENV).map_err(|_| BattleError::MissingCredentials(TOKEN_ENV))?;
        let region = std::env::var(REGION_ENV).unwrap_or_else(|_| region.to_string());
        Ok(Self {
            region,
            endpoint,
            token,
            timeout,
        })
    }

    fn invoke_url(&self, model_id: &str) -> String {
        let base = match &self.endpoint {
            Some(e) => e.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        };
        format!("{}/model/{}/invoke", base, model_id)
    }
}

struct Invoker {
    client: Client,
    settings: BedrockSettings,
}

impl Invoker {
    fn new(service: &'static str, settings: BedrockSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| BattleError::Transport { service, source })?;
        Ok(Self { client, settings })
    }

    fn invoke<B: Serialize, R: DeserializeOwned>(
        &self,
        service: &'static str,
        model_id: &str,
        body: &B,
    ) -> Result<R> {
        let response = self
            .client
            .post(self.settings.invoke_url(model_id))
            .bearer_auth(&self.settings.token)
            .header("accept", "application/json")
            .json(body)
            .send()
            .map_err(|source| BattleError::Transport { service, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(BattleError::Status { service, status: status.as_u16(), body });
        }

        response
            .json::<R>()
            .map_err(|e| BattleError::MalformedResponse { service, reason: e.to_string() })
    }
}

/* ---------------- Titan ---------------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest<'a> {
    input_text: &'a str,
    text_generation_config: TitanGenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanGenerationConfig {
    max_token_count: u32,
    stop_sequences: Vec<String>,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct TitanResponse {
    #[serde(default)]
    results: Vec<TitanResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResult {
    output_text: String,
}

fn titan_request(prompt: &str) -> TitanRequest<'_> {
    TitanRequest {
        input_text: prompt,
        text_generation_config: TitanGenerationConfig {
            max_token_count: 10,
            stop_sequences: Vec::new(),
            temperature: 0.0,
            top_p: 1.0,
        },
    }
}

fn titan_text(resp: TitanResponse) -> Result<String> {
    resp.results
        .into_iter()
        .next()
        .map(|r| r.output_text)
        .ok_or_else(|| BattleError::MalformedResponse {
            service: "titan",
            reason: "no results".into(),
        })
}

/// Service A: short, expressive completions.
pub struct TitanClient {
    invoker: Invoker,
}

impl TitanClient {
    pub fn new(settings: BedrockSettings) -> Result<Self> {
        Ok(Self {
            invoker: Invoker::new("titan", settings)?,
        })
    }
}

impl TextGenerator for TitanClient {
    fn name(&self) -> &str {
        "titan"
    }

    fn generate(&mut self, prompt: &str) -> Result<String> {
        let body = titan_request(prompt);
        let resp: TitanResponse = self.invoker.invoke("titan", TITAN_MODEL_ID, &body)?;
        titan_text(resp)
    }
}

/* ---------------- Jurassic ---------------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JurassicRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stop_sequences: Vec<String>,
    count_penalty: Penalty,
    presence_penalty: Penalty,
    frequency_penalty: Penalty,
}

#[derive(Serialize)]
struct Penalty {
    scale: f32,
}

#[derive(Deserialize)]
struct JurassicResponse {
    #[serde(default)]
    completions: Vec<JurassicCompletion>,
}

#[derive(Deserialize)]
struct JurassicCompletion {
    data: JurassicData,
}

#[derive(Deserialize)]
struct JurassicData {
    text: String,
}

fn jurassic_request(prompt: &str) -> JurassicRequest<'_> {
    JurassicRequest {
        prompt,
        max_tokens: 50,
        temperature: 0.0,
        top_p: 0.9,
        stop_sequences: Vec::new(),
        count_penalty: Penalty { scale: 0.0 },
        presence_penalty: Penalty { scale: 0.0 },
        frequency_penalty: Penalty { scale: 0.0 },
    }
}

fn jurassic_text(resp: JurassicResponse) -> Result<String> {
    resp.completions
        .into_iter()
        .next()
        .map(|c| c.data.text)
        .ok_or_else(|| BattleError::MalformedResponse {
            service: "jurassic",
            reason: "no completions".into(),
        })
}

/// Service B: completion-style model returning a list of candidates.
pub struct JurassicClient {
    invoker: Invoker,
}

impl JurassicClient {
    pub fn new(settings: BedrockSettings) -> Result<Self> {
        Ok(Self {
            invoker: Invoker::new("jurassic", settings)?,
        })
    }
}

impl TextGenerator for JurassicClient {
    fn name(&self) -> &str {
        "jurassic"
    }

    fn generate(&mut self, prompt: &str) -> Result<String> {
        let resp: JurassicResponse =
            self.invoker.invoke("jurassic", JURASSIC_MODEL_ID, &jurassic_request(prompt))?;
        jurassic_text(resp)
    }
}

//! @ai:module:intent LLM clients that ask a model to correct one Tamil sentence
//! @ai:module:layer infrastructure
//! @ai:module:public_api ModelClientTrait, HttpModelClient, MockModelClient, SYSTEM_PROMPT, build_user_prompt, clean_response
//! @ai:module:stateless true

use crate::config::ApiConfig;
use crate::runner::providers::{ModelSpec, Provider};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const SYSTEM_PROMPT: &str = "You are a Tamil grammar expert specializing in word joining and separation rules
(சொற்களை எழுதும் முறை) as defined by the Tamil Virtual University style guide.

Your task: Given a Tamil sentence, check if there is a grammar error related to:
- Word joining vs separation (சேர்த்து / பிரித்து எழுதல்)
- Sandhi rules (சந்தி — consonant doubling when words join)
- Suffix attachment (விகுதி இணைப்பு)

Rules:
- If the sentence has a grammar error in word joining/separation, return ONLY the corrected sentence.
- If the sentence is grammatically correct, return ONLY the original sentence unchanged.
- Return nothing else — no explanation, no metadata, just the sentence.";

const USER_PROMPT_PREFIX: &str = "Check this Tamil sentence for word joining/separation errors and return the corrected version (or the original if correct):";

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GOOGLE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// @ai:intent Trait for a model that returns a corrected sentence
#[allow(async_fn_in_trait)]
pub trait ModelClientTrait: Send + Sync {
    /// @ai:intent Ask the model to correct a sentence; unchanged text means "no error"
    async fn correct(&self, sentence: &str) -> Result<String>;
}

/// @ai:intent Build the user turn for a sentence
/// @ai:effects pure
pub fn build_user_prompt(sentence: &str) -> String {
    format!("{}\n\n{}", USER_PROMPT_PREFIX, sentence)
}

/// @ai:intent Trim a model reply and drop quotes wrapped around the sentence
/// @ai:effects pure
pub fn clean_response(text: &str) -> String {
    text.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

/// @ai:intent Calls a hosted model over its HTTP API
pub struct HttpModelClient {
    client: reqwest::Client,
    provider: Provider,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl HttpModelClient {
    /// @ai:intent Create a client for a supported model
    /// @ai:effects pure
    pub fn new(spec: &ModelSpec, api_key: String, config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            provider: spec.provider,
            model: spec.id.to_string(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// @ai:intent Send a JSON request and decode the JSON reply
    /// @ai:effects network
    async fn post_json<B, T>(&self, request: reqwest::RequestBuilder, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = request
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {} API", self.provider))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("{} API error ({}): {}", self.provider, status, error_text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} API response", self.provider))
    }

    /// @ai:effects network
    async fn call_anthropic(&self, user_prompt: &str) -> Result<String> {
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: SYSTEM_PROMPT,
            messages: vec![ChatMessage {
                role: "user",
                content: user_prompt,
            }],
        };

        let request = self
            .client
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01");

        let response: AnthropicResponse = self.post_json(request, &body).await?;

        Ok(response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// @ai:effects network
    async fn call_openai(&self, user_prompt: &str) -> Result<String> {
        let body = OpenAiRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let request = self.client.post(OPENAI_URL).bearer_auth(&self.api_key);
        let response: OpenAiResponse = self.post_json(request, &body).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .context("OpenAI response contained no choices")?;

        Ok(choice.message.content.unwrap_or_default())
    }

    /// @ai:effects network
    async fn call_google(&self, user_prompt: &str) -> Result<String> {
        let body = GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart { text: user_prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let url = format!("{}/{}:generateContent", GOOGLE_URL, self.model);
        let request = self.client.post(url).header("x-goog-api-key", &self.api_key);
        let response: GeminiResponse = self.post_json(request, &body).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .context("Gemini response contained no candidates")?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

impl ModelClientTrait for HttpModelClient {
    /// @ai:effects network
    async fn correct(&self, sentence: &str) -> Result<String> {
        let user_prompt = build_user_prompt(sentence);

        let raw = match self.provider {
            Provider::Anthropic => self.call_anthropic(&user_prompt).await?,
            Provider::OpenAi => self.call_openai(&user_prompt).await?,
            Provider::Google => self.call_google(&user_prompt).await?,
        };

        Ok(clean_response(&raw))
    }
}

/// @ai:intent Offline client for dry runs and tests
/// @ai:effects pure
///
/// Echoes the input unless a canned reply is registered for it; sentences
/// marked as failing return an error.
#[derive(Debug, Clone, Default)]
pub struct MockModelClient {
    replies: HashMap<String, String>,
    failing: HashSet<String>,
}

impl MockModelClient {
    /// @ai:intent Create a mock that echoes every sentence
    /// @ai:effects pure
    pub fn echo() -> Self {
        Self::default()
    }

    /// @ai:intent Register a canned reply for a sentence
    /// @ai:effects pure
    pub fn with_reply(mut self, sentence: &str, reply: &str) -> Self {
        self.replies.insert(sentence.to_string(), reply.to_string());
        self
    }

    /// @ai:intent Make calls for a sentence fail
    /// @ai:effects pure
    pub fn failing_on(mut self, sentence: &str) -> Self {
        self.failing.insert(sentence.to_string());
        self
    }
}

impl ModelClientTrait for MockModelClient {
    async fn correct(&self, sentence: &str) -> Result<String> {
        if self.failing.contains(sentence) {
            anyhow::bail!("mock failure for sentence: {}", sentence);
        }

        let reply = self
            .replies
            .get(sentence)
            .map(String::as_str)
            .unwrap_or(sentence);

        Ok(clean_response(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::providers::lookup_model;

    #[test]
    fn test_clean_response_strips_wrapping_quotes() {
        assert_eq!(clean_response("  \"அது கனமானது.\"\n"), "அது கனமானது.");
        assert_eq!(clean_response("'x y'"), "x y");
        assert_eq!(clean_response(""), "");
    }

    #[test]
    fn test_user_prompt_contains_sentence() {
        let prompt = build_user_prompt("அப்படி செய்தான்.");
        assert!(prompt.starts_with(USER_PROMPT_PREFIX));
        assert!(prompt.ends_with("அப்படி செய்தான்."));
    }

    #[test]
    fn test_gemini_request_uses_camel_case() {
        let body = GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: "sys" }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart { text: "hi" }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.0,
                max_output_tokens: 500,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_openai_response_with_null_content() {
        let parsed: OpenAiResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(parsed.choices[0].message.content, None);
    }

    #[test]
    fn test_http_client_keeps_provider() {
        let spec = lookup_model("claude-haiku-4-5-20251001").unwrap();
        let client = HttpModelClient::new(spec, "key".to_string(), &ApiConfig::default()).unwrap();
        assert_eq!(client.provider(), Provider::Anthropic);
    }

    #[tokio::test]
    async fn test_mock_client_echo_reply_and_failure() {
        let client = MockModelClient::echo()
            .with_reply("a b", "\"ab\"")
            .failing_on("boom");

        assert_eq!(client.correct("same").await.unwrap(), "same");
        assert_eq!(client.correct("a b").await.unwrap(), "ab");
        assert!(client.correct("boom").await.is_err());
    }
}

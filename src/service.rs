//! The remote chat-completion services a round can talk to.
//!
//! Every round issues strictly sequential requests through [`ChatService`].  Two backends are
//! provided:  [`OpenAiCompatible`] speaks the `/chat/completions` dialect (xAI by default) and
//! [`AnthropicService`] goes through claudius.  Neither retries; an error ends the round.

use claudius::{
    Anthropic, ContentBlock, KnownModel, MessageCreateParams, MessageParam, MessageRole, Model,
};

use crate::{ChatterError, TokenUsage};

/// Environment variable holding the xAI credential.
pub const XAI_KEY: &str = "XAI_KEY";
/// Environment variable holding the Anthropic credential.
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// One request: a system prompt, a user prompt, and an output cap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompletionRequest {
    /// Steers every response in the round.
    pub system: String,
    /// The prompt for this turn.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// The text of one completion and what it cost.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Completion {
    /// The generated text.
    pub text: String,
    /// Token usage, when the service reports it.
    pub usage: Option<TokenUsage>,
}

/// A chat service: one request in, one completion out.
#[allow(async_fn_in_trait)]
pub trait ChatService {
    /// A short name for logs, e.g. the model.
    fn describe(&self) -> String;

    /// Send one request and wait for its completion.
    async fn complete(&self, req: &CompletionRequest) -> Result<Completion, ChatterError>;
}

fn credential(variable: &str) -> Result<String, ChatterError> {
    match std::env::var(variable) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ChatterError::missing_credential(variable)),
    }
}

////////////////////////////////////////// OpenAiCompatible ////////////////////////////////////////

#[derive(Debug, serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, serde::Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, serde::Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// A client for any endpoint that speaks the OpenAI chat-completions dialect.
#[derive(Clone, Debug)]
pub struct OpenAiCompatible {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiCompatible {
    /// The xAI API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.x.ai/v1";
    /// The model rounds use unless told otherwise.
    pub const DEFAULT_MODEL: &'static str = "grok-4-fast-reasoning";

    /// Create a client for `base_url` that authenticates with `api_key`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Create a client whose credential comes from `XAI_KEY`.
    pub fn from_env(base_url: Option<&str>, model: Option<&str>) -> Result<Self, ChatterError> {
        let api_key = credential(XAI_KEY)?;
        Ok(Self::new(
            api_key,
            base_url.unwrap_or(Self::DEFAULT_BASE_URL),
            model.unwrap_or(Self::DEFAULT_MODEL),
        ))
    }
}

impl ChatService for OpenAiCompatible {
    fn describe(&self) -> String {
        format!("{} at {}", self.model, self.base_url)
    }

    async fn complete(&self, req: &CompletionRequest) -> Result<Completion, ChatterError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &req.system,
                },
                ChatMessage {
                    role: "user",
                    content: &req.prompt,
                },
            ],
            max_tokens: req.max_tokens,
        };
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ChatterError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let resp: ChatResponse = serde_json::from_str(&body).map_err(|err| {
            ChatterError::invalid_response(
                format!("could not parse chat completion: {err}"),
                "Check that the base URL points at an OpenAI-compatible endpoint",
            )
        })?;
        let Some(text) = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
        else {
            return Err(ChatterError::invalid_response(
                "chat completion had no message content",
                "Check that the model name is valid for this endpoint",
            ));
        };
        let usage = resp.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });
        Ok(Completion { text, usage })
    }
}

////////////////////////////////////////// AnthropicService ////////////////////////////////////////

/// Claude through claudius.
pub struct AnthropicService {
    client: Anthropic,
    model: Model,
}

impl AnthropicService {
    /// Wrap an existing client; `model` of `None` means Claude Sonnet 4.
    ///
    /// Names claudius does not know are sent as given.
    pub fn new(client: Anthropic, model: Option<&str>) -> Self {
        let model = match model {
            Some(name) => name
                .parse()
                .unwrap_or_else(|()| Model::Custom(name.to_string())),
            None => Model::Known(KnownModel::ClaudeSonnet40),
        };
        Self { client, model }
    }

    /// Create a client whose credential comes from `ANTHROPIC_API_KEY`.
    pub fn from_env(model: Option<&str>) -> Result<Self, ChatterError> {
        let api_key = credential(ANTHROPIC_API_KEY)?;
        Ok(Self::new(Anthropic::new(Some(api_key))?, model))
    }
}

impl ChatService for AnthropicService {
    fn describe(&self) -> String {
        self.model.to_string()
    }

    async fn complete(&self, req: &CompletionRequest) -> Result<Completion, ChatterError> {
        let params = MessageCreateParams {
            max_tokens: req.max_tokens,
            model: self.model.clone(),
            messages: vec![MessageParam::new_with_string(
                req.prompt.clone(),
                MessageRole::User,
            )],
            system: Some(req.system.clone().into()),
            ..Default::default()
        };
        let resp = self.client.send(params).await?;
        let text = resp
            .content
            .iter()
            .flat_map(|c| {
                if let ContentBlock::Text(t) = c {
                    Some(t.text.clone())
                } else {
                    None
                }
            })
            .collect::<String>();
        let usage = TokenUsage {
            input_tokens: resp.usage.input_tokens.max(0) as u64,
            output_tokens: resp.usage.output_tokens.max(0) as u64,
        };
        Ok(Completion {
            text,
            usage: Some(usage),
        })
    }
}

/////////////////////////////////////////////// testing ////////////////////////////////////////////

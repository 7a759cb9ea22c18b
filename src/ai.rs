use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

use crate::error::AIError;
use crate::message::{Message, MessageType};

/// Gemini's OpenAI-compatibility endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// The capability the dispatcher needs from a model provider: one complete
/// text block for the given instructions and history, synchronously awaited.
/// Tests substitute a stub here.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
    ) -> Result<String, AIError>;
}

/// The shared model binding: one configured client + model identifier + run
/// options, used by every persona that talks to the model.
pub struct GameAI {
    client: Client<OpenAIConfig>,
    model: String,
    tracing_disabled: bool,
}

impl GameAI {
    pub fn new(api_key: String, api_base: &str, model: &str, tracing_disabled: bool) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            tracing_disabled,
        }
    }
}

#[async_trait]
impl Completion for GameAI {
    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
    ) -> Result<String, AIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestSystemMessageArgs::default()
                .content(instructions)
                .build()?
                .into()];

        for message in history {
            match message.message_type {
                MessageType::User => messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(message.content.as_str())
                        .build()?
                        .into(),
                ),
                MessageType::Assistant => messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(message.content.as_str())
                        .build()?
                        .into(),
                ),
                // UI-only messages never reach the model.
                MessageType::System => {}
            }
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        if !self.tracing_disabled {
            log::debug!("chat completion request with {} messages", history.len() + 1);
        }

        let response = self.client.chat().create(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AIError::NoMessageFound)
    }
}

use std::future::Future;

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::AIError;
use crate::prompts::{FEW_SHOT_EXAMPLES, JUDGE_SYSTEM_PROMPT};

// The judgment service: turns a free-text action claim into a numeric delta.
// A trait so tests can stub the delta without a network call.
pub trait Judge {
    fn score(
        &self,
        name: &str,
        action: &str,
    ) -> impl Future<Output = Result<f64, AIError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    nice_score: f64,
}

#[derive(Clone)]
pub struct OpenAiJudge {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiJudge {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    // Structured output: a single numeric field. The -100..100 range lives in
    // the prompt text only and is not enforced here.
    fn response_format() -> ResponseFormat {
        ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: Some("The score of the users action".to_string()),
                name: "score".to_string(),
                schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "nice_score": {
                            "description": "The score of the action",
                            "type": "number"
                        }
                    },
                    "required": ["nice_score"],
                    "additionalProperties": false
                })),
                strict: Some(true),
            },
        }
    }

    fn messages(name: &str, action: &str) -> Result<Vec<ChatCompletionRequestMessage>, AIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(JUDGE_SYSTEM_PROMPT)
                .build()?
                .into(),
        ];
        for (claim, verdict) in FEW_SHOT_EXAMPLES {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(*claim)
                    .build()?
                    .into(),
            );
            messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(*verdict)
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!("{}: {}", name, action))
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

impl Judge for OpenAiJudge {
    async fn score(&self, name: &str, action: &str) -> Result<f64, AIError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::messages(name, action)?)
            .response_format(Self::response_format())
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(AIError::NoMessageFound)?;
        debug!("Nice response: {}", content);

        let parsed: ScoreResponse = serde_json::from_str(&content)
            .map_err(|e| AIError::InvalidScore(format!("{}: {}", e, content)))?;
        Ok(parsed.nice_score)
    }
}

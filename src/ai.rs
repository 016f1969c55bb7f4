use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use log::{debug, info};

use crate::error::AIError;
use crate::judge::Judge;
use crate::message::{Message, MessageType};
use crate::prompts::{GREETING, SYSTEM_PROMPT};
use crate::session::SessionState;
use crate::tools::{self, ToolExecutor, ToolRequest};

// A model that keeps requesting tools without ever answering ends the turn
// with an error instead of spinning forever.
const MAX_TOOL_ROUNDS: u32 = 5;

// The conversation loop: a two-state handoff between "ask the model" and
// "run the tool it asked for". The model drives; this code only dispatches.
pub struct SantaAI<J: Judge> {
    client: Client<OpenAIConfig>,
    model: String,
    tools: ToolExecutor<J>,
    pub state: SessionState,
}

impl<J: Judge> SantaAI<J> {
    pub fn new(
        client: Client<OpenAIConfig>,
        model: impl Into<String>,
        tools: ToolExecutor<J>,
        state: SessionState,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            tools,
            state,
        }
    }

    // Seeds the fixed greeting into an empty session. Returns whether the
    // greeting was added so the front end knows to display it.
    pub fn seed_greeting(&mut self) -> Result<bool, AIError> {
        if !self.state.messages.is_empty() {
            return Ok(false);
        }
        self.state.messages.push(
            ChatCompletionRequestAssistantMessageArgs::default()
                .content(GREETING)
                .build()?
                .into(),
        );
        Ok(true)
    }

    // The user-visible part of the history, for replaying a resumed session.
    // Tool traffic and the system prompt stay out of the transcript.
    pub fn transcript(&self) -> Vec<Message> {
        let mut transcript = Vec::new();
        for message in &self.state.messages {
            match message {
                ChatCompletionRequestMessage::User(user) => {
                    if let ChatCompletionRequestUserMessageContent::Text(text) = &user.content {
                        transcript.push(Message::new(text.clone(), MessageType::User));
                    }
                }
                ChatCompletionRequestMessage::Assistant(assistant) => {
                    if let Some(ChatCompletionRequestAssistantMessageContent::Text(text)) =
                        &assistant.content
                    {
                        transcript.push(Message::new(text.clone(), MessageType::Santa));
                    }
                }
                _ => {}
            }
        }
        transcript
    }

    // One full user turn: append the user message, then alternate between the
    // assistant state and the tool-execution state until the model yields
    // text. Tool failures on the write path propagate out of here and fail
    // the whole turn.
    pub async fn send_message(&mut self, text: &str) -> Result<String, AIError> {
        let checkpoint = self.state.messages.len();
        let result = self.run_turn(text).await;
        if result.is_err() {
            // A failed turn must not leave dangling tool calls in the
            // history; later requests would be rejected over them.
            self.state.messages.truncate(checkpoint);
        }
        result
    }

    async fn run_turn(&mut self, text: &str) -> Result<String, AIError> {
        self.state.messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(text)
                .build()?
                .into(),
        );

        let mut rounds = 0;
        loop {
            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(self.request_messages()?)
                .tools(tools::definitions()?)
                .build()?;

            let response = self.client.chat().create(request).await?;
            let message = response
                .choices
                .into_iter()
                .next()
                .ok_or(AIError::NoMessageFound)?
                .message;

            if let Some(tool_calls) = message.tool_calls.filter(|calls| !calls.is_empty()) {
                rounds += 1;
                if rounds > MAX_TOOL_ROUNDS {
                    return Err(AIError::ToolRoundLimit);
                }

                self.state.messages.push(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()?
                        .into(),
                );

                for call in &tool_calls {
                    debug!(
                        "Tool call {}: {}({})",
                        call.id, call.function.name, call.function.arguments
                    );
                    let tool_request =
                        ToolRequest::parse(&call.function.name, &call.function.arguments)?;
                    let output = self.tools.execute(tool_request).await?;
                    self.state.messages.push(
                        ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(call.id.clone())
                            .content(output)
                            .build()?
                            .into(),
                    );
                }
                continue;
            }

            let content = message.content.ok_or(AIError::NoMessageFound)?;
            info!("Assistant reply after {} tool rounds", rounds);
            self.state.messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content.clone())
                    .build()?
                    .into(),
            );
            return Ok(content);
        }
    }

    // The persona prompt is prepended on every request rather than stored in
    // the checkpoint, so prompt changes apply to resumed sessions too.
    fn request_messages(&self) -> Result<Vec<ChatCompletionRequestMessage>, AIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()?
                .into(),
        ];
        messages.extend(self.state.messages.iter().cloned());
        Ok(messages)
    }
}

use async_openai::types::{
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType, FunctionObject,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::error::AIError;
use crate::judge::Judge;
use crate::store::ListStore;

pub const CHECK_NAUGHTY_LIST: &str = "check_naughty_list";
pub const REGISTER_NAUGHTY_OR_NICE: &str = "register_naughty_or_nice";

pub const NO_RECORD_REPLY: &str =
    "I haven't registered any good or bad actions for this name yet.";
pub const READ_ERROR_REPLY: &str = "Error reading the list.";
pub const REGISTERED_REPLY: &str = "Action registered!";

// The closed set of operations the model may request. Tool calls are parsed
// into these variants by function name; anything else is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolRequest {
    CheckNaughtyList { name: String },
    RegisterNaughtyOrNice { name: String, action: String },
}

#[derive(Deserialize)]
struct CheckArgs {
    name: String,
}

#[derive(Deserialize)]
struct RegisterArgs {
    name: String,
    action: String,
}

impl ToolRequest {
    pub fn parse(function: &str, arguments: &str) -> Result<Self, AIError> {
        match function {
            CHECK_NAUGHTY_LIST => {
                let args: CheckArgs = serde_json::from_str(arguments)?;
                Ok(Self::CheckNaughtyList { name: args.name })
            }
            REGISTER_NAUGHTY_OR_NICE => {
                let args: RegisterArgs = serde_json::from_str(arguments)?;
                Ok(Self::RegisterNaughtyOrNice {
                    name: args.name,
                    action: args.action,
                })
            }
            other => Err(AIError::UnknownTool(other.to_string())),
        }
    }
}

// Function definitions bound to the assistant request.
pub fn definitions() -> Result<Vec<ChatCompletionTool>, AIError> {
    let check = ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(FunctionObject {
            name: CHECK_NAUGHTY_LIST.to_string(),
            description: Some(
                "Call with a name, to check if the name is on the naughty list.".to_string(),
            ),
            parameters: Some(json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The first name to look up"
                    }
                },
                "required": ["name"],
                "additionalProperties": false
            })),
            strict: Some(true),
        })
        .build()?;

    let register = ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(FunctionObject {
            name: REGISTER_NAUGHTY_OR_NICE.to_string(),
            description: Some(
                "Call with a name and action, to update the naughty or nice score for the name."
                    .to_string(),
            ),
            parameters: Some(json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "The first name the action belongs to"
                    },
                    "action": {
                        "type": "string",
                        "description": "Free-text description of the good or naughty action"
                    }
                },
                "required": ["name", "action"],
                "additionalProperties": false
            })),
            strict: Some(true),
        })
        .build()?;

    Ok(vec![check, register])
}

// Executes parsed tool requests against the store and the judgment service.
pub struct ToolExecutor<J: Judge> {
    store: ListStore,
    judge: J,
}

impl<J: Judge> ToolExecutor<J> {
    pub fn new(store: ListStore, judge: J) -> Self {
        Self { store, judge }
    }

    pub async fn execute(&self, request: ToolRequest) -> Result<String, AIError> {
        match request {
            ToolRequest::CheckNaughtyList { name } => Ok(self.check_naughty_list(&name).await),
            ToolRequest::RegisterNaughtyOrNice { name, action } => {
                self.register_naughty_or_nice(&name, &action).await
            }
        }
    }

    // Read path: data-access errors are logged and downgraded to a generic
    // failure string, never propagated.
    pub async fn check_naughty_list(&self, name: &str) -> String {
        info!("Checking naughty list for: {}", name);

        match self.store.lookup(name).await {
            Ok(None) => NO_RECORD_REPLY.to_string(),
            Ok(Some(row)) if row.is_nice() => format!(
                "{} is on the list of nice children, with {} points.",
                row.name, row.nice_meter
            ),
            Ok(Some(row)) => format!(
                "{} is on the naughty list, with {} points!",
                row.name, row.nice_meter
            ),
            Err(e) => {
                error!("Error reading the list: {}", e);
                READ_ERROR_REPLY.to_string()
            }
        }
    }

    // Write path: judge first, then merge. Store errors roll the transaction
    // back and are re-raised here, failing the whole interaction. The
    // asymmetry with the read path is intentional.
    pub async fn register_naughty_or_nice(
        &self,
        name: &str,
        action: &str,
    ) -> Result<String, AIError> {
        info!("Name and action: {} {}", name, action);

        let nice_score = self.judge.score(name, action).await?;
        let row = self.store.upsert(name, nice_score).await?;
        info!(
            "Registered {} for {}, nice_meter now {} after {} updates",
            nice_score, row.name, row.nice_meter, row.updates
        );

        Ok(REGISTERED_REPLY.to_string())
    }
}

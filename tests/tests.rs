// ../tests/tests.rs
use std::collections::HashMap;

use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestUserMessageArgs,
};
use julenissen::error::AIError;
use julenissen::judge::Judge;
use julenissen::logging;
use julenissen::session::{SessionManager, SessionState};
use julenissen::settings::Settings;
use julenissen::store::ListStore;
use julenissen::tools::{
    CHECK_NAUGHTY_LIST, NO_RECORD_REPLY, READ_ERROR_REPLY, REGISTER_NAUGHTY_OR_NICE,
    REGISTERED_REPLY, ToolExecutor, ToolRequest, definitions,
};
use log::LevelFilter;

// Judgment service stub: scores keyed by the action text, no network.
struct StubJudge {
    scores: HashMap<&'static str, f64>,
}

impl StubJudge {
    fn new(scores: &[(&'static str, f64)]) -> Self {
        Self {
            scores: scores.iter().copied().collect(),
        }
    }
}

impl Judge for StubJudge {
    async fn score(&self, _name: &str, action: &str) -> Result<f64, AIError> {
        self.scores
            .get(action)
            .copied()
            .ok_or_else(|| AIError::InvalidScore(format!("no stub score for: {}", action)))
    }
}

#[tokio::test]
async fn lookup_of_unrecorded_name_is_none() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    let row = store.lookup("Unregistered").await.expect("Lookup failed");
    assert!(row.is_none());
}

#[tokio::test]
async fn first_upsert_initializes_the_row() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    let row = store.upsert("Ola", 5.0).await.expect("Upsert failed");
    assert_eq!(row.name, "Ola");
    assert_eq!(row.nice_meter, 5);
    assert_eq!(row.updates, 1);
}

#[tokio::test]
async fn sequential_upserts_accumulate() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    let deltas = [5.0, -10.0, 3.0, 7.0];
    let mut last = None;
    for delta in deltas {
        last = Some(store.upsert("Ola", delta).await.expect("Upsert failed"));
    }

    let row = last.expect("No row returned");
    assert_eq!(row.nice_meter, 5);
    assert_eq!(row.updates, deltas.len() as i64);

    let stored = store
        .lookup("Ola")
        .await
        .expect("Lookup failed")
        .expect("Row missing after upserts");
    assert_eq!(stored, row);
}

#[tokio::test]
async fn judged_scores_are_rounded_at_the_store_boundary() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    let row = store.upsert("Eva", 2.6).await.expect("Upsert failed");
    assert_eq!(row.nice_meter, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_lose_no_updates() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    let mut handles = Vec::new();
    for _ in 0..25 {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.upsert("Ola", 1.0).await }));
    }
    for handle in handles {
        handle
            .await
            .expect("Task panicked")
            .expect("Upsert failed");
    }

    let row = store
        .lookup("Ola")
        .await
        .expect("Lookup failed")
        .expect("Row missing");
    assert_eq!(row.nice_meter, 25);
    assert_eq!(row.updates, 25);
}

#[tokio::test]
async fn leaderboards_split_by_sign_and_order_by_score() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");

    store.upsert("Anna", 10.0).await.expect("Upsert failed");
    store.upsert("Bob", 5.0).await.expect("Upsert failed");
    store.upsert("Carl", -7.0).await.expect("Upsert failed");
    store.upsert("Dora", 0.0).await.expect("Upsert failed");

    let nice = store.top_nice(10).await.expect("top_nice failed");
    let nice_names: Vec<&str> = nice.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(nice_names, vec!["Anna", "Bob"]);

    let naughty = store.top_naughty(10).await.expect("top_naughty failed");
    let naughty_names: Vec<&str> = naughty.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(naughty_names, vec!["Carl"]);
}

#[tokio::test]
async fn check_reports_no_record_without_creating_one() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");
    let tools = ToolExecutor::new(store.clone(), StubJudge::new(&[]));

    let reply = tools.check_naughty_list("Unregistered").await;
    assert_eq!(reply, NO_RECORD_REPLY);

    // The lookup must not have created a row as a side effect.
    let row = store.lookup("Unregistered").await.expect("Lookup failed");
    assert!(row.is_none());
}

#[tokio::test]
async fn read_errors_are_swallowed_into_a_generic_reply() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = data_dir.path().join("naughty_nice.db");
    let store = ListStore::open(&db_path)
        .await
        .expect("Failed to open file-backed store");
    let tools = ToolExecutor::new(store, StubJudge::new(&[]));

    // Break the store underneath the executor.
    let raw = tokio_rusqlite::Connection::open(&db_path)
        .await
        .expect("Failed to open raw connection");
    raw.call(|conn| {
        conn.execute("DROP TABLE naughty_nice", [])?;
        Ok::<(), tokio_rusqlite::rusqlite::Error>(())
    })
    .await
    .expect("Failed to drop table");

    let reply = tools.check_naughty_list("Ola").await;
    assert_eq!(reply, READ_ERROR_REPLY);
}

#[tokio::test]
async fn ola_scenario_register_then_check() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");
    let judge = StubJudge::new(&[("vacuumed the house", 5.0), ("pushed a sibling", -10.0)]);
    let tools = ToolExecutor::new(store.clone(), judge);

    let reply = tools
        .execute(ToolRequest::RegisterNaughtyOrNice {
            name: "Ola".to_string(),
            action: "vacuumed the house".to_string(),
        })
        .await
        .expect("Register failed");
    assert_eq!(reply, REGISTERED_REPLY);

    let row = store
        .lookup("Ola")
        .await
        .expect("Lookup failed")
        .expect("Row missing");
    assert_eq!((row.nice_meter, row.updates), (5, 1));

    let reply = tools.check_naughty_list("Ola").await;
    assert_eq!(reply, "Ola is on the list of nice children, with 5 points.");

    tools
        .execute(ToolRequest::RegisterNaughtyOrNice {
            name: "Ola".to_string(),
            action: "pushed a sibling".to_string(),
        })
        .await
        .expect("Register failed");

    let row = store
        .lookup("Ola")
        .await
        .expect("Lookup failed")
        .expect("Row missing");
    assert_eq!((row.nice_meter, row.updates), (-5, 2));

    let reply = tools.check_naughty_list("Ola").await;
    assert_eq!(reply, "Ola is on the naughty list, with -5 points!");
}

#[tokio::test]
async fn zero_score_classifies_as_naughty() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");
    let tools = ToolExecutor::new(store.clone(), StubJudge::new(&[("ate ice cream", 0.0)]));

    tools
        .execute(ToolRequest::RegisterNaughtyOrNice {
            name: "Kai".to_string(),
            action: "ate ice cream".to_string(),
        })
        .await
        .expect("Register failed");

    let reply = tools.check_naughty_list("Kai").await;
    assert_eq!(reply, "Kai is on the naughty list, with 0 points!");
}

#[tokio::test]
async fn judge_failure_propagates_out_of_register() {
    let store = ListStore::open_in_memory()
        .await
        .expect("Failed to open in-memory store");
    let tools = ToolExecutor::new(store.clone(), StubJudge::new(&[]));

    let result = tools
        .execute(ToolRequest::RegisterNaughtyOrNice {
            name: "Ola".to_string(),
            action: "something unscored".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AIError::InvalidScore(_))));

    // The failed registration must not have touched the list.
    let row = store.lookup("Ola").await.expect("Lookup failed");
    assert!(row.is_none());
}

#[test]
fn tool_requests_parse_from_function_calls() {
    let request = ToolRequest::parse(CHECK_NAUGHTY_LIST, r#"{"name": "Ola"}"#)
        .expect("Failed to parse check call");
    assert_eq!(
        request,
        ToolRequest::CheckNaughtyList {
            name: "Ola".to_string()
        }
    );

    let request = ToolRequest::parse(
        REGISTER_NAUGHTY_OR_NICE,
        r#"{"name": "Ola", "action": "vacuumed the house"}"#,
    )
    .expect("Failed to parse register call");
    assert_eq!(
        request,
        ToolRequest::RegisterNaughtyOrNice {
            name: "Ola".to_string(),
            action: "vacuumed the house".to_string()
        }
    );
}

#[test]
fn unknown_or_malformed_tool_calls_are_rejected() {
    let result = ToolRequest::parse("open_the_workshop", "{}");
    assert!(matches!(result, Err(AIError::UnknownTool(_))));

    let result = ToolRequest::parse(REGISTER_NAUGHTY_OR_NICE, r#"{"name": "Ola"}"#);
    assert!(matches!(result, Err(AIError::InvalidToolArguments(_))));
}

#[test]
fn tool_definitions_cover_the_closed_set() {
    let tools = definitions().expect("Failed to build definitions");
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool.function.name.as_str())
        .collect();
    assert_eq!(names, vec![CHECK_NAUGHTY_LIST, REGISTER_NAUGHTY_OR_NICE]);
}

#[test]
fn session_checkpoint_round_trips() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let sessions = SessionManager::new(data_dir.path());

    let mut state = SessionState::new();
    let user: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
        .content("My name is Ola and I vacuumed the house")
        .build()
        .expect("Failed to build user message")
        .into();
    let assistant: ChatCompletionRequestMessage =
        ChatCompletionRequestAssistantMessageArgs::default()
            .content("Ho-ho-ho, noted!")
            .build()
            .expect("Failed to build assistant message")
            .into();
    state.messages.push(user);
    state.messages.push(assistant);

    sessions.save(&state).expect("Failed to save session");
    assert_eq!(sessions.available_sessions(), vec![state.thread_id.clone()]);

    let restored = sessions.load(&state.thread_id).expect("Failed to load session");
    assert_eq!(restored.thread_id, state.thread_id);
    assert_eq!(
        serde_json::to_value(&restored.messages).expect("serialize restored"),
        serde_json::to_value(&state.messages).expect("serialize original"),
    );
}

#[test]
fn resuming_an_unknown_thread_starts_fresh_under_that_id() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let sessions = SessionManager::new(data_dir.path());

    let state = sessions.load_or_new("letter-from-ola");
    assert_eq!(state.thread_id, "letter-from-ola");
    assert!(state.messages.is_empty());
}

#[test]
fn missing_settings_are_created_with_defaults() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let settings = Settings::load_or_init(data_dir.path()).expect("Failed to init settings");
    assert_eq!(settings.model, "gpt-4o");
    assert!(!settings.debug_mode);
    assert!(data_dir.path().join("settings.json").exists());
}

#[test]
fn corrupt_settings_fail_instead_of_being_overwritten() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = data_dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").expect("Failed to write settings file");

    assert!(Settings::load_or_init(data_dir.path()).is_err());

    let contents = std::fs::read_to_string(&path).expect("Failed to read settings file");
    assert_eq!(contents, "{ not json");
}

#[test]
fn debug_mode_selects_the_log_level() {
    assert_eq!(logging::level_filter(true), LevelFilter::Debug);
    assert_eq!(logging::level_filter(false), LevelFilter::Info);
}

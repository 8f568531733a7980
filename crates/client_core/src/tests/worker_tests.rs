use super::*;
use crate::query::{EventQueryClient, QueryError};
use async_trait::async_trait;
use shared::{
    domain::{Locale, MessageRole},
    protocol::{QueryRequest, QueryResponse},
};
use std::{sync::Arc, time::Duration};

/// Echoes the question back; questions starting with "slow" take longer.
struct EchoQueryClient;

#[async_trait]
impl EventQueryClient for EchoQueryClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
        if request.question.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Ok(QueryResponse {
            response_text: format!("re: {}", request.question),
            events: Vec::new(),
        })
    }
}

fn session() -> ChatSession {
    ChatSession::new(Arc::new(EchoQueryClient), Locale::Es, "Barcelona")
}

async fn next_message(rx: &mut broadcast::Receiver<ChatEvent>) -> Message {
    loop {
        match rx.recv().await.expect("event") {
            ChatEvent::MessageAppended(message) => return message,
            ChatEvent::Busy(_) => continue,
        }
    }
}

#[tokio::test]
async fn overlapping_submissions_are_answered_in_order() {
    let handle = spawn_chat_worker(session(), LocationContext::new("08001", "Barcelona"));
    let mut rx = handle.subscribe();
    let mut status = String::new();

    handle.dispatch(
        ChatCommand::Send {
            text: "slow first".into(),
        },
        &mut status,
    );
    handle.dispatch(
        ChatCommand::Send {
            text: "second".into(),
        },
        &mut status,
    );
    assert!(status.is_empty());

    let texts = [
        next_message(&mut rx).await.text,
        next_message(&mut rx).await.text,
        next_message(&mut rx).await.text,
        next_message(&mut rx).await.text,
    ];
    assert_eq!(texts, ["slow first", "re: slow first", "second", "re: second"]);

    let session = handle.shutdown().await.expect("session");
    let roles: Vec<MessageRole> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
        ]
    );
}

#[tokio::test]
async fn busy_flag_brackets_each_submission() {
    let handle = spawn_chat_worker(session(), LocationContext::new("08001", "Barcelona"));
    let mut rx = handle.subscribe();
    let mut status = String::new();

    handle.dispatch(
        ChatCommand::Send {
            text: "hola".into(),
        },
        &mut status,
    );

    assert!(matches!(rx.recv().await.expect("event"), ChatEvent::Busy(true)));
    assert!(matches!(
        rx.recv().await.expect("event"),
        ChatEvent::MessageAppended(_)
    ));
    assert!(matches!(
        rx.recv().await.expect("event"),
        ChatEvent::MessageAppended(_)
    ));
    assert!(matches!(rx.recv().await.expect("event"), ChatEvent::Busy(false)));
}

#[tokio::test]
async fn blank_submission_appends_nothing() {
    let handle = spawn_chat_worker(session(), LocationContext::new("08001", "Barcelona"));
    let mut status = String::new();
    handle.dispatch(ChatCommand::Send { text: "  ".into() }, &mut status);

    let session = handle.shutdown().await.expect("session");
    assert_eq!(session.messages().len(), 1);
}

#[tokio::test]
async fn dispatch_after_shutdown_reports_stopped_worker() {
    let handle = spawn_chat_worker(session(), LocationContext::new("08001", "Barcelona"));
    let mut status = String::new();
    handle.dispatch(ChatCommand::Shutdown, &mut status);

    // Wait until the worker has dropped its receiver.
    handle.commands.closed().await;
    handle.dispatch(
        ChatCommand::Send {
            text: "hola".into(),
        },
        &mut status,
    );
    assert_eq!(status, "Chat worker stopped; restart the conversation");
}

//! Background task that owns a chat session and drains submissions in order.

use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tracing::debug;

use crate::chat::{ChatSession, LocationContext, Message};

pub const COMMAND_QUEUE_CAPACITY: usize = 32;
const EVENT_CHANNEL_CAPACITY: usize = 128;

#[derive(Debug, Clone)]
pub enum ChatCommand {
    Send { text: String },
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum ChatEvent {
    MessageAppended(Message),
    Busy(bool),
}

pub struct ChatHandle {
    commands: mpsc::Sender<ChatCommand>,
    events: broadcast::Sender<ChatEvent>,
    task: JoinHandle<ChatSession>,
}

/// Moves `session` onto a task; submissions are answered one at a time in arrival order.
pub fn spawn_chat_worker(session: ChatSession, location: LocationContext) -> ChatHandle {
    let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let task = tokio::spawn(run(session, location, command_rx, events.clone()));
    ChatHandle {
        commands,
        events,
        task,
    }
}

async fn run(
    mut session: ChatSession,
    location: LocationContext,
    mut commands: mpsc::Receiver<ChatCommand>,
    events: broadcast::Sender<ChatEvent>,
) -> ChatSession {
    while let Some(command) = commands.recv().await {
        match command {
            ChatCommand::Send { text } => {
                let before = session.messages().len();
                let _ = events.send(ChatEvent::Busy(true));
                session.send(&text, &location).await;
                for message in &session.messages()[before..] {
                    let _ = events.send(ChatEvent::MessageAppended(message.clone()));
                }
                let _ = events.send(ChatEvent::Busy(false));
            }
            ChatCommand::Shutdown => break,
        }
    }
    session
}

impl ChatHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// Queues `command`; a full queue or a stopped worker is reported through `status`.
    pub fn dispatch(&self, command: ChatCommand, status: &mut String) {
        let name = match &command {
            ChatCommand::Send { .. } => "send",
            ChatCommand::Shutdown => "shutdown",
        };

        match self.commands.try_send(command) {
            Ok(()) => debug!(command = name, "queued chat command"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                *status = "Chat queue is full; please retry".to_string();
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                *status = "Chat worker stopped; restart the conversation".to_string();
            }
        }
    }

    /// Stops the worker after pending commands and hands the session back.
    pub async fn shutdown(self) -> Option<ChatSession> {
        let _ = self.commands.send(ChatCommand::Shutdown).await;
        self.task.await.ok()
    }
}

#[cfg(test)]
#[path = "tests/worker_tests.rs"]
mod tests;

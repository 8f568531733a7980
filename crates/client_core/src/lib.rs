//! Client-side services for the KM0 assistant: the chat session, the event
//! query client, event-card formatting and voice dictation.

pub mod chat;
pub mod event_card;
pub mod query;
pub mod voice;
pub mod worker;

pub use chat::{date_label, fallback_reply, greeting, ChatSession, LocationContext, Message};
pub use event_card::EventCard;
pub use query::{
    EventQueryClient, HttpEventQueryClient, MissingEventQueryClient, QueryError,
    DEFAULT_QUERY_BASE_URL,
};
pub use voice::{
    SpeechEvent, SpeechRecognizer, UnsupportedSpeechRecognizer, VoiceError, VoiceOutcome,
    VoiceRecorder,
};
pub use worker::{spawn_chat_worker, ChatCommand, ChatEvent, ChatHandle};

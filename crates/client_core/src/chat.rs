//! Chat session: message history and the query round trip behind it.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use shared::{
    domain::{Locale, Localized, MessageId, MessageRole},
    protocol::{EventRecord, QueryRequest, DEFAULT_QUERY_LIMIT},
};
use tracing::{info, warn};

use crate::query::EventQueryClient;

const FALLBACK_REPLY: Localized = Localized::new(
    "Ho sento, ara mateix no puc consultar els esdeveniments. Torna-ho a provar més tard.",
    "Lo siento, ahora mismo no puedo consultar los eventos. Inténtalo de nuevo más tarde.",
    "Sorry, I can't look up events right now. Please try again later.",
);

pub const INPUT_PLACEHOLDER: Localized = Localized::new(
    "Escriu un missatge...",
    "Escribe un mensaje...",
    "Write a message...",
);

const LONG_MONTHS: [Localized; 12] = [
    Localized::new("gener", "enero", "January"),
    Localized::new("febrer", "febrero", "February"),
    Localized::new("març", "marzo", "March"),
    Localized::new("abril", "abril", "April"),
    Localized::new("maig", "mayo", "May"),
    Localized::new("juny", "junio", "June"),
    Localized::new("juliol", "julio", "July"),
    Localized::new("agost", "agosto", "August"),
    Localized::new("setembre", "septiembre", "September"),
    Localized::new("octubre", "octubre", "October"),
    Localized::new("novembre", "noviembre", "November"),
    Localized::new("desembre", "diciembre", "December"),
];

pub fn greeting(locale: Locale, city: &str) -> String {
    match locale {
        Locale::Ca => {
            format!("¡Hola! Sóc el teu assistent local de {city}. En què et puc ajudar avui?")
        }
        Locale::Es => {
            format!("¡Hola! Soy tu asistente local de {city}. ¿En qué puedo ayudarte hoy?")
        }
        Locale::En => format!("Hello! I'm your local assistant for {city}. How can I help you today?"),
    }
}

pub fn fallback_reply(locale: Locale) -> &'static str {
    FALLBACK_REPLY.get(locale)
}

/// Long-form date for the banner above the conversation.
pub fn date_label(locale: Locale, date: NaiveDate) -> String {
    let month = LONG_MONTHS[date.month0() as usize].get(locale);
    match locale {
        Locale::Ca => {
            let joiner = if month.starts_with(['a', 'e', 'i', 'o', 'u']) {
                "d’"
            } else {
                "de "
            };
            format!("{} {joiner}{month} de {}", date.day(), date.year())
        }
        Locale::Es => format!("{} de {month} de {}", date.day(), date.year()),
        Locale::En => format!("{} {month} {}", date.day(), date.year()),
    }
}

/// Where the user is asking from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationContext {
    pub postal_code: String,
    pub city_name: String,
    pub limit: u32,
}

impl LocationContext {
    pub fn new(postal_code: impl Into<String>, city_name: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            city_name: city_name.into(),
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub text: String,
    /// Present on answers from the query service, possibly empty.
    pub events: Option<Vec<EventRecord>>,
}

impl Message {
    pub fn event_cards(&self) -> &[EventRecord] {
        self.events.as_deref().unwrap_or_default()
    }
}

pub struct ChatSession {
    client: Arc<dyn EventQueryClient>,
    locale: Locale,
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatSession {
    /// Starts a conversation with the assistant's greeting for `city`.
    pub fn new(client: Arc<dyn EventQueryClient>, locale: Locale, city: &str) -> Self {
        let mut session = Self {
            client,
            locale,
            messages: Vec::new(),
            next_id: 1,
        };
        session.push(MessageRole::Assistant, greeting(locale, city), None);
        session
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn push(
        &mut self,
        role: MessageRole,
        text: String,
        events: Option<Vec<EventRecord>>,
    ) -> &Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            text,
            events,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn append_user_message(&mut self, text: &str) -> &Message {
        self.push(MessageRole::User, text.to_string(), None)
    }

    /// Asks the query service about `text` and appends exactly one assistant message.
    ///
    /// Failures of any kind append the fixed fallback reply; nothing is retried.
    pub async fn submit(&mut self, text: &str, location: &LocationContext) -> &Message {
        let request =
            QueryRequest::new(text, location.postal_code.clone()).with_limit(location.limit);

        let outcome = self.client.query(&request).await;
        match outcome {
            Ok(response) => {
                info!(
                    postal_code = %location.postal_code,
                    events = response.events.len(),
                    "query answered"
                );
                self.push(
                    MessageRole::Assistant,
                    response.response_text,
                    Some(response.events),
                )
            }
            Err(error) => {
                warn!(%error, postal_code = %location.postal_code, "query failed");
                let reply = fallback_reply(self.locale).to_string();
                self.push(MessageRole::Assistant, reply, None)
            }
        }
    }

    /// Appends the trimmed input as a user message and submits it.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn send(&mut self, input: &str, location: &LocationContext) -> Option<&Message> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.append_user_message(text);
        Some(self.submit(text, location).await)
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;

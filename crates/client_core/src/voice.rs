//! Voice dictation on top of an injected speech engine.

use shared::domain::{Locale, Localized};
use thiserror::Error;
use tracing::{debug, warn};

const PREVIEW_CHARS: usize = 40;

const UNSUPPORTED_MESSAGE: Localized = Localized::new(
    "El teu navegador no admet el reconeixement de veu.",
    "Tu navegador no soporta el reconocimiento de voz.",
    "Your browser does not support speech recognition.",
);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("speech recognition is not available on this host")]
    Unsupported,
    #[error("speech recognizer failed to start: {0}")]
    Start(String),
}

impl VoiceError {
    /// Message to show the user before the recording flow is closed.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match self {
            VoiceError::Unsupported | VoiceError::Start(_) => UNSUPPORTED_MESSAGE.get(locale),
        }
    }
}

/// Callbacks delivered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Partial(String),
    Final(String),
    Error(String),
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutcome {
    Transcript(String),
    Cancelled,
}

pub trait SpeechRecognizer {
    fn is_available(&self) -> bool;
    fn start(&mut self, language_tag: &str) -> Result<(), VoiceError>;
    fn stop(&mut self);
    fn abort(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeechRecognizer;

impl SpeechRecognizer for UnsupportedSpeechRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _language_tag: &str) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    fn stop(&mut self) {}

    fn abort(&mut self) {}
}

pub struct VoiceRecorder<R: SpeechRecognizer> {
    recognizer: R,
    final_text: String,
    interim_text: String,
    listening: bool,
    finished: bool,
}

impl<R: SpeechRecognizer> VoiceRecorder<R> {
    /// Starts listening in `locale`; an unavailable engine aborts the flow.
    pub fn open(mut recognizer: R, locale: Locale) -> Result<Self, VoiceError> {
        if !recognizer.is_available() {
            warn!("speech recognition unavailable");
            return Err(VoiceError::Unsupported);
        }
        recognizer.start(locale.speech_tag())?;
        debug!(language = locale.speech_tag(), "voice recording started");
        Ok(Self {
            recognizer,
            final_text: String::new(),
            interim_text: String::new(),
            listening: true,
            finished: false,
        })
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn transcript(&self) -> String {
        format!("{} {}", self.final_text, self.interim_text)
            .trim()
            .to_string()
    }

    /// Tail of the running transcript.
    pub fn preview(&self) -> String {
        let transcript = self.transcript();
        let count = transcript.chars().count();
        transcript
            .chars()
            .skip(count.saturating_sub(PREVIEW_CHARS))
            .collect()
    }

    /// Applies one engine callback; returns an outcome when the flow ends here.
    pub fn handle(&mut self, event: SpeechEvent) -> Option<VoiceOutcome> {
        if self.finished {
            return None;
        }
        match event {
            SpeechEvent::Partial(text) => {
                self.interim_text = text;
                None
            }
            SpeechEvent::Final(text) => {
                let text = text.trim();
                if !self.final_text.is_empty() && !text.is_empty() {
                    self.final_text.push(' ');
                }
                self.final_text.push_str(text);
                self.interim_text.clear();
                None
            }
            SpeechEvent::Ended => {
                self.listening = false;
                None
            }
            SpeechEvent::Error(reason) => {
                warn!(%reason, "speech recognition error");
                self.listening = false;
                self.finished = true;
                self.recognizer.abort();
                Some(VoiceOutcome::Cancelled)
            }
        }
    }

    pub fn stop(mut self) -> VoiceOutcome {
        self.recognizer.stop();
        self.listening = false;
        self.finished = true;
        let transcript = self.transcript();
        if transcript.is_empty() {
            VoiceOutcome::Cancelled
        } else {
            VoiceOutcome::Transcript(transcript)
        }
    }
}

impl<R: SpeechRecognizer> Drop for VoiceRecorder<R> {
    fn drop(&mut self) {
        if !self.finished {
            self.recognizer.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/voice_tests.rs"]
mod tests;

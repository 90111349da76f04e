//! Accumulates the assistant reply while the stream is consumed

use crate::models::{ChatEvent, ChatSource};

pub const SEARCH_NOTICE: &str = "🔍 Searching the web...\n\n";
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Streamed reply state for one assistant turn
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    pub session_id: Option<String>,
    text: String,
    searching: bool,
    pub sources: Vec<ChatSource>,
    pub done: bool,
    pub error: Option<String>,
}

/// What a single event changed, for incremental printing
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    None,
    /// New text to append
    Append(String),
    SearchStarted,
    SearchFinished,
    Finished,
    Failed,
}

impl Transcript {
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            session_id,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: ChatEvent) -> Update {
        match event {
            ChatEvent::SessionId(id) => {
                self.session_id = Some(id);
                Update::None
            }
            ChatEvent::Search(info) => {
                if info.is_completed() {
                    self.searching = false;
                    Update::SearchFinished
                } else if info.is_in_progress() && !self.searching {
                    self.searching = true;
                    Update::SearchStarted
                } else {
                    Update::None
                }
            }
            ChatEvent::Chunk(chunk) => {
                self.text.push_str(&chunk);
                Update::Append(chunk)
            }
            ChatEvent::Done { sources } => {
                self.sources = sources;
                self.searching = false;
                self.done = true;
                Update::Finished
            }
            ChatEvent::Error(message) => {
                self.fail(message);
                Update::Failed
            }
        }
    }

    /// Mark the turn failed, replacing any partial text
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.searching = false;
        self.text.clear();
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Reply as it should be displayed right now
    pub fn display_text(&self) -> String {
        if self.error.is_some() {
            return ERROR_REPLY.to_string();
        }
        if self.searching {
            format!("{}{}", SEARCH_NOTICE, self.text)
        } else {
            self.text.clone()
        }
    }
}

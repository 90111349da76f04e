//! Chat assistant models

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,

    #[serde(default)]
    pub event_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    pub created_at: String,

    #[serde(default)]
    pub updated_at: Option<String>,

    /// Only populated when fetching a single session
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,

    pub session_id: String,

    /// `user` or `assistant`
    pub role: String,

    pub content: String,

    #[serde(default)]
    pub sources: Option<Vec<ChatSource>>,

    pub created_at: String,
}

/// A document excerpt the assistant drew on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSource {
    #[serde(default)]
    pub document: Option<String>,

    #[serde(default)]
    pub preview: Option<String>,
}

/// Web search progress reported mid-stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchInfo {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl SearchInfo {
    /// Absent status counts as still searching
    pub fn is_in_progress(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("in_progress"))
    }

    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}

/// One decoded `data:` payload of the chat stream
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    SessionId(String),
    Search(SearchInfo),
    Chunk(String),
    Done { sources: Vec<ChatSource> },
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_missing_ids() {
        let req = ChatRequest {
            message: "What should I eat at mile 30?".into(),
            event_id: Some("e1".into()),
            session_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "What should I eat at mile 30?", "event_id": "e1"})
        );
    }

    #[test]
    fn test_search_status() {
        let pending = SearchInfo { kind: None, status: None };
        assert!(pending.is_in_progress());

        let done = SearchInfo {
            kind: Some("web_search".into()),
            status: Some("completed".into()),
        };
        assert!(done.is_completed());
        assert!(!done.is_in_progress());
    }

    #[test]
    fn test_session_list_has_no_messages() {
        let session: ChatSession = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "event_id": null,
            "title": "Fueling",
            "created_at": "2025-01-01T00:00:00",
            "updated_at": null,
            "messages": null
        }))
        .unwrap();
        assert!(session.messages.is_none());
    }
}

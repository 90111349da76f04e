//! Incremental decoder for the chat server-sent event stream
//!
//! The backend writes one `data: {json}` line per event. Network chunks can
//! split a line anywhere, so bytes are buffered until a newline arrives.

use serde::Deserialize;
use tracing::debug;

use crate::models::{ChatEvent, ChatSource, SearchInfo};

const DATA_PREFIX: &str = "data: ";

/// Raw payload; exactly one field is set per line
#[derive(Debug, Default, Deserialize)]
struct StreamPayload {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    search: Option<SearchInfo>,
    #[serde(default)]
    chunk: Option<String>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    sources: Option<Vec<ChatSource>>,
    #[serde(default)]
    error: Option<String>,
}

impl StreamPayload {
    fn into_event(self) -> Option<ChatEvent> {
        if let Some(error) = self.error {
            return Some(ChatEvent::Error(error));
        }
        if let Some(id) = self.session_id {
            return Some(ChatEvent::SessionId(id));
        }
        if let Some(search) = self.search {
            return Some(ChatEvent::Search(search));
        }
        if let Some(chunk) = self.chunk {
            return Some(ChatEvent::Chunk(chunk));
        }
        if self.done.unwrap_or(false) {
            return Some(ChatEvent::Done {
                sources: self.sources.unwrap_or_default(),
            });
        }
        None
    }
}

/// Parse a single line; `None` for blank, non-data or unparsable lines
pub fn parse_line(line: &str) -> Option<ChatEvent> {
    let line = line.trim_end_matches('\r');
    let payload = line.strip_prefix(DATA_PREFIX)?;
    match serde_json::from_str::<StreamPayload>(payload) {
        Ok(p) => p.into_event(),
        Err(e) => {
            debug!(error = %e, line = payload, "Ignoring unparsable chat stream line");
            None
        }
    }
}

/// Buffers bytes across network chunks and yields complete events
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk and drain every complete line
    pub fn push(&mut self, bytes: &[u8]) -> Vec<ChatEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(event) = parse_line(&text) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing line that was never newline-terminated
    pub fn finish(&mut self) -> Option<ChatEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&String::from_utf8_lossy(&rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_event_kind() {
        assert_eq!(
            parse_line(r#"data: {"session_id": "abc"}"#),
            Some(ChatEvent::SessionId("abc".into()))
        );
        assert_eq!(
            parse_line(r#"data: {"chunk": "Hello"}"#),
            Some(ChatEvent::Chunk("Hello".into()))
        );
        assert_eq!(
            parse_line(r#"data: {"error": "boom"}"#),
            Some(ChatEvent::Error("boom".into()))
        );
        assert_eq!(
            parse_line(r#"data: {"done": true, "sources": []}"#),
            Some(ChatEvent::Done { sources: vec![] })
        );
        match parse_line(r#"data: {"search": {"type": "web_search", "status": "in_progress"}}"#) {
            Some(ChatEvent::Search(info)) => assert!(info.is_in_progress()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ignores_noise() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line(": keep-alive"), None);
        assert_eq!(parse_line("data: {not json"), None);
        assert_eq!(parse_line(r#"data: {"unknown": 1}"#), None);
    }

    #[test]
    fn test_decoder_reassembles_split_lines() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"chu").is_empty());
        let events = decoder.push(b"nk\": \"Hi\"}\n\ndata: {\"chunk\": \" there\"}\n\n");
        assert_eq!(
            events,
            vec![
                ChatEvent::Chunk("Hi".into()),
                ChatEvent::Chunk(" there".into())
            ]
        );
    }

    #[test]
    fn test_decoder_handles_multibyte_split() {
        let line = "data: {\"chunk\": \"🔍 ok\"}\n".as_bytes();
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(&line[..19]).is_empty());
        assert_eq!(decoder.push(&line[19..]), vec![ChatEvent::Chunk("🔍 ok".into())]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(br#"data: {"done": true}"#).is_empty());
        assert_eq!(decoder.finish(), Some(ChatEvent::Done { sources: vec![] }));
        assert_eq!(decoder.finish(), None);
    }
}

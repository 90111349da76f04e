//! Chat stream handling

pub mod decoder;
pub mod stream;
pub mod transcript;

pub use decoder::SseDecoder;
pub use stream::consume_stream;
pub use transcript::{Transcript, Update};

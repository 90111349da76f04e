//! Drives a chat byte stream through the decoder into a transcript

use bytes::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use tracing::debug;

use super::decoder::SseDecoder;
use super::transcript::{Transcript, Update};
use crate::error::{PlannerError, Result};
use crate::models::ChatEvent;

/// Consume the stream, reporting each update as it is applied.
///
/// Fails on a transport error or an `error` event, leaving the transcript
/// in its failed state.
pub async fn consume_stream<S, F>(
    stream: S,
    transcript: &mut Transcript,
    mut on_update: F,
) -> Result<()>
where
    S: Stream<Item = Result<Bytes>>,
    F: FnMut(&Update),
{
    pin_mut!(stream);
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                transcript.fail(e.to_string());
                on_update(&Update::Failed);
                return Err(e);
            }
        };
        for event in decoder.push(&bytes) {
            apply(transcript, event, &mut on_update)?;
        }
    }

    if let Some(event) = decoder.finish() {
        apply(transcript, event, &mut on_update)?;
    }

    if !transcript.done {
        debug!("Chat stream ended without a done event");
    }
    Ok(())
}

fn apply<F: FnMut(&Update)>(
    transcript: &mut Transcript,
    event: ChatEvent,
    on_update: &mut F,
) -> Result<()> {
    let update = transcript.apply(event);
    on_update(&update);
    if update == Update::Failed {
        return Err(PlannerError::Stream(
            transcript.error.clone().unwrap_or_default(),
        ));
    }
    Ok(())
}

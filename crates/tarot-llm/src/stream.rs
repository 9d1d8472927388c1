//! Streaming analysis text.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use reqwest_eventsource::{Error as EventSourceError, Event, EventSource};
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::sse::{decode_data, is_done, SseEvent};

/// `data` payloads of a chat completion event stream.
pub type EventData = BoxStream<'static, Result<String, LlmError>>;

/// A stream of analysis text increments.
///
/// Yields each non-empty delta in arrival order and ends after the `[DONE]`
/// sentinel. A stream that ends before the sentinel yields
/// [`LlmError::IncompleteStream`] as its final item; a transport failure
/// yields [`LlmError::StreamUnreadable`]. Increments already yielded stay
/// valid in both cases.
pub struct AnalysisStream {
    events: EventData,
    finished: bool,
}

impl AnalysisStream {
    pub fn new(events: EventData) -> Self {
        Self {
            events,
            finished: false,
        }
    }

    /// Wait for the event source to connect.
    ///
    /// Rejected requests fail here, before any text is yielded.
    pub(crate) async fn open(mut source: EventSource) -> Result<Self, LlmError> {
        let first = match source.next().await {
            Some(Ok(Event::Open)) => None,
            Some(Ok(Event::Message(message))) => Some(message.data),
            Some(Err(e)) => {
                source.close();
                return Err(open_error(e).await);
            }
            None => return Err(LlmError::IncompleteStream),
        };
        debug!("Analysis stream opened");

        let events = stream::iter(first.map(Ok))
            .chain(EventDataStream { source })
            .boxed();
        Ok(Self::new(events))
    }

    /// Drain the stream into one string, calling `on_update` with the text
    /// accumulated so far after every increment.
    ///
    /// On error, the text accumulated before the failure is returned with it.
    pub async fn collect_text<F>(mut self, mut on_update: F) -> (String, Option<LlmError>)
    where
        F: FnMut(&str),
    {
        let mut text = String::new();
        while let Some(item) = self.next().await {
            match item {
                Ok(delta) => {
                    text.push_str(&delta);
                    on_update(&text);
                }
                Err(e) => return (text, Some(e)),
            }
        }
        (text, None)
    }
}

impl Stream for AnalysisStream {
    type Item = Result<String, LlmError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if self.finished {
                return Poll::Ready(None);
            }

            match self.events.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(data))) => match decode_data(&data) {
                    Some(SseEvent::Delta(delta)) => return Poll::Ready(Some(Ok(delta))),
                    Some(SseEvent::Done) => {
                        debug!("Analysis stream complete");
                        self.finished = true;
                    }
                    None => continue,
                },
                Poll::Ready(Some(Err(e))) => {
                    warn!("Analysis stream failed: {}", e);
                    self.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    warn!("Analysis stream ended without completion marker");
                    self.finished = true;
                    return Poll::Ready(Some(Err(LlmError::IncompleteStream)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl std::fmt::Debug for AnalysisStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisStream")
            .field("finished", &self.finished)
            .finish()
    }
}

/// Message payloads from an open event source. Closes the source on the
/// sentinel, so it never reconnects.
struct EventDataStream {
    source: EventSource,
}

impl Stream for EventDataStream {
    type Item = Result<String, LlmError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.source).poll_next(cx) {
                Poll::Ready(Some(Ok(Event::Open))) => continue,
                Poll::Ready(Some(Ok(Event::Message(message)))) => {
                    if is_done(&message.data) {
                        self.source.close();
                    }
                    return Poll::Ready(Some(Ok(message.data)));
                }
                Poll::Ready(Some(Err(EventSourceError::StreamEnded))) | Poll::Ready(None) => {
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(Err(e))) => {
                    self.source.close();
                    return Poll::Ready(Some(Err(LlmError::StreamUnreadable(e.to_string()))));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

async fn open_error(error: EventSourceError) -> LlmError {
    match error {
        EventSourceError::InvalidStatusCode(status, response) => {
            let details = response.text().await.unwrap_or_default();
            LlmError::from_status(status, details)
        }
        EventSourceError::InvalidContentType(content_type, _) => {
            LlmError::InvalidResponse(format!(
                "expected an event stream, got content type {:?}",
                content_type
            ))
        }
        EventSourceError::Transport(e) => {
            LlmError::Network(format!("Failed to send request: {}", e))
        }
        EventSourceError::StreamEnded => LlmError::IncompleteStream,
        other => LlmError::StreamUnreadable(other.to_string()),
    }
}

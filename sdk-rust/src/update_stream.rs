use crate::{line_framer::LineFramer, ForgeError, ForgeResult, ForgeUpdate};
use futures::{Stream, StreamExt};
use std::{
    pin::Pin,
    task::{Context, Poll},
};
use tracing::{debug, warn};

/// Prefix of every line that carries a record.
pub const DATA_PREFIX: &str = "data: ";

/// A single-pass stream of updates from a depth run.
/// Items are yielded as soon as their line is complete. The stream ends when
/// the server closes the body; an `Err` item is always the last one.
pub struct ForgeUpdateStream(Pin<Box<dyn Stream<Item = ForgeResult<ForgeUpdate>> + Send>>);

impl ForgeUpdateStream {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = ForgeResult<ForgeUpdate>> + Send + 'static,
    {
        Self(Box::pin(stream))
    }
}

impl Stream for ForgeUpdateStream {
    type Item = ForgeResult<ForgeUpdate>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.as_mut().poll_next(cx)
    }
}

/// Parse one complete line of the update stream.
/// Returns `None` for lines without the data prefix and for records that
/// fail to parse; the latter are logged and otherwise ignored.
pub fn parse_data_line(line: &str) -> Option<ForgeUpdate> {
    let payload = line.strip_prefix(DATA_PREFIX)?;
    match serde_json::from_str::<ForgeUpdate>(payload) {
        Ok(update) => Some(update),
        Err(error) => {
            warn!(%error, payload, "discarding malformed forge update");
            None
        }
    }
}

/// Decode a response body into updates.
/// A transport error while reading the body ends the stream with that error.
pub fn decode_update_stream<S, B, E>(body: S) -> ForgeUpdateStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ForgeError> + Send + 'static,
{
    let stream = async_stream::try_stream! {
        let mut body = Box::pin(body);
        let mut framer = LineFramer::new();
        let mut emitted = 0usize;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(Into::<ForgeError>::into)?;
            for line in framer.push(chunk.as_ref()) {
                if let Some(update) = parse_data_line(&line) {
                    emitted += 1;
                    yield update;
                }
            }
        }

        if let Some(fragment) = framer.finish() {
            debug!(%fragment, "dropping unterminated line at end of stream");
        }
        debug!(emitted, "forge update stream ended");
    };

    ForgeUpdateStream::from_stream(stream)
}
